use dao_shared::{AppState, GovernanceView, ProposalSession};
use taskboard_block::TaskBoard;

use crate::error::ShellError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Governance,
    ProposalDetail(String),
    TaskBoard,
}

/// Top-level navigation. Owns one instance of each view; the proposal
/// repository behind them is shared through [`AppState`].
pub struct Shell {
    state: AppState,
    page: Page,
    governance: GovernanceView,
    detail: Option<ProposalSession>,
    board: TaskBoard,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        let governance = state.governance();
        let board = state.open_board();
        Self {
            state,
            page: Page::Governance,
            governance,
            detail: None,
            board,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn governance(&self) -> &GovernanceView {
        &self.governance
    }

    pub fn governance_mut(&mut self) -> &mut GovernanceView {
        &mut self.governance
    }

    /// Session of the open proposal, if the detail page is showing.
    pub fn detail(&self) -> Option<&ProposalSession> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut ProposalSession> {
        self.detail.as_mut()
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut TaskBoard {
        &mut self.board
    }

    /// Switch pages. Entering the detail page loads the proposal; entering
    /// the task board turns newly executed proposals into tasks. If either
    /// step fails the shell stays where it was.
    pub async fn navigate(&mut self, page: Page) -> Result<&Page, ShellError> {
        tracing::info!("Navigating {:?} -> {:?}", self.page, page);

        match &page {
            Page::Governance => {
                self.detail = None;
            }
            Page::ProposalDetail(id) => {
                let proposal = self.state.loader().load(Some(id.as_str())).await?;
                self.detail = Some(self.state.session(proposal));
            }
            Page::TaskBoard => {
                let created = self
                    .board
                    .sync_executed_proposals(&self.state.proposals.list())?;
                if created > 0 {
                    tracing::info!("Created {} tasks from executed proposals", created);
                }
                self.detail = None;
            }
        }

        self.page = page;
        Ok(&self.page)
    }

    pub async fn view_proposal(&mut self, id: &str) -> Result<&Page, ShellError> {
        self.navigate(Page::ProposalDetail(id.to_string())).await
    }

    pub async fn back_to_governance(&mut self) -> Result<&Page, ShellError> {
        self.navigate(Page::Governance).await
    }
}

#[cfg(test)]
mod tests {
    use dao_atoms::proposals::{ProposalError, ProposalStatus, VoteChoice};
    use dao_atoms::users::SYSTEM_GENERATED_USER_ID;
    use dao_shared::AppConfig;

    use super::*;

    fn shell() -> Shell {
        Shell::new(AppState::in_memory(AppConfig::default()))
    }

    fn generated_tasks(shell: &Shell) -> usize {
        shell
            .board()
            .state()
            .tasks
            .values()
            .filter(|t| t.created_by == SYSTEM_GENERATED_USER_ID)
            .count()
    }

    #[tokio::test(start_paused = true)]
    async fn starts_on_governance() {
        let shell = shell();
        assert_eq!(shell.page(), &Page::Governance);
        assert!(shell.detail().is_none());
        assert_eq!(shell.governance().visible().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn opening_a_proposal_loads_a_session() {
        let mut shell = shell();
        shell.view_proposal("PROP-002").await.unwrap();

        assert_eq!(shell.page(), &Page::ProposalDetail("PROP-002".into()));
        assert_eq!(shell.detail().unwrap().proposal().id, "PROP-002");

        shell.back_to_governance().await.unwrap();
        assert_eq!(shell.page(), &Page::Governance);
        assert!(shell.detail().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_proposal_keeps_current_page() {
        let mut shell = shell();
        let err = shell.view_proposal("PROP-404").await.unwrap_err();

        assert!(matches!(err, ShellError::Proposal(ProposalError::NotFound(_))));
        assert_eq!(shell.page(), &Page::Governance);
    }

    #[tokio::test(start_paused = true)]
    async fn entering_task_board_syncs_once() {
        let mut shell = shell();
        shell.navigate(Page::TaskBoard).await.unwrap();
        assert_eq!(generated_tasks(&shell), 2);

        shell.navigate(Page::Governance).await.unwrap();
        shell.navigate(Page::TaskBoard).await.unwrap();
        assert_eq!(generated_tasks(&shell), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn executing_from_detail_page_reaches_the_board() {
        let mut shell = shell();
        shell.view_proposal("PROP-002").await.unwrap();

        let session = shell.detail_mut().unwrap();
        session.connect_wallet().await.unwrap();
        session.submit_vote(VoteChoice::Approve).await.unwrap();
        session.select_next_status(Some(ProposalStatus::Executed)).unwrap();
        assert!(session.change_status(|_, _| true).unwrap());

        shell.navigate(Page::TaskBoard).await.unwrap();

        assert_eq!(generated_tasks(&shell), 3);
        assert!(shell
            .board()
            .state()
            .tasks
            .values()
            .any(|t| t.proposal_id.as_deref() == Some("PROP-002")));
        assert_eq!(
            shell.state().proposals.get("PROP-002").unwrap().status,
            ProposalStatus::Executed
        );
    }
}
