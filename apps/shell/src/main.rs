use std::env;

use dao_atoms::proposals::ProposalStatus;
use dao_shared::{AppConfig, AppState};
use dao_shell::{Page, Shell};
use futures::future::join_all;
use taskboard_block::BoardFilter;

type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!("🚀 dao-shell starting as {}", config.session_user.name);

    let state = AppState::from_config(config);
    let mut shell = Shell::new(state.clone());

    log_governance(&shell);
    log_open_votes(&state).await;

    // Optional first argument: a proposal to open before the board.
    if let Some(id) = env::args().nth(1) {
        match shell.view_proposal(&id).await {
            Ok(_) => {
                if let Some(session) = shell.detail() {
                    let proposal = session.proposal();
                    tracing::info!(
                        "{} [{}] {} | {} | next: {:?}",
                        proposal.id,
                        proposal.status.badge().label,
                        proposal.title,
                        session.wallet_label(),
                        session.available_next_statuses()
                    );
                }
            }
            Err(e) => tracing::error!("Failed to open proposal {}: {}", id, e),
        }
    }

    shell.navigate(Page::TaskBoard).await?;
    log_board(&shell);

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn log_governance(shell: &Shell) {
    let proposals = shell.governance().visible();
    tracing::info!("Governance: {} proposals", proposals.len());
    for p in &proposals {
        tracing::info!(
            "  {:<10} {:<9} {} ({})",
            p.id,
            p.status.badge().label,
            p.title,
            p.guild
        );
    }
}

/// Load every active proposal concurrently and log its results panel.
async fn log_open_votes(state: &AppState) {
    let loader = state.loader();
    let active = state
        .proposals
        .list()
        .into_iter()
        .filter(|p| p.status == ProposalStatus::Active)
        .map(|p| p.id)
        .collect::<Vec<_>>();

    let loads = active.iter().map(|id| loader.load(Some(id.as_str())));
    for (id, loaded) in active.iter().zip(join_all(loads).await) {
        match loaded {
            Ok(proposal) => {
                let summary = proposal.vote_results.summary();
                tracing::info!(
                    "  {} votes: {} cast, {}% approve, quorum met: {:?}",
                    id,
                    summary.total_cast,
                    summary.approve_pct,
                    summary.quorum_met
                );
            }
            Err(e) => tracing::error!("Failed to load {}: {}", id, e),
        }
    }
}

fn log_board(shell: &Shell) {
    let board = shell.board();
    for column in board.view(&BoardFilter::default()) {
        tracing::info!("Board column {}: {} tasks", column.title, column.tasks.len());
    }

    let orphans = board.state().orphaned_tasks();
    if !orphans.is_empty() {
        tracing::warn!("{} tasks are not in any column: {:?}", orphans.len(), orphans);
    }
}
