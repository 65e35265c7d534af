//! Mock governance data set used until a real backend exists.

use chrono::{DateTime, TimeZone, Utc};

use super::lifecycle::ProposalStatus;
use super::model::{Comment, Proposal, ProposalAction, ViewerVoting, VoteChoice, VoteTally};

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

fn action(target: &str, signature: &str, arguments: &[&str]) -> ProposalAction {
    ProposalAction {
        target_address: target.to_string(),
        function_signature: signature.to_string(),
        arguments: arguments.iter().map(|a| a.to_string()).collect(),
    }
}

fn comment(address: &str, avatar: &str, content: &str, timestamp: &str, likes: u32) -> Comment {
    Comment {
        address: address.to_string(),
        avatar_fallback: avatar.to_string(),
        content: content.to_string(),
        timestamp: timestamp.to_string(),
        likes,
        is_reply: false,
    }
}

fn tally(approve: u64, reject: u64, abstain: u64, power: u64, quorum: f64) -> VoteTally {
    VoteTally {
        approve_votes: approve,
        reject_votes: reject,
        abstain_votes: abstain,
        total_voting_power: Some(power),
        quorum_threshold: Some(quorum),
    }
}

fn voting(open: bool, choice: Option<VoteChoice>) -> ViewerVoting {
    ViewerVoting {
        is_voting_open: open,
        has_voted: choice.is_some(),
        user_vote_choice: choice,
    }
}

#[allow(clippy::too_many_arguments)]
fn proposal(
    id: &str,
    title: &str,
    status: ProposalStatus,
    creator: &str,
    guild: &str,
    voting_deadline: DateTime<Utc>,
    created_at: DateTime<Utc>,
    description: &str,
) -> Proposal {
    Proposal {
        id: id.to_string(),
        title: title.to_string(),
        status,
        creator_address: creator.to_string(),
        guild: guild.to_string(),
        voting_deadline,
        created_at,
        executed_at: None,
        description_html: format!("<p>{}</p>", description),
        actions: Vec::new(),
        voting: ViewerVoting::default(),
        vote_results: VoteTally::default(),
        comments: Vec::new(),
        connected_wallet: None,
    }
}

pub fn mock_proposals() -> Vec<Proposal> {
    use ProposalStatus::*;

    let treasury = "0xTreasuryDAOContract...";

    vec![
        Proposal {
            vote_results: tally(0, 0, 0, 2_500_000, 0.05),
            comments: vec![comment(
                "0xCommenterOne...",
                "C1",
                "Looking forward to this, the current system needs an overhaul.",
                "1 day ago",
                5,
            )],
            ..proposal(
                "PROP-001",
                "Community Grant Program Restructure",
                Pending,
                "0xAlicePendingCreator...",
                "Grants Committee",
                at(2024, 9, 1, 12),
                at(2024, 8, 1, 10),
                "Proposal to restructure the community grant program for enhanced transparency and efficiency. This is an initial draft for community feedback before formal voting commences.",
            )
        },
        Proposal {
            actions: vec![action("0xStakingContractV2...", "setTiers(Tier[])", &["TierDetailsObjectOrArray"])],
            voting: voting(true, None),
            vote_results: tally(150, 25, 10, 1_800_000, 0.10),
            connected_wallet: Some("0xUserCanVote...".to_string()),
            ..proposal(
                "PROP-002",
                "Implement Advanced Staking Tiers",
                Active,
                "0xBobActiveCreator...",
                "Economics Guild",
                at(2024, 8, 25, 17),
                at(2024, 8, 10, 11),
                "This proposal outlines a new tiered staking rewards system designed to incentivize long-term token holders and increase network security. Details of tiers, APY, and lock-up periods are attached.",
            )
        },
        Proposal {
            actions: vec![action(
                treasury,
                "transferTokens(address,uint256,address)",
                &["0xMarketingMultiSig...", "75000000000000000000000", "0xDAITokenAddress..."],
            )],
            voting: voting(true, Some(VoteChoice::Approve)),
            vote_results: tally(300, 50, 15, 2_000_000, 0.15),
            comments: vec![comment(
                "0xSupportiveSam...",
                "SS",
                "Great initiative! This will definitely help growth.",
                "6 hours ago",
                12,
            )],
            connected_wallet: Some("0xUserHasVoted...".to_string()),
            ..proposal(
                "PROP-003",
                "Marketing Campaign Fund Allocation",
                Active,
                "0xCarolMarketingLead...",
                "Marketing Guild",
                at(2024, 8, 28, 17),
                at(2024, 7, 1, 12),
                "Requesting 75,000 DAI from the treasury to fund a targeted 3-month marketing campaign to expand user base in new geographical regions.",
            )
        },
        Proposal {
            executed_at: Some(at(2024, 7, 16, 10)),
            actions: vec![action(
                "0xProtocolManager...",
                "upgradeModule(bytes32,address)",
                &["ModuleX_ID_Hash", "0xNewModuleXImplAddress..."],
            )],
            voting: voting(false, Some(VoteChoice::Approve)),
            vote_results: tally(600, 40, 20, 1_200_000, 0.20),
            connected_wallet: Some("0xGeneralUser...".to_string()),
            ..proposal(
                "PROP-004",
                "Upgrade Protocol Core Logic Module X",
                Executed,
                "0xDaveDevLead...",
                "Protocol Engineering",
                at(2024, 7, 15, 17),
                at(2024, 7, 15, 13),
                "The proposal to upgrade Protocol Core Logic Module X for improved performance and security has been successfully executed.",
            )
        },
        Proposal {
            actions: vec![action(
                "0xPartnershipRegistry...",
                "registerPartnership(address,string)",
                &["0xChainAnalyticsAddress...", "Data Integration Tier 2"],
            )],
            vote_results: tally(90, 30, 5, 1_500_000, 0.10),
            connected_wallet: Some("0xGeneralUser...".to_string()),
            ..proposal(
                "PROP-005",
                "Partnership with ChainAnalytics Inc.",
                Failed,
                "0xEveBizDev...",
                "Business Development",
                at(2024, 7, 10, 17),
                at(2024, 8, 20, 14),
                "Proposal for a strategic partnership with ChainAnalytics Inc. to integrate their on-chain data tools. Failed to meet the required quorum.",
            )
        },
        Proposal {
            vote_results: tally(0, 0, 0, 0, 0.10),
            ..proposal(
                "PROP-006",
                "Adjust Treasury Fee Burn Mechanism",
                Cancelled,
                "0xFrankFinance...",
                "Treasury Management",
                at(2024, 8, 5, 17),
                at(2024, 8, 20, 14),
                "This proposal to adjust the treasury fee burn mechanism has been cancelled by the proposer due to discovery of a critical flaw in the proposed model. A revised proposal will be submitted later.",
            )
        },
        Proposal {
            actions: vec![action(
                treasury,
                "approveGrant(address,uint256,string)",
                &["0xGraceResearcher...", "20000000000000000000000", "ZK-Rollup Feasibility Study"],
            )],
            voting: voting(true, None),
            vote_results: tally(50, 5, 2, 1_000_000, 0.05),
            connected_wallet: Some("0xUserCanVote...".to_string()),
            ..proposal(
                "PROP-007",
                "Research Grant for ZK-Rollup Integration Study",
                Active,
                "0xGraceResearcher...",
                "Research & Development",
                at(2024, 9, 5, 12),
                at(2024, 8, 1, 10),
                "Request for a research grant of 20,000 DAI to conduct a feasibility study on integrating ZK-Rollup technology for scalability improvements.",
            )
        },
        Proposal {
            vote_results: tally(0, 0, 0, 3_000_000, 0.10),
            ..proposal(
                "PROP-008",
                "Update DAO Constitution - Section 3.B",
                Pending,
                "0xHenryGovernance...",
                "Governance Council",
                at(2024, 9, 10, 12),
                at(2024, 8, 1, 10),
                "Proposed amendment to Section 3.B of the DAO Constitution regarding conflict of interest declarations for council members. Seeking community review.",
            )
        },
        Proposal {
            executed_at: Some(at(2024, 6, 25, 14)),
            actions: vec![action(
                treasury,
                "payVendor(address,uint256,string)",
                &["0xTrailOfBitsWallet...", "40000000000000000000000", "Security Audit Services"],
            )],
            voting: voting(false, Some(VoteChoice::Approve)),
            vote_results: tally(450, 10, 5, 900_000, 0.15),
            connected_wallet: Some("0xGeneralUser...".to_string()),
            ..proposal(
                "PROP-009",
                "Security Audit for New Lending Module",
                Executed,
                "0xIvySecurity...",
                "Security Team",
                at(2024, 6, 20, 17),
                at(2024, 7, 1, 12),
                "The proposal to engage TrailOfBits for a comprehensive security audit of the new lending module has been approved and the audit is complete. Report attached.",
            )
        },
        Proposal {
            vote_results: tally(100, 120, 30, 1_100_000, 0.10),
            connected_wallet: Some("0xGeneralUser...".to_string()),
            ..proposal(
                "PROP-010",
                "Launch Bug Bounty Program v2",
                Failed,
                "0xJackBountyHunter...",
                "Community Security",
                at(2024, 7, 1, 17),
                at(2024, 8, 20, 14),
                "Proposal to launch an enhanced Bug Bounty Program (v2) with increased rewards. This proposal failed due to concerns about the sustainability of the proposed reward pool.",
            )
        },
    ]
}
