//! Governance - proposal catalog, per-proposal ballots, quorum approval.

mod ballot;
mod proposal;

pub use ballot::Ballot;
pub use proposal::{Proposal, ProposalStatus};
