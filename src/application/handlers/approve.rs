//! ApproveHandler - Command handler for approving a proposal at quorum.

use std::sync::Arc;

use crate::domain::foundation::{
    EventId, PrincipalId, ProposalId, SerializableDomainEvent, Timestamp,
};
use crate::domain::ledger::{LedgerError, LedgerEvent};
use crate::ports::{EventPublisher, LedgerStore};

/// Command to approve a proposal that has reached quorum.
#[derive(Debug, Clone)]
pub struct ApproveCommand {
    pub caller: PrincipalId,
    pub proposal_id: ProposalId,
}

/// Result of a successful approval.
#[derive(Debug, Clone)]
pub struct ApproveResult {
    /// Voter roll consumed by the approval, in vote order. Each voter was
    /// minted one credential keyed by the proposal id.
    pub voters: Vec<PrincipalId>,
    pub event: LedgerEvent,
}

/// Handler for proposal approval. Callable by any principal: quorum is
/// the gate, not the identity of the caller, so the command's `caller`
/// is never checked against a role.
pub struct ApproveHandler {
    required_votes: u32,
    store: Arc<dyn LedgerStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ApproveHandler {
    pub fn new(
        required_votes: u32,
        store: Arc<dyn LedgerStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            required_votes,
            store,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: ApproveCommand) -> Result<ApproveResult, LedgerError> {
        // 1. Load a snapshot and apply the approval
        //    (unknown-proposal, already-approved and quorum checks, then
        //    the batch mint to the voter roll)
        let mut state = self.store.load().await?;
        let voters = state.approve(cmd.proposal_id, self.required_votes)?;

        // 2. Commit
        self.store.commit(state).await?;

        // 3. Publish the notification
        let event = LedgerEvent::Approved {
            event_id: EventId::new(),
            proposal_id: cmd.proposal_id,
            voters: voters.clone(),
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(ApproveResult { voters, event })
    }
}
