//! VoteHandler - Command handler for voting on an open proposal.

use std::sync::Arc;

use crate::domain::foundation::{
    EventId, PrincipalId, ProposalId, SerializableDomainEvent, Timestamp,
};
use crate::domain::ledger::{LedgerError, LedgerEvent};
use crate::ports::{EventPublisher, LedgerStore};

/// Command to cast a vote on a proposal.
#[derive(Debug, Clone)]
pub struct VoteCommand {
    pub caller: PrincipalId,
    pub proposal_id: ProposalId,
}

/// Result of a successfully cast vote.
#[derive(Debug, Clone)]
pub struct VoteResult {
    /// Tally after this vote was counted.
    pub vote_count: u32,
    pub event: LedgerEvent,
}

/// Handler for voting. Open to active members, one vote per principal
/// per proposal.
pub struct VoteHandler {
    store: Arc<dyn LedgerStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl VoteHandler {
    pub fn new(store: Arc<dyn LedgerStore>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: VoteCommand) -> Result<VoteResult, LedgerError> {
        // 1. Load a snapshot and record the vote
        //    (eligibility, unknown-proposal and vote-once checks)
        let mut state = self.store.load().await?;
        let vote_count = state.vote(cmd.caller.clone(), cmd.proposal_id)?;

        // 2. Commit
        self.store.commit(state).await?;

        // 3. Publish the notification
        let event = LedgerEvent::Voted {
            event_id: EventId::new(),
            proposal_id: cmd.proposal_id,
            voter: cmd.caller,
            vote_count,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(VoteResult { vote_count, event })
    }
}
