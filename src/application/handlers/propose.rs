//! ProposeHandler - Command handler for listing a governance proposal.

use std::sync::Arc;

use crate::domain::foundation::{
    Amount, EventId, PrincipalId, ProposalId, SerializableDomainEvent, Timestamp,
};
use crate::domain::ledger::{LedgerError, LedgerEvent};
use crate::ports::{EventPublisher, LedgerStore};

/// Command to open a proposal for a prospective tier.
#[derive(Debug, Clone)]
pub struct ProposeCommand {
    pub caller: PrincipalId,
    pub name: String,
    pub price: Amount,
    /// Seed vote count, stored verbatim.
    pub vote_count: u32,
    /// Seed approval flag, stored verbatim.
    pub approved: bool,
}

/// Result of a successful proposal listing.
#[derive(Debug, Clone)]
pub struct ProposeResult {
    pub proposal_id: ProposalId,
    pub event: LedgerEvent,
}

/// Handler for opening proposals. Owner-only.
///
/// The seed `vote_count` and `approved` values are recorded exactly as
/// given, so an owner can open a proposal that is already partway to
/// quorum, or already marked approved.
pub struct ProposeHandler {
    owner: PrincipalId,
    store: Arc<dyn LedgerStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ProposeHandler {
    pub fn new(
        owner: PrincipalId,
        store: Arc<dyn LedgerStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            owner,
            store,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: ProposeCommand) -> Result<ProposeResult, LedgerError> {
        // 1. Capability check: only the owner opens proposals
        if cmd.caller != self.owner {
            return Err(LedgerError::unauthorized(cmd.caller));
        }

        // 2. Load a snapshot and append the proposal
        let mut state = self.store.load().await?;
        let proposal_id = state.propose(cmd.name.clone(), cmd.price, cmd.vote_count, cmd.approved)?;

        // 3. Commit
        self.store.commit(state).await?;

        // 4. Publish the notification
        let event = LedgerEvent::ProposalListed {
            event_id: EventId::new(),
            proposal_id,
            proposer: cmd.caller,
            name: cmd.name,
            price: cmd.price,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(ProposeResult { proposal_id, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventPublisher;
    use crate::adapters::memory::InMemoryLedgerStore;

    fn owner() -> PrincipalId {
        PrincipalId::new("owner").unwrap()
    }

    fn command(caller: PrincipalId) -> ProposeCommand {
        ProposeCommand {
            caller,
            name: "Gold".to_string(),
            price: Amount::new(5),
            vote_count: 0,
            approved: false,
        }
    }

    #[tokio::test]
    async fn owner_opens_proposal_with_sequential_id() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = ProposeHandler::new(owner(), store.clone(), publisher);

        let first = handler.handle(command(owner())).await.unwrap();
        let second = handler.handle(command(owner())).await.unwrap();

        assert_eq!(first.proposal_id, ProposalId::new(0));
        assert_eq!(second.proposal_id, ProposalId::new(1));
        assert_eq!(store.snapshot().proposals().len(), 2);
    }

    #[tokio::test]
    async fn seed_values_are_stored_verbatim() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = ProposeHandler::new(owner(), store.clone(), publisher);

        let mut cmd = command(owner());
        cmd.vote_count = 7;
        cmd.approved = true;
        let result = handler.handle(cmd).await.unwrap();

        let state = store.snapshot();
        let proposal = state.proposal(result.proposal_id).unwrap();
        assert_eq!(proposal.vote_count, 7);
        assert!(proposal.status.is_approved());
    }

    #[tokio::test]
    async fn publishes_proposal_listed_event() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = ProposeHandler::new(owner(), store, publisher.clone());

        handler.handle(command(owner())).await.unwrap();

        assert_eq!(publisher.published_types(), vec!["proposal.listed.v1"]);
    }

    #[tokio::test]
    async fn non_owner_is_rejected() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = ProposeHandler::new(owner(), store.clone(), publisher.clone());

        let caller = PrincipalId::new("intruder").unwrap();
        let result = handler.handle(command(caller)).await;

        assert!(matches!(result, Err(LedgerError::Unauthorized(_))));
        assert!(store.snapshot().proposals().is_empty());
        assert!(publisher.published().is_empty());
    }
}
