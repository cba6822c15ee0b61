//! ListTierHandler - Command handler for listing a purchasable tier.

use std::sync::Arc;

use crate::domain::foundation::{
    Amount, EventId, PrincipalId, SerializableDomainEvent, TierId, Timestamp,
};
use crate::domain::ledger::{LedgerError, LedgerEvent};
use crate::ports::{EventPublisher, LedgerStore};

/// Command to list a new membership tier.
#[derive(Debug, Clone)]
pub struct ListTierCommand {
    pub caller: PrincipalId,
    pub name: String,
    pub price: Amount,
}

/// Result of a successful tier listing.
#[derive(Debug, Clone)]
pub struct ListTierResult {
    pub tier_id: TierId,
    pub event: LedgerEvent,
}

/// Handler for listing tiers. Owner-only.
pub struct ListTierHandler {
    owner: PrincipalId,
    store: Arc<dyn LedgerStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ListTierHandler {
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

    pub async fn handle(&self, cmd: ListTierCommand) -> Result<ListTierResult, LedgerError> {
        // 1. Capability check: only the owner curates the catalog
        if cmd.caller != self.owner {
            return Err(LedgerError::unauthorized(cmd.caller));
        }

        // 2. Load a snapshot and append the tier
        let mut state = self.store.load().await?;
        let tier_id = state.list_tier(cmd.name.clone(), cmd.price)?;

        // 3. Commit
        self.store.commit(state).await?;

        // 4. Publish the notification
        let event = LedgerEvent::TierListed {
            event_id: EventId::new(),
            tier_id,
            name: cmd.name,
            price: cmd.price,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(ListTierResult { tier_id, event })
    }
}
