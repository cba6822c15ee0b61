//! PurchaseHandler - Command handler for purchasing a membership.

use std::sync::Arc;

use crate::domain::foundation::{
    Amount, EventId, PrincipalId, SerializableDomainEvent, TierId, Timestamp,
};
use crate::domain::ledger::{LedgerError, LedgerEvent};
use crate::ports::{EventPublisher, LedgerStore, ValueTransfer};

/// Command to purchase a membership tier.
#[derive(Debug, Clone)]
pub struct PurchaseCommand {
    pub caller: PrincipalId,
    pub tier_id: TierId,
    /// Amount sent with the call; must exactly match the tier price.
    pub paid: Amount,
}

/// Result of a successful purchase.
#[derive(Debug, Clone)]
pub struct PurchaseResult {
    pub tier_id: TierId,
    /// Amount escrowed against the tier.
    pub escrowed: Amount,
    pub event: LedgerEvent,
}

/// Handler for membership purchases. Open to any principal without an
/// active membership.
pub struct PurchaseHandler {
    store: Arc<dyn LedgerStore>,
    transfer: Arc<dyn ValueTransfer>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl PurchaseHandler {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        transfer: Arc<dyn ValueTransfer>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            transfer,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: PurchaseCommand) -> Result<PurchaseResult, LedgerError> {
        // 1. Load a snapshot and apply the purchase transition
        //    (unknown-tier, exact-payment and already-member checks)
        let mut state = self.store.load().await?;
        let escrowed = state.purchase(cmd.caller.clone(), cmd.tier_id, cmd.paid)?;

        // 2. Collect the payment into custody. A collection failure
        //    aborts before commit, so the snapshot mutation is discarded.
        self.transfer
            .collect(&cmd.caller, cmd.paid)
            .await
            .map_err(|e| LedgerError::transfer_failed(e.to_string()))?;

        // 3. Commit
        self.store.commit(state).await?;

        // 4. Publish the notification
        let event = LedgerEvent::Purchased {
            event_id: EventId::new(),
            principal: cmd.caller,
            tier_id: cmd.tier_id,
            amount: cmd.paid,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(PurchaseResult {
            tier_id: cmd.tier_id,
            escrowed,
            event,
        })
    }
}
