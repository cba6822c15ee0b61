//! WithdrawHandler - Command handler for the owner's custody withdrawal.

use std::sync::Arc;

use crate::domain::foundation::{
    Amount, EventId, PrincipalId, SerializableDomainEvent, Timestamp,
};
use crate::domain::ledger::{LedgerError, LedgerEvent};
use crate::ports::{EventPublisher, ValueTransfer};

/// Command to withdraw the ledger's entire custody balance.
#[derive(Debug, Clone)]
pub struct WithdrawCommand {
    pub caller: PrincipalId,
}

/// Result of a successful withdrawal.
#[derive(Debug, Clone)]
pub struct WithdrawResult {
    /// Amount paid out to the owner.
    pub amount: Amount,
    pub event: LedgerEvent,
}

/// Handler for the owner withdrawal. Owner-only.
///
/// Drains the whole custody account, including deposits still escrowed
/// against active memberships. Escrow records are not adjusted, so later
/// cancels may find custody unable to cover their refund. The operation
/// has no ledger-state footprint at all; it touches only the value
/// channel.
pub struct WithdrawHandler {
    owner: PrincipalId,
    transfer: Arc<dyn ValueTransfer>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl WithdrawHandler {
    pub fn new(
        owner: PrincipalId,
        transfer: Arc<dyn ValueTransfer>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            owner,
            transfer,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: WithdrawCommand) -> Result<WithdrawResult, LedgerError> {
        // 1. Capability check: only the owner withdraws
        if cmd.caller != self.owner {
            return Err(LedgerError::unauthorized(cmd.caller));
        }

        // 2. Pay the whole custody balance to the owner. Unlike the cancel
        //    refund, a failure here is fatal: nothing was promised to
        //    anyone else yet.
        let amount = self
            .transfer
            .custody_balance()
            .await
            .map_err(|e| LedgerError::transfer_failed(e.to_string()))?;
        if !amount.is_zero() {
            self.transfer
                .transfer(&self.owner, amount)
                .await
                .map_err(|e| LedgerError::transfer_failed(e.to_string()))?;
        }

        // 3. Publish the notification
        let event = LedgerEvent::Withdrawn {
            event_id: EventId::new(),
            owner: self.owner.clone(),
            amount,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(WithdrawResult { amount, event })
    }
}
