//! CancelHandler - Command handler for cancelling a membership.

use std::sync::Arc;

use crate::domain::foundation::{
    Amount, EventId, PrincipalId, SerializableDomainEvent, TierId, Timestamp,
};
use crate::domain::ledger::{LedgerError, LedgerEvent};
use crate::ports::{EventPublisher, LedgerStore, ValueTransfer};
use tracing::warn;

/// Command to cancel a membership and refund the escrowed deposit.
#[derive(Debug, Clone)]
pub struct CancelCommand {
    pub caller: PrincipalId,
    pub tier_id: TierId,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelResult {
    /// Deposit drained from escrow (zero if nothing was escrowed).
    pub refund: Amount,
    /// Whether the refund transfer went through. Revocation stands either way.
    pub refund_transferred: bool,
    pub event: LedgerEvent,
}

/// Handler for membership cancellation.
///
/// The refund transfer is attempted before the revocation is committed,
/// and a transfer failure does not abort the revocation: membership is
/// revoked even if the refund could not be paid out. This ordering is a
/// deliberate policy of the operation and must not be reordered.
pub struct CancelHandler {
    store: Arc<dyn LedgerStore>,
    transfer: Arc<dyn ValueTransfer>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelHandler {
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

    pub async fn handle(&self, cmd: CancelCommand) -> Result<CancelResult, LedgerError> {
        // 1. Load a snapshot and apply the cancellation
        //    (no-active-membership check, escrow drain, revocation)
        let mut state = self.store.load().await?;
        let refund = state.cancel(cmd.caller.clone(), cmd.tier_id)?;

        // 2. Attempt the refund before committing the revocation.
        //    Failure is logged, not propagated.
        let mut refund_transferred = false;
        if !refund.is_zero() {
            match self.transfer.transfer(&cmd.caller, refund).await {
                Ok(()) => refund_transferred = true,
                Err(e) => {
                    warn!(
                        principal = %cmd.caller,
                        tier_id = %cmd.tier_id,
                        %refund,
                        error = %e,
                        "refund transfer failed; membership revoked anyway"
                    );
                }
            }
        }

        // 3. Commit the revocation
        self.store.commit(state).await?;

        // 4. Publish the notification
        let event = LedgerEvent::Cancelled {
            event_id: EventId::new(),
            principal: cmd.caller,
            tier_id: cmd.tier_id,
            refund,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(CancelResult {
            refund,
            refund_transferred,
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventPublisher;
    use crate::adapters::memory::{InMemoryLedgerStore, InMemoryValueTransfer};
    use crate::domain::ledger::LedgerState;

    fn member() -> PrincipalId {
        PrincipalId::new("member-u").unwrap()
    }

    /// Store + channel as they look right after `member()` bought Silver
    /// for 2 out of an initial balance of 10.
    async fn purchased_fixture() -> (Arc<InMemoryLedgerStore>, Arc<InMemoryValueTransfer>) {
        let mut state = LedgerState::new();
        state.list_tier("Silver", Amount::new(2)).unwrap();
        state
            .purchase(member(), TierId::new(0), Amount::new(2))
            .unwrap();

        let channel = InMemoryValueTransfer::new();
        channel.fund(&member(), Amount::new(10));
        channel.collect(&member(), Amount::new(2)).await.unwrap();

        (
            Arc::new(InMemoryLedgerStore::with_state(state)),
            Arc::new(channel),
        )
    }

    fn command() -> CancelCommand {
        CancelCommand {
            caller: member(),
            tier_id: TierId::new(0),
        }
    }

    #[tokio::test]
    async fn cancel_refunds_exactly_and_revokes() {
        let (store, channel) = purchased_fixture().await;
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = CancelHandler::new(store.clone(), channel.clone(), publisher);

        let result = handler.handle(command()).await.unwrap();
        assert_eq!(result.refund, Amount::new(2));
        assert!(result.refund_transferred);

        // Net external balance change over purchase + cancel is zero.
        assert_eq!(channel.balance_of(&member()), Amount::new(10));
        let state = store.snapshot();
        assert!(!state.is_active_member(&member()));
        assert_eq!(state.escrow_deposit(TierId::new(0)), Amount::ZERO);
    }

    #[tokio::test]
    async fn publishes_cancelled_event() {
        let (store, channel) = purchased_fixture().await;
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = CancelHandler::new(store, channel, publisher.clone());

        handler.handle(command()).await.unwrap();

        assert_eq!(publisher.published_types(), vec!["membership.cancelled.v1"]);
    }

    #[tokio::test]
    async fn cancel_without_membership_fails_cleanly() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let channel = Arc::new(InMemoryValueTransfer::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = CancelHandler::new(store, channel, publisher.clone());

        let result = handler.handle(command()).await;

        assert!(matches!(result, Err(LedgerError::NoActiveMembership(_))));
        assert!(publisher.published().is_empty());
    }

    #[tokio::test]
    async fn refund_failure_still_revokes_membership() {
        let mut state = LedgerState::new();
        state.list_tier("Silver", Amount::new(2)).unwrap();
        state
            .purchase(member(), TierId::new(0), Amount::new(2))
            .unwrap();
        let store = Arc::new(InMemoryLedgerStore::with_state(state));
        let channel = Arc::new(InMemoryValueTransfer::failing_outbound());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = CancelHandler::new(store.clone(), channel, publisher.clone());

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result.refund, Amount::new(2));
        assert!(!result.refund_transferred);
        // Revocation committed and the event still went out.
        assert!(!store.snapshot().is_active_member(&member()));
        assert_eq!(publisher.published_types(), vec!["membership.cancelled.v1"]);
    }

    #[tokio::test]
    async fn cancel_with_empty_escrow_refunds_zero() {
        let mut state = LedgerState::new();
        state.list_tier("Silver", Amount::new(0)).unwrap();
        state
            .purchase(member(), TierId::new(0), Amount::ZERO)
            .unwrap();
        let store = Arc::new(InMemoryLedgerStore::with_state(state));
        let channel = Arc::new(InMemoryValueTransfer::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = CancelHandler::new(store.clone(), channel, publisher);

        let result = handler.handle(command()).await.unwrap();
        assert_eq!(result.refund, Amount::ZERO);
        assert!(!result.refund_transferred);
        assert!(!store.snapshot().is_active_member(&member()));
    }
}
