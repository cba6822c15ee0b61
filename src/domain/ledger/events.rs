//! Ledger domain events.
//!
//! One event per successful operation, broadcast on the best-effort
//! notification channel. Events are named in past tense: something that
//! has already been committed.

use crate::domain::foundation::{
    Amount, DomainEvent, EventId, PrincipalId, ProposalId, TierId, Timestamp,
};
use serde::{Deserialize, Serialize};

/// Events emitted by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A tier was listed in the catalog by the owner.
    TierListed {
        event_id: EventId,
        tier_id: TierId,
        name: String,
        price: Amount,
        occurred_at: Timestamp,
    },

    /// A principal purchased a membership; the payment is escrowed.
    Purchased {
        event_id: EventId,
        principal: PrincipalId,
        tier_id: TierId,
        amount: Amount,
        occurred_at: Timestamp,
    },

    /// A principal cancelled their membership; the escrowed deposit was
    /// refunded (refund may be zero if nothing was escrowed).
    Cancelled {
        event_id: EventId,
        principal: PrincipalId,
        tier_id: TierId,
        refund: Amount,
        occurred_at: Timestamp,
    },

    /// The owner listed a proposal for a candidate tier.
    ProposalListed {
        event_id: EventId,
        proposal_id: ProposalId,
        proposer: PrincipalId,
        name: String,
        price: Amount,
        occurred_at: Timestamp,
    },

    /// An eligible member voted on a proposal.
    Voted {
        event_id: EventId,
        proposal_id: ProposalId,
        voter: PrincipalId,
        vote_count: u32,
        occurred_at: Timestamp,
    },

    /// A proposal reached quorum and was approved; one credential was
    /// minted to every voter on the roll, in vote order.
    Approved {
        event_id: EventId,
        proposal_id: ProposalId,
        voters: Vec<PrincipalId>,
        occurred_at: Timestamp,
    },

    /// The owner withdrew the ledger's custody balance.
    Withdrawn {
        event_id: EventId,
        owner: PrincipalId,
        amount: Amount,
        occurred_at: Timestamp,
    },
}

impl DomainEvent for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::TierListed { .. } => "tier.listed.v1",
            LedgerEvent::Purchased { .. } => "membership.purchased.v1",
            LedgerEvent::Cancelled { .. } => "membership.cancelled.v1",
            LedgerEvent::ProposalListed { .. } => "proposal.listed.v1",
            LedgerEvent::Voted { .. } => "proposal.voted.v1",
            LedgerEvent::Approved { .. } => "proposal.approved.v1",
            LedgerEvent::Withdrawn { .. } => "treasury.withdrawn.v1",
        }
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> String {
        match self {
            LedgerEvent::TierListed { tier_id, .. } => tier_id.to_string(),
            LedgerEvent::Purchased { principal, .. }
            | LedgerEvent::Cancelled { principal, .. } => principal.to_string(),
            LedgerEvent::ProposalListed { proposal_id, .. }
            | LedgerEvent::Voted { proposal_id, .. }
            | LedgerEvent::Approved { proposal_id, .. } => proposal_id.to_string(),
            LedgerEvent::Withdrawn { .. } => "treasury".to_string(),
        }
    }

    fn aggregate_type(&self) -> &'static str {
        match self {
            LedgerEvent::TierListed { .. } => "Tier",
            LedgerEvent::Purchased { .. } | LedgerEvent::Cancelled { .. } => "Holding",
            LedgerEvent::ProposalListed { .. }
            | LedgerEvent::Voted { .. }
            | LedgerEvent::Approved { .. } => "Proposal",
            LedgerEvent::Withdrawn { .. } => "Treasury",
        }
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            LedgerEvent::TierListed { occurred_at, .. }
            | LedgerEvent::Purchased { occurred_at, .. }
            | LedgerEvent::Cancelled { occurred_at, .. }
            | LedgerEvent::ProposalListed { occurred_at, .. }
            | LedgerEvent::Voted { occurred_at, .. }
            | LedgerEvent::Approved { occurred_at, .. }
            | LedgerEvent::Withdrawn { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            LedgerEvent::TierListed { event_id, .. }
            | LedgerEvent::Purchased { event_id, .. }
            | LedgerEvent::Cancelled { event_id, .. }
            | LedgerEvent::ProposalListed { event_id, .. }
            | LedgerEvent::Voted { event_id, .. }
            | LedgerEvent::Approved { event_id, .. }
            | LedgerEvent::Withdrawn { event_id, .. } => event_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    fn principal(name: &str) -> PrincipalId {
        PrincipalId::new(name).unwrap()
    }

    #[test]
    fn event_types_are_versioned() {
        let event = LedgerEvent::TierListed {
            event_id: EventId::new(),
            tier_id: TierId::new(0),
            name: "Silver".to_string(),
            price: Amount::new(2),
            occurred_at: Timestamp::now(),
        };
        assert_eq!(event.event_type(), "tier.listed.v1");
        assert_eq!(event.schema_version(), 1);
    }

    #[test]
    fn purchase_aggregates_on_the_principal() {
        let event = LedgerEvent::Purchased {
            event_id: EventId::new(),
            principal: principal("u"),
            tier_id: TierId::new(0),
            amount: Amount::new(2),
            occurred_at: Timestamp::now(),
        };
        assert_eq!(event.aggregate_type(), "Holding");
        assert_eq!(event.aggregate_id(), "u");
    }

    #[test]
    fn governance_events_aggregate_on_the_proposal() {
        let event = LedgerEvent::Voted {
            event_id: EventId::new(),
            proposal_id: ProposalId::new(4),
            voter: principal("u"),
            vote_count: 1,
            occurred_at: Timestamp::now(),
        };
        assert_eq!(event.aggregate_type(), "Proposal");
        assert_eq!(event.aggregate_id(), "4");
    }

    #[test]
    fn envelope_carries_voter_roll_payload() {
        let event = LedgerEvent::Approved {
            event_id: EventId::new(),
            proposal_id: ProposalId::new(0),
            voters: vec![principal("u"), principal("m")],
            occurred_at: Timestamp::now(),
        };
        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "proposal.approved.v1");
        let voters = &envelope.payload["Approved"]["voters"];
        assert_eq!(voters[0], "u");
        assert_eq!(voters[1], "m");
    }
}
