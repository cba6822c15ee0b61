//! Command handlers for the ledger's operation surface.
//!
//! Seven operations, three trust levels:
//! - owner-restricted: `list_tier`, `propose`, `withdraw`
//! - open to eligible principals: `purchase`, `cancel`, `vote`
//! - open to anyone: `approve` (quorum is the gate, not identity)
//!
//! Every handler follows the same shape: capability check, load a state
//! snapshot, apply one transition, perform external transfers, commit,
//! publish the event. A failure before commit leaves the durable state
//! untouched.

mod approve;
mod cancel;
mod list_tier;
mod propose;
mod purchase;
mod vote;
mod withdraw;

pub use approve::{ApproveCommand, ApproveHandler, ApproveResult};
pub use cancel::{CancelCommand, CancelHandler, CancelResult};
pub use list_tier::{ListTierCommand, ListTierHandler, ListTierResult};
pub use propose::{ProposeCommand, ProposeHandler, ProposeResult};
pub use purchase::{PurchaseCommand, PurchaseHandler, PurchaseResult};
pub use vote::{VoteCommand, VoteHandler, VoteResult};
pub use withdraw::{WithdrawCommand, WithdrawHandler, WithdrawResult};
