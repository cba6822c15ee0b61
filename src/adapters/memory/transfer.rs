//! In-memory implementation of the value-transfer channel.

use crate::domain::foundation::{Amount, PrincipalId};
use crate::ports::{TransferError, ValueTransfer};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::debug;

struct Accounts {
    balances: BTreeMap<PrincipalId, u64>,
    custody: u64,
}

/// In-process value channel with per-principal accounts and one custody
/// account.
///
/// Lets tests observe the external balance effects of purchase, cancel
/// and withdraw end to end (refund exactness in particular). Outbound
/// transfers can be forced to fail to exercise the refund-failure path.
pub struct InMemoryValueTransfer {
    accounts: Mutex<Accounts>,
    fail_outbound: bool,
}

impl Default for InMemoryValueTransfer {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryValueTransfer {
    /// Creates a channel with empty accounts.
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Accounts {
                balances: BTreeMap::new(),
                custody: 0,
            }),
            fail_outbound: false,
        }
    }

    /// Creates a channel whose outbound transfers always fail.
    pub fn failing_outbound() -> Self {
        Self {
            accounts: Mutex::new(Accounts {
                balances: BTreeMap::new(),
                custody: 0,
            }),
            fail_outbound: true,
        }
    }

    /// Credits a principal's account (test fixture funding).
    pub fn fund(&self, principal: &PrincipalId, amount: Amount) {
        let mut accounts = self.accounts.lock().unwrap();
        *accounts.balances.entry(principal.clone()).or_insert(0) += amount.units();
    }

    /// Current balance of a principal's account.
    pub fn balance_of(&self, principal: &PrincipalId) -> Amount {
        let accounts = self.accounts.lock().unwrap();
        Amount::new(accounts.balances.get(principal).copied().unwrap_or(0))
    }
}

#[async_trait]
impl ValueTransfer for InMemoryValueTransfer {
    async fn collect(&self, from: &PrincipalId, amount: Amount) -> Result<(), TransferError> {
        let mut accounts = self.accounts.lock().unwrap();
        let balance = accounts.balances.entry(from.clone()).or_insert(0);
        if *balance < amount.units() {
            return Err(TransferError::insufficient_funds(format!(
                "{} holds {}, needs {}",
                from, balance, amount
            )));
        }
        *balance -= amount.units();
        accounts.custody += amount.units();
        debug!(principal = %from, %amount, "collected payment into custody");
        Ok(())
    }

    async fn transfer(&self, to: &PrincipalId, amount: Amount) -> Result<(), TransferError> {
        if self.fail_outbound {
            return Err(TransferError::channel("Simulated outbound failure"));
        }
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.custody < amount.units() {
            return Err(TransferError::insufficient_funds(format!(
                "custody holds {}, needs {}",
                accounts.custody, amount
            )));
        }
        accounts.custody -= amount.units();
        *accounts.balances.entry(to.clone()).or_insert(0) += amount.units();
        debug!(principal = %to, %amount, "paid out of custody");
        Ok(())
    }

    async fn custody_balance(&self) -> Result<Amount, TransferError> {
        Ok(Amount::new(self.accounts.lock().unwrap().custody))
    }
}
