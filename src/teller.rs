use tracing::trace;

use crate::account::Account;
use crate::amount::Amount;

/// Front-end facing façade over the account.
///
/// Amounts passed in must already be positive; rejecting anything else is the caller's job.
#[derive(Debug)]
pub struct Teller {
    account: Account,
}

impl Teller {
    pub fn new(account: Account) -> Teller {
        Teller { account }
    }

    pub fn withdraw(&mut self, amount: Amount) -> bool {
        let applied = self.account.withdraw(amount);
        trace!(%amount, applied, "withdraw");
        applied
    }

    pub fn deposit(&mut self, amount: Amount) {
        self.account.deposit(amount);
        trace!(%amount, "deposit");
    }

    pub fn check_balance(&self) -> Amount {
        self.account.balance()
    }
}
