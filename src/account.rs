use crate::amount::Amount;

/// The single account behind the teller.
///
/// Holds the one balance and enforces that a withdrawal never takes it below zero.
/// Deposits are not validated here; callers only ever pass positive amounts.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Account {
    balance: Amount,
}

impl Account {
    pub fn new(initial_balance: Amount) -> Account {
        Account { balance: initial_balance }
    }

    pub fn balance(&self) -> Amount { self.balance }

    pub fn deposit(&mut self, amount: Amount) {
        self.balance = self.balance + amount;
    }

    /// Returns `false` and leaves the balance untouched if `amount` exceeds it.
    pub fn withdraw(&mut self, amount: Amount) -> bool {
        if amount > self.balance { return false; }
        self.balance = self.balance - amount;
        true
    }
}
