//! Presentation-side contract for driving the teller from text input.
//!
//! A [`Session`] turns a command plus whatever the user typed as the amount into a call on the
//! [`Teller`], and renders the result as a status message. Malformed and non-positive amounts
//! stop here and never reach the account.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::amount::{self, Amount, ZERO};
use crate::teller::Teller;

pub const WELCOME: &str = "Welcome to the ATM!";
pub const INSUFFICIENT_FUNDS: &str = "Insufficient balance for withdrawal.";
pub const INVALID_NUMBER: &str = "Please enter a valid number.";
pub const NOT_POSITIVE: &str = "Please enter a positive amount.";
pub const BALANCE_LIMIT: &str = "Deposit would exceed the maximum balance.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Deposit,
    #[serde(alias = "withdrawal")]
    Withdraw,
    #[serde(alias = "balance")]
    CheckBalance,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command {0:?}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" | "d" => { Ok(Command::Deposit) }
            "withdraw" | "withdrawal" | "w" => { Ok(Command::Withdraw) }
            "balance" | "check_balance" | "b" => { Ok(Command::CheckBalance) }
            _ => { Err(UnknownCommand(s.to_string())) }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error(transparent)]
    Malformed(#[from] amount::Error),
    #[error("amount {0} is not positive")]
    NotPositive(Amount),
    #[error("depositing {0} would overflow the balance")]
    BalanceLimit(Amount),
}

impl InputError {
    /// The text shown to the user for this rejection.
    pub fn message(&self) -> &'static str {
        match self {
            InputError::Malformed(_) => { INVALID_NUMBER }
            InputError::NotPositive(_) => { NOT_POSITIVE }
            InputError::BalanceLimit(_) => { BALANCE_LIMIT }
        }
    }
}

pub fn parse_amount(text: &str) -> Result<Amount, InputError> {
    let amount: Amount = text.parse()?;
    if amount <= *ZERO {
        return Err(InputError::NotPositive(amount));
    }
    Ok(amount)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Deposited,
    Withdrew,
    Declined,
    Balance,
    Rejected,
}

/// What the front-end should display after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub outcome: Outcome,
    pub message: String,
    /// balance after the command was handled
    pub balance: Amount,
}

#[derive(Debug)]
pub struct Session {
    teller: Teller,
    currency: String,
}

impl Session {
    pub fn new(teller: Teller, currency: impl Into<String>) -> Session {
        Session { teller, currency: currency.into() }
    }

    pub fn welcome(&self) -> &'static str {
        WELCOME
    }

    pub fn balance(&self) -> Amount {
        self.teller.check_balance()
    }

    pub fn balance_line(&self) -> String {
        format!("Balance: {}{}", self.currency, self.balance())
    }

    pub fn handle(&mut self, command: Command, amount_text: &str) -> Response {
        let (outcome, message) = match command {
            Command::CheckBalance => {
                (Outcome::Balance, format!("Your current balance is: {}{}", self.currency, self.balance()))
            }
            Command::Deposit => match parse_amount(amount_text) {
                Err(error) => { reject(command, error) }
                Ok(amount) if self.balance().checked_add(amount).is_none() => {
                    reject(command, InputError::BalanceLimit(amount))
                }
                Ok(amount) => {
                    self.teller.deposit(amount);
                    info!(%amount, balance = %self.balance(), "deposited");
                    (Outcome::Deposited, format!("Deposited: {}{}", self.currency, amount))
                }
            },
            Command::Withdraw => match parse_amount(amount_text) {
                Err(error) => { reject(command, error) }
                Ok(amount) => {
                    if self.teller.withdraw(amount) {
                        info!(%amount, balance = %self.balance(), "withdrew");
                        (Outcome::Withdrew, format!("Withdrew: {}{}", self.currency, amount))
                    } else {
                        info!(%amount, balance = %self.balance(), "withdrawal declined");
                        (Outcome::Declined, INSUFFICIENT_FUNDS.to_string())
                    }
                }
            },
        };

        Response { outcome, message, balance: self.balance() }
    }
}

fn reject(command: Command, error: InputError) -> (Outcome, String) {
    debug!(?command, %error, "amount rejected");
    (Outcome::Rejected, error.message().to_string())
}
