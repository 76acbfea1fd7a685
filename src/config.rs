use std::path::PathBuf;

use clap::Parser;

use crate::amount::{Amount, ZERO};
use crate::error::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "atm", about = "A single-account automated teller.")]
pub struct Config {
    /// Balance the account opens with.
    #[arg(long = "initial-balance", env = "ATM_INITIAL_BALANCE", default_value = "10000", allow_hyphen_values = true)]
    pub initial_balance: Amount,

    /// Symbol printed in front of amounts.
    #[arg(long, default_value = "Rs")]
    pub currency: String,

    /// Replay a CSV of `action,amount` rows instead of reading commands interactively.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Where script results are written; stdout if omitted.
    #[arg(long, requires = "script")]
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn validate(self) -> Result<Self> {
        if self.initial_balance < *ZERO {
            return Err(Error::Config(format!("initial balance {} is negative", self.initial_balance)));
        }
        Ok(self)
    }
}
