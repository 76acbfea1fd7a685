//! A single-account automated teller.
//!
//! [`account::Account`] holds the balance and rejects overdrawing withdrawals, [`teller::Teller`]
//! is the façade front-ends call into, and [`session::Session`] adapts text input to it for the
//! [`console`] and [`script`] front-ends.

pub mod account;
pub mod amount;
pub mod config;
pub mod console;
pub mod error;
pub mod script;
pub mod session;
pub mod teller;
