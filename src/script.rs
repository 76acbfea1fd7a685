//! Batch front-end: replays a CSV of `action,amount` rows through a session.

use std::io::{Read, Write};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::amount::Amount;
use crate::error::Result;
use crate::session::{Command, Outcome, Session};

const RESULT_HEADER: [&str; 5] = ["action", "amount", "outcome", "balance", "message"];

#[derive(Debug, Deserialize)]
struct ScriptRow {
    action: Command,
    // kept as raw text, validation belongs to the session
    #[serde(default)]
    amount: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    action: Command,
    amount: &'a str,
    outcome: Outcome,
    balance: Amount,
    message: &'a str,
}

/// Writes one result row per input row and returns the final balance.
/// A row that does not deserialize aborts the replay.
pub fn replay<R: Read, W: Write>(session: &mut Session, input: R, output: W) -> Result<Amount> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);
    writer.write_record(RESULT_HEADER)?;

    let mut rows = 0usize;
    for result in reader.deserialize() {
        let row: ScriptRow = result?;
        let amount = row.amount.unwrap_or_default();
        let response = session.handle(row.action, &amount);
        writer.serialize(ResultRow {
            action: row.action,
            amount: &amount,
            outcome: response.outcome,
            balance: response.balance,
            message: &response.message,
        })?;
        rows += 1;
    }
    writer.flush()?;

    info!(rows, balance = %session.balance(), "script replayed");
    Ok(session.balance())
}
