//! Line-oriented interactive front-end.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::amount::Amount;
use crate::error::Result;
use crate::session::{Command, Session};

pub const USAGE: &str = "Commands: deposit <amount>, withdraw <amount>, balance, help, quit";

/// Reads `<command> [amount]` lines until `quit` or end of input, returning the final balance.
pub fn run<R: BufRead, W: Write>(session: &mut Session, mut input: R, mut output: W) -> Result<Amount> {
    writeln!(output, "{}", session.welcome())?;
    writeln!(output, "{}", session.balance_line())?;
    output.flush()?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // undecodable bytes become U+FFFD and fail amount parsing like any other bad text
        let line = String::from_utf8_lossy(&buf);
        let mut words = line.split_whitespace();
        let word = match words.next() {
            Some(word) => { word }
            None => { continue; }
        };
        let amount_text = words.collect::<Vec<_>>().join(" ");

        match word.to_ascii_lowercase().as_str() {
            "quit" | "exit" => { break; }
            "help" => {
                writeln!(output, "{}", USAGE)?;
            }
            _ => match word.parse::<Command>() {
                Err(error) => {
                    debug!(%error, "ignoring input line");
                    writeln!(output, "Unknown command: {}", word)?;
                    writeln!(output, "{}", USAGE)?;
                }
                Ok(command) => {
                    let response = session.handle(command, &amount_text);
                    writeln!(output, "{}", response.message)?;
                    writeln!(output, "{}", session.balance_line())?;
                }
            },
        }
        output.flush()?;
    }

    Ok(session.balance())
}
