use std::fs::File;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atm_teller::account::Account;
use atm_teller::config::Config;
use atm_teller::error::Result;
use atm_teller::session::Session;
use atm_teller::teller::Teller;
use atm_teller::{console, script};

fn run(config: Config) -> Result<()> {
    let config = config.validate()?;
    let teller = Teller::new(Account::new(config.initial_balance));
    let mut session = Session::new(teller, config.currency);

    let balance = match config.script {
        Some(path) => {
            tracing::info!(script = %path.display(), "replaying script");
            let input = File::open(&path)?;
            match config.output {
                Some(output) => { script::replay(&mut session, input, File::create(output)?)? }
                None => { script::replay(&mut session, input, io::stdout().lock())? }
            }
        }
        None => {
            console::run(&mut session, io::stdin().lock(), io::stdout().lock())?
        }
    };

    tracing::info!(%balance, "session closed");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(Config::parse()) {
        Ok(()) => { ExitCode::SUCCESS }
        Err(error) => {
            tracing::error!(%error, "atm failed");
            ExitCode::FAILURE
        }
    }
}
