//! Pulse CLI
//!
//! Resolves account balances and runs feedback prompt lifecycles from the
//! command line. Logs go to stderr; results are printed to stdout as JSON.

mod balance;
mod cli;
mod prompt;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use pulse_feedback_core::PromptConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::prompt::Action;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    pulse_utils::load_env();

    // Initialize tracing (to stderr, stdout is for results)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Balance { path, visible_only } => {
            let account = balance::read_account(path.as_deref())?;
            println!("{}", balance::render(&account, visible_only)?);
        }
        Command::Prompt {
            rating,
            dismiss,
            delay_ms,
            auto_hide_ms,
        } => {
            let mut config = PromptConfig::from_env().context("invalid feedback prompt configuration")?;
            if let Some(millis) = auto_hide_ms {
                config = config.with_auto_hide_ms(millis);
            }

            let action = match (rating, dismiss) {
                (Some(rating), _) => Action::Rate(rating),
                (None, true) => Action::Dismiss,
                (None, false) => Action::Wait,
            };

            let events = prompt::run(config, action, Duration::from_millis(delay_ms)).await?;
            for event in events {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }

    Ok(())
}
