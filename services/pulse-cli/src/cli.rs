//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pulse_types::Rating;

#[derive(Debug, Parser)]
#[command(name = "pulse")]
#[command(about = "Inspect account balances and exercise feedback prompts")]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve an account snapshot into its plan and display balance
    Balance {
        /// JSON account snapshot; reads stdin when omitted
        path: Option<PathBuf>,

        /// Print only the rows that would be shown
        #[arg(long)]
        visible_only: bool,
    },

    /// Run one feedback prompt lifecycle and print the host callbacks
    Prompt {
        /// Rating to submit once the prompt is visible
        #[arg(short, long, value_parser = parse_rating)]
        rating: Option<Rating>,

        /// Dismiss manually instead of rating or waiting for auto-hide
        #[arg(long, conflicts_with = "rating")]
        dismiss: bool,

        /// Wait this long after the prompt becomes visible before acting
        #[arg(long, default_value = "0")]
        delay_ms: u64,

        /// Override the auto-hide delay
        #[arg(long)]
        auto_hide_ms: Option<u64>,
    },
}

fn parse_rating(raw: &str) -> Result<Rating, String> {
    raw.parse().map_err(|err: pulse_types::RatingParseError| err.to_string())
}
