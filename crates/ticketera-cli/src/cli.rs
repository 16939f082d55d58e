//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use ticketera_core::config::{
    DEFAULT_API_URL, DEFAULT_API_VERSION, ENV_API_URL, ENV_API_VERSION, ENV_TIMEOUT_SECS,
};

use crate::commands::auth::AuthCommand;
use crate::commands::checkout::CheckoutCommand;
use crate::commands::events::EventsCommand;
use crate::commands::{purchase, reserve};

/// Buy event tickets from the terminal.
#[derive(Parser, Debug)]
#[command(name = "ticketera")]
#[command(author, version = env!("TICKETERA_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// API server root
    #[arg(long, env = ENV_API_URL, default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// API version segment
    #[arg(long, env = ENV_API_VERSION, default_value = DEFAULT_API_VERSION, global = true)]
    pub api_version: String,

    /// Request timeout in seconds
    #[arg(long, env = ENV_TIMEOUT_SECS, global = true)]
    pub timeout_secs: Option<u64>,

    /// Session file (defaults to the platform data directory)
    #[arg(long, env = "TICKETERA_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, log out and inspect the session
    Auth(AuthCommand),

    /// Browse events
    Events(EventsCommand),

    /// Reserve tickets in a zone
    Reserve(reserve::ReserveArgs),

    /// Validate and pay for a reservation
    Checkout(CheckoutCommand),

    /// Check a purchase after payment
    Purchase(purchase::PurchaseArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_work_after_subcommands() {
        let cli = Cli::try_parse_from([
            "ticketera",
            "events",
            "list",
            "--api-url",
            "https://api.ticketera.cl",
            "--json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.global.api_url, "https://api.ticketera.cl");
        assert!(cli.global.json);
        assert_eq!(cli.verbose, 2);
    }
}
