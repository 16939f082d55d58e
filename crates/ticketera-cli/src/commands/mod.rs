//! Subcommand implementations.

pub mod auth;
pub mod checkout;
pub mod events;
pub mod purchase;
pub mod reserve;

use anyhow::Result;

use crate::cli::{Commands, GlobalArgs};

pub async fn handle(command: Commands, global: &GlobalArgs) -> Result<()> {
    match command {
        Commands::Auth(cmd) => auth::handle(cmd, global).await,
        Commands::Events(cmd) => events::handle(cmd, global).await,
        Commands::Reserve(args) => reserve::run(args, global).await,
        Commands::Checkout(cmd) => checkout::handle(cmd, global).await,
        Commands::Purchase(args) => purchase::run(args, global).await,
    }
}
