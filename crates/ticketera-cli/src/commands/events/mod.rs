//! Event browsing subcommands.

mod availability;
mod list;
mod show;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::GlobalArgs;

#[derive(Args, Debug)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub command: EventsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EventsSubcommand {
    /// List upcoming events
    List(list::ListArgs),

    /// Show an event with its zones and prices
    Show(show::ShowArgs),

    /// Show live ticket counts for an event
    Availability(availability::AvailabilityArgs),
}

pub async fn handle(cmd: EventsCommand, global: &GlobalArgs) -> Result<()> {
    match cmd.command {
        EventsSubcommand::List(args) => list::run(args, global).await,
        EventsSubcommand::Show(args) => show::run(args, global).await,
        EventsSubcommand::Availability(args) => availability::run(args, global).await,
    }
}
