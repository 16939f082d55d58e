//! Availability command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::{output, session};

#[derive(Args, Debug)]
pub struct AvailabilityArgs {
    /// Event id
    pub event_id: String,
}

pub async fn run(args: AvailabilityArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;

    let availability = gateway
        .events()
        .availability(&args.event_id)
        .await
        .context("Failed to load availability")?;

    if global.json {
        return output::json_pretty(&availability);
    }

    output::field("Disponibles", &availability.available.to_string());
    output::field("Reservadas", &availability.reserved.to_string());
    output::field("Total", &availability.total.to_string());

    Ok(())
}
