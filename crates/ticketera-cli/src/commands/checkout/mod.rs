//! Checkout subcommands.

mod pay;
mod validate;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use ticketera_http::Gateway;

use crate::cli::GlobalArgs;

#[derive(Args, Debug)]
pub struct CheckoutCommand {
    #[command(subcommand)]
    pub command: CheckoutSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CheckoutSubcommand {
    /// Check that a reservation can still be paid for
    Validate(validate::ValidateArgs),

    /// Start payment and print the payment link
    Pay(pay::PayArgs),
}

pub async fn handle(cmd: CheckoutCommand, global: &GlobalArgs) -> Result<()> {
    match cmd.command {
        CheckoutSubcommand::Validate(args) => validate::run(args, global).await,
        CheckoutSubcommand::Pay(args) => pay::run(args, global).await,
    }
}

/// Use the given reservation id, or the one remembered by `reserve`.
async fn reservation_id(gateway: &Gateway, explicit: Option<String>) -> Result<String> {
    if let Some(id) = explicit {
        return Ok(id);
    }

    let reservation = gateway
        .store()
        .current_reservation()
        .await
        .context("Failed to read session")?
        .context("No reservation in progress. Run 'ticketera reserve' or pass --reservation.")?;
    Ok(reservation.reservation_id)
}
