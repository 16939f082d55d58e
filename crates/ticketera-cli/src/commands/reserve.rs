//! Reserve command implementation.

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Args;

use ticketera_core::types::CreateReservation;

use crate::cli::GlobalArgs;
use crate::{format, output, session};

#[derive(Args, Debug)]
pub struct ReserveArgs {
    /// Event id
    #[arg(long)]
    pub event: String,

    /// Zone id within the event
    #[arg(long)]
    pub zone: String,

    /// Number of tickets
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
}

pub async fn run(args: ReserveArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;

    let reservation = gateway
        .reservations()
        .create(&CreateReservation {
            event_id: args.event,
            zone_id: args.zone,
            quantity: args.quantity,
        })
        .await
        .context("Failed to reserve tickets")?;

    if global.json {
        return output::json_pretty(&reservation);
    }

    output::success("Entradas reservadas");
    println!();
    output::field("Reserva", &reservation.reservation_id);
    for tickets in &reservation.tickets {
        output::field(
            &tickets.zone_name,
            &format!(
                "{} x {} = {}",
                tickets.quantity,
                format::money(tickets.unit_price),
                format::money(tickets.subtotal())
            ),
        );
    }
    output::field("Total", &format::money(reservation.total_amount));

    let remaining = reservation.remaining_at(Utc::now()).num_seconds().max(0) as u64;
    output::field(
        "Expira",
        &format!(
            "{} (en {})",
            format::date_time(&reservation.expires_at.with_timezone(&Local)),
            format::duration(remaining)
        ),
    );
    println!();
    output::progress("Continúa con `ticketera checkout pay` antes de que expire.");

    Ok(())
}
