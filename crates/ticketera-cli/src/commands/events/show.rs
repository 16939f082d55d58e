//! Show event command implementation.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use colored::Colorize;

use crate::cli::GlobalArgs;
use crate::{format, output, session};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Event id
    pub event_id: String,
}

pub async fn run(args: ShowArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;

    let event = gateway
        .events()
        .detail(&args.event_id)
        .await
        .context("Failed to load event")?;

    if global.json {
        return output::json_pretty(&event);
    }

    let starts = event.start_date_time.with_timezone(&Local);
    let ends = event.end_date_time.with_timezone(&Local);

    output::heading(&event.title);
    output::field("Fecha", &format::date(&starts));
    output::field(
        "Horario",
        &format!("{} - {}", format::date_time(&starts), format::date_time(&ends)),
    );
    output::field(
        "Lugar",
        &format!("{}, {}, {}", event.venue.name, event.venue.address, event.venue.city),
    );
    output::field("Productora", &event.producer.name);
    if let Some(age) = event.age_restriction {
        output::field("Edad mínima", &format!("{}+", age));
    }
    if event.refund_policy.allow_refunds {
        let until = event
            .refund_policy
            .refundable_until_hours
            .map(|h| format!(" hasta {}h antes", h))
            .unwrap_or_default();
        output::field("Reembolsos", &format!("sí{}", until));
    } else {
        output::field("Reembolsos", "no");
    }

    if !event.description.is_empty() {
        println!();
        println!("{}", event.description);
    }

    println!();
    output::heading("Zonas");
    for zone in event.sorted_zones() {
        let available = if zone.available > 0 {
            format!("{} disponibles", zone.available).green()
        } else {
            "agotada".red()
        };
        println!(
            "  {}  {}  {}  {}",
            zone.id.dimmed(),
            zone.name,
            format::money(zone.price),
            available
        );
    }

    if !event.actions.can_reserve {
        println!();
        output::warning("Este evento no acepta reservas en este momento.");
    }

    Ok(())
}
