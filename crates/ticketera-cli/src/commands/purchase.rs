//! Purchase command implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use colored::Colorize;

use ticketera_core::types::{Purchase, PurchaseStatus};
use ticketera_http::api::{PollOutcome, PollPolicy};

use crate::cli::GlobalArgs;
use crate::{format, output, session};

#[derive(Args, Debug)]
pub struct PurchaseArgs {
    /// Purchase id
    pub purchase_id: String,

    /// Keep checking until the payment is confirmed
    #[arg(long)]
    pub wait: bool,

    /// Seconds between checks when waiting
    #[arg(long, default_value_t = 3)]
    pub interval_secs: u64,

    /// Give up after this many pending checks
    #[arg(long, default_value_t = 10)]
    pub max_attempts: u32,
}

pub async fn run(args: PurchaseArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;
    let purchases = gateway.purchases();

    if !args.wait {
        let purchase = purchases
            .get(&args.purchase_id)
            .await
            .context("Failed to load purchase")?;
        if global.json {
            return output::json_pretty(&purchase);
        }
        print_purchase(&purchase);
        return Ok(());
    }

    let policy = PollPolicy {
        interval: Duration::from_secs(args.interval_secs),
        max_attempts: args.max_attempts,
    };

    output::progress("Confirmando tu pago...");
    let outcome = purchases
        .wait_for_approval(&args.purchase_id, &policy)
        .await
        .context("Failed to check purchase status")?;

    match outcome {
        PollOutcome::Approved(purchase) => {
            if global.json {
                return output::json_pretty(&purchase);
            }
            output::success("¡Compra confirmada!");
            println!();
            print_purchase(&purchase);
            Ok(())
        }
        PollOutcome::Declined(purchase) => {
            if global.json {
                output::json_pretty(&purchase)?;
            } else {
                print_purchase(&purchase);
            }
            anyhow::bail!("Purchase {} was not approved", purchase.id)
        }
        PollOutcome::TimedOut { last, attempts } => {
            if global.json {
                output::json_pretty(&last)?;
            }
            output::warning(&format!(
                "El pago sigue pendiente después de {} intentos.",
                attempts
            ));
            output::hint(&format!(
                "Vuelve a consultar con `ticketera purchase {} --wait`.",
                last.id
            ));
            Ok(())
        }
    }
}

fn print_purchase(purchase: &Purchase) {
    output::heading(&purchase.event_title);
    output::field("Compra", &purchase.id);
    output::field("Estado", &status_label(purchase.status));
    output::field(
        "Evento",
        &format::date_time(&purchase.event_date.with_timezone(&Local)),
    );
    output::field("Total", &format::money(purchase.total_amount));
    if !purchase.payment_method.is_empty() {
        output::field("Medio de pago", &purchase.payment_method);
    }

    if purchase.tickets.is_empty() {
        return;
    }

    println!();
    output::heading("Entradas");
    for ticket in &purchase.tickets {
        let qr = ticket.qr_code.as_deref().unwrap_or("-");
        println!(
            "  {}  {}  {}  QR {}",
            ticket.id.dimmed(),
            ticket.zone_name,
            format::money(ticket.price),
            qr
        );
    }
}

fn status_label(status: PurchaseStatus) -> String {
    match status {
        PurchaseStatus::Approved | PurchaseStatus::Completed => "aprobada".green().to_string(),
        PurchaseStatus::Pending => "pendiente".yellow().to_string(),
        PurchaseStatus::Rejected => "rechazada".red().to_string(),
        PurchaseStatus::Failed => "fallida".red().to_string(),
        PurchaseStatus::Refunded => "reembolsada".dimmed().to_string(),
    }
}
