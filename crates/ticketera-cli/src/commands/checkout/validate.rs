//! Validate checkout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::{output, session};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Reservation id (defaults to the current reservation)
    #[arg(long)]
    pub reservation: Option<String>,
}

pub async fn run(args: ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;
    let reservation_id = super::reservation_id(&gateway, args.reservation).await?;

    let result = gateway
        .checkout()
        .validate(&reservation_id)
        .await
        .context("Failed to validate reservation")?;

    if global.json {
        return output::json_pretty(&result);
    }

    if result.valid {
        output::success("La reserva está lista para pagar");
        return Ok(());
    }

    output::warning("La reserva no se puede pagar:");
    for issue in &result.errors {
        if issue.field.is_empty() {
            output::hint(&issue.message);
        } else {
            output::hint(&format!("{}: {}", issue.field, issue.message));
        }
    }
    anyhow::bail!("Reservation {} failed validation", reservation_id)
}
