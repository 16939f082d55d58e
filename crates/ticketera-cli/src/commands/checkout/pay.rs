//! Pay command implementation.

use anyhow::{Context, Result};
use clap::Args;

use ticketera_http::api::CheckoutFailure;

use crate::cli::GlobalArgs;
use crate::{output, session};

#[derive(Args, Debug)]
pub struct PayArgs {
    /// Reservation id (defaults to the current reservation)
    #[arg(long)]
    pub reservation: Option<String>,

    /// Payment provider
    #[arg(long, default_value = ticketera_core::types::DEFAULT_PAYMENT_METHOD)]
    pub method: String,
}

pub async fn run(args: PayArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;
    let reservation_id = super::reservation_id(&gateway, args.reservation).await?;

    output::progress("Procesando pago...");

    let redirect = match gateway
        .checkout()
        .process(&reservation_id, Some(&args.method))
        .await
    {
        Ok(redirect) => redirect,
        Err(err) => {
            let failure = CheckoutFailure::classify(&err);
            if failure.releases_reservation() {
                gateway
                    .store()
                    .clear_current_reservation()
                    .await
                    .context("Failed to update session")?;
            }
            output::warning(failure.guidance());
            return Err(err).context("Checkout failed");
        }
    };

    if global.json {
        return output::json_pretty(&redirect);
    }

    output::success("Pago iniciado");
    output::field("Paga aquí", &redirect.redirect_url);
    println!();
    output::progress("Luego revisa el estado con `ticketera purchase <id> --wait`.");

    Ok(())
}
