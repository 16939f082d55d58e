//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(_args: RefreshArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;

    if gateway
        .store()
        .refresh_token()
        .await
        .context("Failed to read session")?
        .is_none()
    {
        anyhow::bail!("No active session. Run 'ticketera auth login' first.");
    }

    output::progress("Renovando sesión...");

    gateway
        .refresh_session()
        .await
        .context("Failed to refresh session")?;

    output::success("Sesión renovada");
    Ok(())
}
