//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Show the cached user without asking the server
    #[arg(long)]
    pub offline: bool,
}

pub async fn run(args: WhoamiArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;

    let user = if args.offline {
        gateway
            .store()
            .user()
            .await
            .context("Failed to read session")?
    } else {
        gateway
            .auth()
            .restore()
            .await
            .context("Failed to load user")?
    };

    let user = user.context("No active session. Run 'ticketera auth login' first.")?;

    if global.json {
        return output::json_pretty(&user);
    }

    super::print_user(&user);
    Ok(())
}
