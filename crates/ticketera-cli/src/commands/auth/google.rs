//! Google login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct GoogleArgs {
    /// ID token issued by Google Sign-In
    #[arg(long, env = "TICKETERA_GOOGLE_ID_TOKEN", hide_env_values = true)]
    pub id_token: String,
}

pub async fn run(args: GoogleArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;

    let response = gateway
        .auth()
        .login_with_google(&args.id_token)
        .await
        .context("Failed to log in with Google")?;

    if global.json {
        return output::json_pretty(&response.user);
    }

    output::success("Sesión iniciada con Google");
    println!();
    super::print_user(&response.user);

    Ok(())
}
