//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use ticketera_core::Credentials;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "TICKETERA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;
    let credentials =
        Credentials::new(&args.email, args.password).context("Invalid credentials")?;

    output::progress("Iniciando sesión...");

    let response = gateway
        .auth()
        .login(&credentials)
        .await
        .context("Failed to log in")?;

    if global.json {
        return output::json_pretty(&response.user);
    }

    output::success("Sesión iniciada");
    println!();
    super::print_user(&response.user);

    Ok(())
}
