//! Session subcommands.

mod google;
mod login;
mod logout;
mod refresh;
mod register;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use ticketera_core::types::User;

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in with email and password
    Login(login::LoginArgs),

    /// Create an account
    Register(register::RegisterArgs),

    /// Log in with a Google ID token
    Google(google::GoogleArgs),

    /// End the session
    Logout(logout::LogoutArgs),

    /// Show the logged-in user
    Whoami(whoami::WhoamiArgs),

    /// Renew the access token
    Refresh(refresh::RefreshArgs),
}

pub async fn handle(cmd: AuthCommand, global: &GlobalArgs) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, global).await,
        AuthSubcommand::Register(args) => register::run(args, global).await,
        AuthSubcommand::Google(args) => google::run(args, global).await,
        AuthSubcommand::Logout(args) => logout::run(args, global).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, global).await,
        AuthSubcommand::Refresh(args) => refresh::run(args, global).await,
    }
}

fn print_user(user: &User) {
    output::field("Nombre", &user.full_name());
    output::field("Email", &user.email);
    output::field("Rol", &format!("{:?}", user.role).to_lowercase());
    output::field("Inicio", user.role.home_path());
}
