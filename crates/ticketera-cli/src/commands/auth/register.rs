//! Register command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use ticketera_core::types::{Country, DocumentType, RegisterRequest};

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "TICKETERA_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Phone number, e.g. +56912345678
    #[arg(long)]
    pub phone: String,

    /// RUT, DNI or PASSPORT
    #[arg(long)]
    pub document_type: DocumentType,

    #[arg(long)]
    pub document_number: String,

    /// CL or AR
    #[arg(long)]
    pub country: Country,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub date_of_birth: NaiveDate,
}

pub async fn run(args: RegisterArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;

    let request = RegisterRequest {
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
        phone: args.phone,
        document_type: args.document_type,
        document_number: args.document_number,
        country: args.country,
        date_of_birth: args.date_of_birth,
    };

    let response = gateway
        .auth()
        .register(&request)
        .await
        .context("Failed to create account")?;

    if global.json {
        return output::json_pretty(&response.user);
    }

    output::success("Cuenta creada");
    println!();
    super::print_user(&response.user);

    Ok(())
}
