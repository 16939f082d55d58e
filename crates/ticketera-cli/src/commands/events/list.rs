//! List events command implementation.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, ValueEnum};
use colored::Colorize;

use ticketera_core::types::{EventFilters, SortField, SortOrder};

use crate::cli::GlobalArgs;
use crate::{format, output, session};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Date,
    Price,
    Title,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortField::Date,
            SortArg::Price => SortField::Price,
            SortArg::Title => SortField::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only events in this city
    #[arg(long)]
    pub city: Option<String>,

    /// Earliest date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Minimum ticket price
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum ticket price
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,

    /// Events per page
    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
}

pub async fn run(args: ListArgs, global: &GlobalArgs) -> Result<()> {
    let gateway = session::connect(global)?;

    let filters = EventFilters {
        city: args.city,
        date_from: args.from,
        date_to: args.to,
        price_min: args.min_price,
        price_max: args.max_price,
        page: args.page,
        limit: args.limit,
        sort: args.sort.map(Into::into),
        order: args.order.map(Into::into),
    };

    let list = gateway
        .events()
        .list(&filters)
        .await
        .context("Failed to list events")?;

    if global.json {
        return output::json_pretty(&list);
    }

    if list.data.is_empty() {
        output::progress("No hay eventos para estos filtros.");
        return Ok(());
    }

    for event in &list.data {
        let status = if event.actions.is_available {
            format!("{} disponibles", event.available_tickets).green()
        } else {
            "agotado".red()
        };
        println!(
            "{}  {}  {}",
            event.id.dimmed(),
            event.title.bold(),
            status
        );
        println!(
            "    {} · {}, {} · desde {}",
            format::date_time(&event.start_date_time.with_timezone(&Local)),
            event.venue.name,
            event.venue.city,
            format::money(event.min_price)
        );
    }

    let page = &list.pagination;
    println!();
    output::progress(&format!(
        "Página {} de {} ({} eventos)",
        page.page, page.total_pages, page.total
    ));

    Ok(())
}
