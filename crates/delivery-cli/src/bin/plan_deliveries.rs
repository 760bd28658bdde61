//! Plan one day of drone deliveries.
//!
//! Fetches the day's restaurants, orders, and zones from the REST service,
//! delivers as many valid orders as the move budget allows, and writes the
//! result files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use delivery_cli::{plan_day, write_reports, Config};
use delivery_client::RestClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Plan a day of drone deliveries
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Delivery date (YYYY-MM-DD)
    date: NaiveDate,

    /// REST service base URL
    #[arg(long)]
    url: Option<String>,

    /// Directory for the result files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Moves the drone may make over the day
    #[arg(long)]
    budget: Option<u32>,

    /// Node expansions before a single search gives up
    #[arg(long)]
    max_expansions: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("delivery_cli=info".parse()?)
                .add_directive("delivery_core=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(url) = args.url {
        config.rest_url = url;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(budget) = args.budget {
        config.move_budget = budget;
    }
    if let Some(max_expansions) = args.max_expansions {
        config.max_expansions = max_expansions;
    }

    tracing::info!(date = %args.date, url = %config.rest_url, "planning deliveries");

    let client = RestClient::new(&config.rest_url)?;
    let snapshot = client
        .snapshot(args.date)
        .await
        .with_context(|| format!("failed to fetch data for {}", args.date))?;

    let rules = config.flight_rules();
    let plan = plan_day(&snapshot, &rules)?;
    let paths = write_reports(&plan, &config.output_dir)?;

    tracing::info!(
        orders = plan.orders.len(),
        valid = plan.valid_count(),
        delivered = plan.delivered_count(),
        moves_remaining = plan.drone.moves_remaining(),
        final_position = ?plan.drone.position(),
        deliveries = %paths.deliveries.display(),
        "day planned"
    );

    Ok(())
}
