mod auth;
mod cli;
mod config;
mod error;
mod logging;
mod output;
mod providers;
mod reliability;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Variables from .env must be visible before LOG_LEVEL and SENTRY_TOKEN are read
    dotenvy::dotenv().ok();
    logging::init()?;

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting sentry-reliability");
    cli.execute().await?;

    Ok(())
}
