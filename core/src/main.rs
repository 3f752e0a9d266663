use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tax_client::{logging, ClientConfig, ReqwestTransport, TaxCalculationRequest, TaxServiceClient};

/// Query the tax backend and print the response as JSON.
///
/// Responses are decoded and re-encoded, so whole numbers the backend sent
/// as `80000` print as `80000.0`. Values are otherwise unchanged.
#[derive(Debug, Parser)]
#[command(name = "tax-client", version)]
struct Cli {
    /// Backend base URL. Overrides $TAX_API_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the tax years the backend supports.
    Years,
    /// Calculate tax for an income in a given year.
    Calculate {
        #[arg(long, allow_negative_numbers = true)]
        income: f64,
        #[arg(long)]
        year: String,
    },
    /// Show the bracket table for a tax year.
    Rates { year: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(logging::CLI_FILTER).context("failed to initialise logging")?;
    let cli = Cli::parse();

    let config = ClientConfig::resolve(cli.base_url, |key| std::env::var(key).ok())?;
    let client = TaxServiceClient::from_config(&config, ReqwestTransport::new());

    match cli.command {
        Command::Years => print_json(&client.get_available_tax_years().await?),
        Command::Calculate { income, year } => {
            let request = TaxCalculationRequest::new(income, year);
            print_json(&client.calculate_tax(&request).await?)
        }
        Command::Rates { year } => print_json(&client.get_tax_rates(&year).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
