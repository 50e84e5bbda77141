mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Export your bikeshare trip history and account statistics")]
struct Cli {
    /// Output format: summary or json
    #[arg(long, default_value = "summary", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the trip history, optionally hydrated with station data
    Trips(commands::trips::TripsArgs),
    /// Export the account profile and statistics
    Account(commands::account::AccountArgs),
    /// Fetch the public station directory
    Stations(commands::stations::StationsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bikeshare_portal=info".parse().unwrap())
                .add_directive("bikeshare_lib=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Summary,
    };

    match &cli.command {
        Commands::Trips(args) => commands::trips::run(args, &format).await?,
        Commands::Account(args) => commands::account::run(args, &format).await?,
        Commands::Stations(args) => commands::stations::run(args, &format).await?,
    }

    Ok(())
}
