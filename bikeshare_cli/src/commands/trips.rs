//! The `trips` subcommand: the full export run.

use std::path::PathBuf;

use anyhow::Result;
use bikeshare_lib::Exporter;
use clap::Args;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct TripsArgs {
    /// Fetch only the most recent trips page
    #[arg(long)]
    pub recent: bool,

    /// Extract bike-angels statistics and write the hydrated report
    #[arg(long)]
    pub extended: bool,

    /// Write cb_* artifacts into this directory
    #[arg(long, value_name = "DIR")]
    pub keep: Option<PathBuf>,

    /// Load stations from a cached feed file instead of the network
    #[arg(long, value_name = "FILE")]
    pub stations_file: Option<PathBuf>,

    /// File with one pre-authenticated cookie per line (name=value)
    #[arg(long, value_name = "FILE")]
    pub cookies: Option<PathBuf>,
}

pub async fn run(args: &TripsArgs, format: &OutputFormat) -> Result<()> {
    let mut config = super::export_config(args.cookies.as_ref(), args.keep.as_ref(), true)?;
    config.recent_only = args.recent;
    config.extended = args.extended;
    config.stations_file = args.stations_file.clone();

    let exporter = Exporter::new(config)?;
    let export = exporter.export_trips().await?;
    output::print_trips(&export, format)
}
