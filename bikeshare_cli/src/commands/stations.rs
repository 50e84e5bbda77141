//! The `stations` subcommand: the public station directory, no login.

use std::path::PathBuf;

use anyhow::Result;
use bikeshare_lib::Exporter;
use clap::Args;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct StationsArgs {
    /// Write the stations artifact into this directory
    #[arg(long, value_name = "DIR")]
    pub keep: Option<PathBuf>,

    /// Load stations from a cached feed file instead of the network
    #[arg(long, value_name = "FILE")]
    pub stations_file: Option<PathBuf>,
}

pub async fn run(args: &StationsArgs, format: &OutputFormat) -> Result<()> {
    let mut config = super::export_config(None, args.keep.as_ref(), false)?;
    config.stations_file = args.stations_file.clone();

    let exporter = Exporter::new(config)?;
    let stations = exporter.export_stations().await?;
    output::print_stations(&stations, format)
}
