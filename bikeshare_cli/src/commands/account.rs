//! The `account` subcommand: profile extraction without pagination.

use std::path::PathBuf;

use anyhow::Result;
use bikeshare_lib::Exporter;
use clap::Args;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct AccountArgs {
    /// Extract bike-angels statistics too
    #[arg(long)]
    pub extended: bool,

    /// Write the account artifact into this directory
    #[arg(long, value_name = "DIR")]
    pub keep: Option<PathBuf>,

    /// File with one pre-authenticated cookie per line (name=value)
    #[arg(long, value_name = "FILE")]
    pub cookies: Option<PathBuf>,
}

pub async fn run(args: &AccountArgs, format: &OutputFormat) -> Result<()> {
    let mut config = super::export_config(args.cookies.as_ref(), args.keep.as_ref(), true)?;
    config.extended = args.extended;

    let exporter = Exporter::new(config)?;
    let account = exporter.export_account().await?;
    output::print_account(&account, format)
}
