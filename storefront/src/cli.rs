//! Command-line interface definitions for the server binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser};


/// Server command-line arguments.
#[derive(Parser)]
#[command(
    name = "storefront",
    author,
    about = "API server for a product catalog of categories and products.",
    version
)]
pub struct CLIArgs {
    /// Configuration file to load instead of `./data/configuration.toml`.
    #[arg(
        short = 'c',
        long = "configurationFilePath",
        help = "Path to the configuration file to use. Defaults to ./data/configuration.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(
        long = "apply-pending-migrations",
        action = ArgAction::SetTrue,
        help = "On startup, apply any pending database migrations."
    )]
    pub apply_pending_migrations: bool,

    #[arg(
        long = "seed-sample-data",
        action = ArgAction::SetTrue,
        help = "On startup, fill the catalog with sample categories and products."
    )]
    pub seed_sample_data: bool,
}
