use crate::cli::{Commands, HELP_TEMPLATE};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    // Obtain during build time, not runtime
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
#[command(
    after_help = HELP_TEMPLATE.replace("%BINARY_NAME%", env!("CARGO_PKG_NAME"))
)]
pub struct Cli {
    /// The hash file holding the catalog.
    #[arg(
        value_name = "storage",
        help = "Path to the hash file. Use the `create` command to make a new one."
    )]
    pub storage: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}
