//! CLI argument definitions using clap
//!
//! Commands:
//! - product-inventory init --config <path>
//! - product-inventory serve [--config <path>] [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "./product-inventory.json";

/// Product inventory service
#[derive(Parser, Debug)]
#[command(name = "product-inventory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file and create the data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file; when omitted, the default path is
        /// used if it exists and built-in defaults otherwise
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
