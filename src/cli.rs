//! CLI definitions for SmartLocate.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SmartLocate CLI.
#[derive(Parser, Debug)]
#[command(name = "smartlocate")]
#[command(about = "Vision-assisted element locator for browser automation")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "smartlocate.toml", global = true)]
    pub config: PathBuf,

    /// Browser remote debugging endpoint (overrides the config file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Open the review page and wait for a human when the model is unsure
    #[arg(long, global = true)]
    pub interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Locate an element by its description
    Find {
        /// Element name as registered with the service
        name: String,

        /// Give up waiting for a review after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Query a CSS selector, falling back to the screenshot when it misses
    Query {
        /// CSS selector
        selector: String,

        /// Element name (default: the selector with a `wdio_by_selector_` prefix)
        #[arg(long)]
        name: Option<String>,
    },

    /// Print the effective configuration and validation findings
    Config,
}
