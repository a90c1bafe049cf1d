/// CLI argument parsing

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

// Build timestamp injected at compile time
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

#[derive(Parser, Debug)]
#[command(name = "simlab-dash")]
#[command(author, version = VERSION_WITH_BUILD, about, long_about = None)]
pub struct Cli {
    /// Base URL of the simulation service (overrides env and config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Forward dashboard actions to the service and poll it for metrics and logs
    #[arg(long)]
    pub live: bool,

    /// Refresh interval for live mode (e.g. "2s", "500ms")
    #[arg(long)]
    pub refresh: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the simulation
    Start,

    /// Stop the simulation
    Stop,

    /// Show current system metrics
    Metrics {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Ask the service to generate a report
    Report {
        /// Also write the report JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show service log lines
    Logs {
        /// Number of lines to show (default: all)
        #[arg(short = 'n', long)]
        tail: Option<usize>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// View configuration and the resolved service URL
    View,

    /// Print the config file path
    Path,

    /// Set the service base URL
    SetUrl { url: String },

    /// Set the live refresh interval
    SetRefresh { interval: String },

    /// Enable or disable live mode by default
    SetLive { enabled: String },
}
