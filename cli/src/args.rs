//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for estate-os
#[derive(Parser, Debug)]
#[command(name = "estate-os")]
#[command(author, version, about = "AI agent teams for real-estate workflows")]
#[command(long_about = r#"
Estate OS routes requests to specialized agent teams. Each business module
(valuation, search, market analysis, investment, financing, legal) owns a
team of agents that collaborate sequentially, calling deterministic tools
along the way.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./estate.toml       Project-level config
3. ~/.config/estate-os/config.toml   Global config

Example:
  estate-os modules
  estate-os ask module4 "Is a 2M MAD flat renting at 10k/month a good deal?"
  estate-os ask module6 "Review this contract" --attach contract.txt
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List business modules and their availability
    Modules,

    /// List the tools each module's agents can call
    Tools,

    /// Send a request to a module's team
    Ask {
        /// Module id (e.g. module1, module4)
        module: String,

        /// The request to send to the team
        question: String,

        /// Attach a file to the request (can be specified multiple times)
        #[arg(long, value_name = "PATH")]
        attach: Vec<PathBuf>,
    },
}
