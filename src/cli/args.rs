//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::config::StrategyKind;
use crate::infrastructure::OutputFormat;

/// Month-by-month simulation of recruiting networks
#[derive(Parser, Debug)]
#[command(name = "mlmsim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file (default: ./mlmsim.toml when present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the simulation (default when no command is given)
    Run(RunArgs),

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Overrides for a single run; unset flags keep the configured value.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Months to simulate (zero or negative reports the initial state only)
    #[arg(short, long, allow_negative_numbers = true)]
    pub months: Option<i64>,

    /// Direct recruits each marketer stops at
    #[arg(short = 't', long)]
    pub front_line_target: Option<usize>,

    /// Recruiting strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyKind>,

    /// Recruits per month for the batch strategy
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Chance of a recruit per month for the probabilistic strategy
    #[arg(long)]
    pub probability: Option<f64>,

    /// Seed for the probabilistic strategy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report rendering
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
