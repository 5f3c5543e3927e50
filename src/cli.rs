use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gatesync")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Plan gateway consumer, credential and ACL changes from a declarative config", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the actions that would converge live state to the config
    Plan(PlanArgs),

    /// Validate the desired-state config without looking at live state
    Validate(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Shared Args
// ============================================================================

#[derive(Parser)]
pub struct ConfigArgs {
    /// Desired-state config (TOML or JSON)
    #[arg(short, long, env = "GATESYNC_CONFIG")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Plan
// ============================================================================

#[derive(Parser)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Captured live state (TOML or JSON); omit to plan against an empty gateway
    #[arg(short, long, env = "GATESYNC_STATE")]
    pub state: Option<PathBuf>,

    /// Only plan a target: consumers, credentials, acls, or <kind>.<consumer>
    #[arg(short, long)]
    pub target: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Exit with status 2 when the plan contains changes
    #[arg(long)]
    pub detailed_exitcode: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
