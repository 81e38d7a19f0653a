use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gfwctl")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(
    about = "Declarative configuration for the GFW API - datasets, dataviews, workspaces and access control",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub provider: ProviderArgs,

    #[command(flatten)]
    pub files: FileArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings; unset values fall back to config.toml
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// API base URL
    #[arg(long, env = "GFW_URL", global = true)]
    pub url: Option<String>,

    /// API bearer token
    #[arg(long, env = "GFW_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// Manifest declaring the desired resources
    #[arg(short, long, default_value = "gfw.toml", global = true)]
    pub manifest: PathBuf,

    /// State file recording managed resources
    #[arg(short, long, default_value = "gfw.state.json", global = true)]
    pub state: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show what apply would change
    Plan(TargetArgs),

    /// Make the remote configuration match the manifest
    Apply(ApplyArgs),

    /// Delete every managed resource
    Destroy(DestroyArgs),

    /// Re-read every managed resource into state
    Refresh(RefreshArgs),

    /// Print recorded state
    Show(TargetArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Only this type (e.g. gfw_role) or resource (e.g. gfw_role.analyst)
    pub target: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ApplyArgs {
    /// Only this type (e.g. gfw_role) or resource (e.g. gfw_role.analyst)
    pub target: Option<String>,

    /// Dry run - show what would be done
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DestroyArgs {
    /// Only this type (e.g. gfw_role) or resource (e.g. gfw_role.analyst)
    pub target: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RefreshArgs {
    /// Only this type (e.g. gfw_role) or resource (e.g. gfw_role.analyst)
    pub target: Option<String>,

    /// Number of parallel reads
    #[arg(short, long, default_value = "4")]
    pub jobs: usize,
}
