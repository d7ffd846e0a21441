use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "recite")]
#[command(about = "Assemble passage sets that fit a recitation time budget")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without executing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log selection progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of ./recite.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick a passage set whose total words fit the target speaking rate
    Generate(GenerateArgs),

    /// Show pool sizes and word counts per division
    Stats(StatsArgs),

    /// Initialize a recite.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where to find pool files
#[derive(Args, Debug, Clone, Default)]
pub struct PoolArgs {
    /// Translation of the passages (e.g., nkjv, kjv)
    #[arg(short, long)]
    pub translation: Option<String>,

    /// Root directory holding `<year>/<division>-<translation>.json`
    #[arg(long, value_name = "DIR")]
    pub pool_dir: Option<PathBuf>,

    /// Competition year of the pool
    #[arg(long)]
    pub year: Option<u16>,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Division to draw from (senior, junior, primary)
    #[arg(short, long)]
    pub division: Option<String>,

    #[command(flatten)]
    pub pool: PoolArgs,

    /// Number of passages to pick
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Recitation time budget in minutes
    #[arg(long)]
    pub minutes: Option<f64>,

    /// Target speaking rate in words per minute
    #[arg(long)]
    pub rate: Option<f64>,

    /// Accepted deviation from the target rate, in words per minute
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Skip passages longer than this many words
    #[arg(long, conflicts_with = "no_word_limit")]
    pub word_limit: Option<u32>,

    /// Ignore the division's word limit
    #[arg(long)]
    pub no_word_limit: bool,

    /// Random draws to try before giving up
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Seed for a reproducible selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Drop (N) verse markers from passage text
    #[arg(long, conflicts_with = "hide_text")]
    pub hide_verse_numbers: bool,

    /// Print card headers only
    #[arg(long)]
    pub hide_text: bool,

    /// Emit the selection as JSON (single line)
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Divisions to inspect; defaults to every configured division
    pub divisions: Vec<String>,

    #[command(flatten)]
    pub pool: PoolArgs,

    /// Emit JSON output (single line)
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
