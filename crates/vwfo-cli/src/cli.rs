use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "VWFO CLI - Compute the Value Weighted Filtered Outdegree of a set of designs across scenario transitions.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute VWFO values for every design and write them to a CSV file.
    Analyze(AnalyzeArgs),
    /// Show the designs, scenarios and expected transition files of a design table.
    Inspect(InspectArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    // --- Inputs ---
    /// Path to the design table CSV (columns: design, scenario, sv).
    #[arg(short, long, value_name = "PATH")]
    pub designs: Option<PathBuf>,

    /// Transition matrix files or directories containing them.
    /// Files are matched to scenario pairs by name, e.g. `s1_s2.csv`.
    /// Defaults to the directory of the design table.
    #[arg(short, long, value_name = "PATH", num_args(1..))]
    pub transitions: Vec<PathBuf>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Output ---
    /// Path for the output CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print every computed value to standard output.
    #[arg(long)]
    pub print: bool,

    // --- Analysis Overrides ---
    /// Current scenario of a single pair to analyze (requires --following).
    #[arg(long, value_name = "SCENARIO", requires = "following")]
    pub current: Option<String>,

    /// Following scenario of a single pair to analyze (requires --current).
    #[arg(long, value_name = "SCENARIO", requires = "current")]
    pub following: Option<String>,

    /// Only report the given design. Can be used multiple times.
    #[arg(long = "design", value_name = "DESIGN")]
    pub selected_designs: Vec<String>,

    // --- Format Overrides ---
    /// Separator of the input CSV files (e.g. ',', ';', 'tab').
    #[arg(long, value_name = "SEP")]
    pub input_delimiter: Option<String>,

    /// Separator of the output CSV file (e.g. ',', ';', 'tab').
    #[arg(long, value_name = "SEP")]
    pub output_delimiter: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.delimiter=;
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Path to the design table CSV (columns: design, scenario, sv).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub designs: PathBuf,

    /// Separator of the design table (e.g. ',', ';', 'tab').
    #[arg(long, value_name = "SEP")]
    pub delimiter: Option<String>,
}
