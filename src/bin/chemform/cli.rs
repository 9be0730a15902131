use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "chemform",
    about = "Chemical formula and moiety parser",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse chemical formulas into elemental compositions
    #[command(visible_alias = "p")]
    Parse(ParseArgs),

    /// Parse moiety formulas into site occupancies
    #[command(visible_alias = "m")]
    Moiety(MoietyArgs),

    /// Check formulas against a set of accepted elements
    #[command(visible_alias = "c")]
    Check(CheckArgs),
}

impl Command {
    pub fn io(&self) -> &IoOptions {
        match self {
            Command::Parse(args) => &args.io,
            Command::Moiety(args) => &args.io,
            Command::Check(args) => &args.io,
        }
    }
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Formulas to process (read one per line from --input or stdin if omitted)
    #[arg(value_name = "FORMULA", allow_hyphen_values = true)]
    pub formulas: Vec<String>,

    /// Input file with one formula per line; blank lines and '#' comments are skipped
    #[arg(short, long, value_name = "FILE", conflicts_with = "formulas")]
    pub input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip formulas that fail to parse and report them at the end
    #[arg(short = 'k', long)]
    pub keep_going: bool,
}

/// Token length limits for the formula grammar.
#[derive(Args)]
#[command(next_help_heading = "Parser Limits")]
pub struct LimitOptions {
    /// Parser limits (TOML file with max_symbol_len, max_isotope_len, max_valence_len, max_depth)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ParseArgs {
    #[command(flatten)]
    pub io: IoOptions,

    #[command(flatten)]
    pub limits: LimitOptions,
}

#[derive(Args)]
pub struct MoietyArgs {
    #[command(flatten)]
    pub io: IoOptions,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub io: IoOptions,

    #[command(flatten)]
    pub limits: LimitOptions,

    #[command(flatten)]
    pub filter: FilterOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Element Filter")]
pub struct FilterOptions {
    /// Accepted element symbols (comma-separated, repeatable)
    #[arg(
        short,
        long,
        value_name = "SYMBOLS",
        value_delimiter = ',',
        required = true,
        action = clap::ArgAction::Append
    )]
    pub elements: Vec<String>,

    /// Also reject formulas carrying a nonzero net charge
    #[arg(long)]
    pub neutral_only: bool,

    /// Write every formula with its verdict instead of only the accepted ones
    #[arg(long)]
    pub verdict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// Tab-separated rows with a header line
    Tsv,
    /// JSON array of records
    Json,
}

pub fn parse() -> Cli {
    Cli::parse()
}
