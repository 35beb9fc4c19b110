//! CLI argument parsing for the helper consolidation task.
//!
//! The CLI is intentionally thin: it wires sources, a destination, and the
//! consolidation options without embedding policy, so the same core logic can
//! be reused elsewhere.
use clap::Parser;
use std::path::PathBuf;

/// Root CLI entrypoint for the consolidation task.
#[derive(Parser, Debug)]
#[command(
    name = "hfold",
    version,
    about = "Consolidate duplicated transpiler helper functions in bundled sources",
    after_help = "Examples:\n  hfold dist/bundle.js\n  hfold dist/a.js dist/b.js --out dist/bundle.js\n  hfold 'dist/*.js' --out dist/bundle.js --helpers classCallCheck,inherits\n  hfold --config hfold.json --verbose",
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Source files or glob patterns, concatenated in the order given
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Destination file; defaults to the source when exactly one is given
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// JSON task configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Helper function names to consolidate (comma-separated); defaults to
    /// the built-in transpiler helper list
    #[arg(long, value_name = "NAME,...", value_delimiter = ',')]
    pub helpers: Vec<String>,

    /// Regex locating the injection marker in the concatenated source
    #[arg(long, value_name = "REGEX")]
    pub marker: Option<String>,

    /// Injection mode: before, after, replace, or a numeric character offset
    #[arg(long, value_name = "MODE|OFFSET", allow_hyphen_values = true)]
    pub index: Option<String>,

    /// Prefix the transpiler prepends to helper names; an empty string
    /// disables prefix matching and stripping
    #[arg(long, value_name = "STRING")]
    pub prefix: Option<String>,

    /// Emit debug-level diagnostics
    #[arg(long)]
    pub verbose: bool,
}
