//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Handler splitter - extract inline handlers into one file per handler
///
/// Scans the primary document for `case '<name>': { ... }` arms and the
/// secondary documents for `{ name: '<name>', handler: ... => { ... } }`
/// entries, then writes each handler to `<out>/tools/<category>/<name>.<ext>`.
/// Existing files are never overwritten.
///
/// Examples:
///   splitter                                   # src/index.ts + src/additional-tools.ts
///   splitter -p server.ts -s extra.ts -o gen   # custom inputs and output root
///   splitter --config splitter.toml --dry-run  # preview a configured run
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "splitter")]
#[command(author, version, verbatim_doc_comment)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (TOML, JSON or YAML)
    #[arg(short, long, env = "SPLITTER_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Primary document; replaces the path of the first configured document
    #[arg(short, long, value_name = "FILE")]
    pub primary: Option<String>,

    /// Secondary table-entry document; repeat to process several in order
    #[arg(short, long = "secondary", value_name = "FILE")]
    pub secondaries: Vec<String>,

    /// Output root the tools/ tree is created under
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<String>,

    /// Handler name prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Use the single-nesting termination rule of earlier releases
    #[arg(long)]
    pub legacy_nesting: bool,

    /// Report what would be extracted without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub dump_config: Option<PathBuf>,
}
