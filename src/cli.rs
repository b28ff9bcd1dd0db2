use clap::Parser;
use std::path::PathBuf;

use crate::modes::Mode;
use crate::outputs::OutputMode;

#[derive(Debug, Parser)]
#[command(name = "docs-parser", version, about = "Python documentation parser")]
pub struct Cli {
    /// Parser mode
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the response cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Additional output modes
    #[arg(short, long, value_enum)]
    pub output: Option<OutputMode>,

    /// Settings file (defaults to parser.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
