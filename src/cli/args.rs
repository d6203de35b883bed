//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Default fact base read when no input is given
pub const DEFAULT_INPUT: &str = "siconos-srcml.xml.bz2";

/// Convert a srcML fact base into a FAMIX model in MSE format
#[derive(Parser, Debug)]
#[command(name = "srcml-to-mse")]
#[command(about = "Convert a srcML fact base into a FAMIX model in MSE format")]
#[command(version)]
pub struct Args {
    /// srcML archive to convert (.xml, .xml.bz2 or .xml.gz)
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Package name for the whole model (default: Siconos)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Output file (default: derived from the input name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Remove "'" from names instead of failing
    #[arg(long)]
    pub strip_quotes: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
