//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Generate API reference docs for a tree of Swift package repositories
#[derive(Parser, Debug)]
#[command(name = "apigen")]
#[command(about = "Generate API reference docs for a tree of Swift package repositories")]
#[command(version)]
pub struct Args {
    /// Directory containing the repository checkouts
    #[arg(long)]
    pub root: PathBuf,

    /// Tera template to render instead of emitting JSON
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Config file path (defaults to ./apigen.toml when present)
    #[arg(short, long, env = "APIGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
