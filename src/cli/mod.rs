//! CLI module for apigen

mod args;

pub use args::Args;

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::driver::Driver;
use crate::error::Result;
use crate::output;
use std::path::Path;
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Collect, render and write documentation for the given arguments
pub fn execute(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    config.validate()?;

    if args.verbose {
        eprintln!("Sources root: {}", args.root.display());
        eprintln!("Repositories configured: {}", config.repositories.len());
        if let Some(template) = &args.template {
            eprintln!("Template: {}", template.display());
        }
    }

    let context = Driver::new(config)
        .with_verbose(args.verbose)
        .run(&args.root)?;

    let text = output::render(&context, args.template.as_deref())?;
    output::write_output(&text, args.dest.as_deref())?;

    if args.verbose {
        match &args.dest {
            Some(dest) => eprintln!("Documentation written to: {}", dest.display()),
            None => eprintln!("Documented {} projects", context.projects.len()),
        }
    }

    Ok(())
}
