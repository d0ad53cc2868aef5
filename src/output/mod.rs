// Output rendering: JSON or a user template, to a file or stdout

pub mod templates;

pub use templates::*;

use crate::decl::RenderContext;
use crate::error::Result;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Render the collected projects, through `template` when given, JSON otherwise
pub fn render(context: &RenderContext, template: Option<&Path>) -> Result<String> {
    match template {
        Some(path) => TemplateEngine::from_file(path)?.render(context),
        None => {
            let mut json = serde_json::to_string_pretty(context)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write rendered text to `dest`, truncating it, or to stdout
pub fn write_output(text: &str, dest: Option<&Path>) -> Result<()> {
    match dest {
        Some(path) => fs::write(path, text)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
