// Template engine for rendering user-supplied documentation templates

use crate::decl::RenderContext;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera, Value};

/// Template engine wrapping Tera with custom filters
pub struct TemplateEngine {
    tera: Tera,
    name: String,
}

impl TemplateEngine {
    /// Load a single template file
    ///
    /// The template is registered under its path, so Tera's usual
    /// autoescaping applies to `.html` and `.xml` templates.
    pub fn from_file(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy().into_owned();
        let mut tera = Tera::default();
        tera.add_template_file(path, Some(&name))?;
        register_filters(&mut tera);
        Ok(Self { tera, name })
    }

    /// Build an engine from template source, mainly for tests and embedding
    pub fn from_source(name: &str, source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(name, source)?;
        register_filters(&mut tera);
        Ok(Self {
            tera,
            name: name.to_string(),
        })
    }

    /// Render the template with `projects` as its top-level variable
    pub fn render(&self, context: &RenderContext) -> Result<String> {
        let context = Context::from_serialize(context)?;
        Ok(self.tera.render(&self.name, &context)?)
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("truncate_words", truncate_words);
    tera.register_filter("pluralize", pluralize);
    tera.register_filter("first_line", first_line);
    tera.register_filter("slugify", slugify_filter);
}

/// Truncate text to a number of words
fn truncate_words(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value.as_str().unwrap_or("");
    let max_words = args
        .get("count")
        .and_then(|v| v.as_u64())
        .unwrap_or(50) as usize;

    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() <= max_words {
        Ok(Value::String(s.to_string()))
    } else {
        let truncated: String = words[..max_words].join(" ");
        Ok(Value::String(format!("{}...", truncated)))
    }
}

/// Pluralize a word based on count
fn pluralize(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let count = value.as_u64().unwrap_or(0);
    let singular = args
        .get("singular")
        .and_then(|v| v.as_str())
        .unwrap_or("item");
    let default_plural = format!("{}s", singular);
    let plural = args
        .get("plural")
        .and_then(|v| v.as_str())
        .unwrap_or(&default_plural);

    if count == 1 {
        Ok(Value::String(format!("{} {}", count, singular)))
    } else {
        Ok(Value::String(format!("{} {}", count, plural)))
    }
}

/// First non-blank line of a doc comment, for summaries
fn first_line(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value.as_str().unwrap_or("");
    let line = s.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    Ok(Value::String(line.to_string()))
}

fn slugify_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value.as_str().unwrap_or("");
    Ok(Value::String(slugify(s)))
}

/// Convert text to an anchor-friendly slug
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
