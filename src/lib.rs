//! Apigen - Generate API reference docs from SourceKitten declaration dumps
//!
//! Pulls, builds and introspects each configured Swift package under a
//! sources root, keeps only its public API surface, and renders the
//! result as JSON or through a Tera template.

pub mod cli;
pub mod config;
pub mod decl;
pub mod driver;
pub mod error;
pub mod output;

// Re-export main types
pub use config::{Config, ToolCommand};
pub use decl::{DeclKind, DeclNode, FileRecord, ProjectRecord, RenderContext};
pub use driver::Driver;
pub use error::{Error, Result};
