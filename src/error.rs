use std::path::PathBuf;
use thiserror::Error;

/// Apigen error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Malformed {context}: {message}")]
    Decode { context: String, message: String },

    #[error("Unknown declaration kind: {0}")]
    UnknownKind(String),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}: {stderr}", exit_label(.code))]
    Process {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Result type alias for apigen operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a decode error for malformed tool output
    pub fn decode(context: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Decode {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a process failure error
    pub fn process(program: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> Self {
        Error::Process {
            program: program.into(),
            code,
            stderr: stderr.into().trim().to_string(),
        }
    }
}
