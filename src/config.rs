use crate::decl::project_name;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Placeholder in introspection arguments replaced with the module name
pub const MODULE_PLACEHOLDER: &str = "{module}";

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "apigen.toml";

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    /// Extra environment variables for every external command
    pub environment: BTreeMap<String, String>,
    /// Repository directory name -> module passed to the introspection tool
    pub repositories: BTreeMap<String, String>,
}

/// External commands run inside each repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub pull: ToolCommand,
    /// Optional clean step between pull and build
    pub clean: Option<ToolCommand>,
    pub build: ToolCommand,
    pub introspect: ToolCommand,
}

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Copy of this command with `{module}` substituted in every argument
    pub fn for_module(&self, module: &str) -> Self {
        Self {
            program: self.program.clone(),
            args: self
                .args
                .iter()
                .map(|a| a.replace(MODULE_PLACEHOLDER, module))
                .collect(),
        }
    }

    /// Shell-like rendering for status messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            pull: ToolCommand::new("git", &["pull"]),
            clean: None,
            build: ToolCommand::new("swift", &["build"]),
            introspect: ToolCommand::new("sourcekitten", &["doc", "--spm-module", MODULE_PLACEHOLDER]),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let repositories = [
            ("Perfect-CURL", "PerfectCURL"),
            ("Perfect-FastCGI", "PerfectFastCGI"),
            ("Perfect-HTTP", "PerfectHTTP"),
            ("Perfect-HTTPServer", "PerfectHTTPServer"),
            ("Perfect-MongoDB", "MongoDB"),
            ("Perfect-Mustache", "PerfectMustache"),
            ("Perfect-MySQL", "MySQL"),
            ("Perfect-Net", "PerfectNet"),
            ("Perfect-Notifications", "PerfectNotifications"),
            ("Perfect-PostgreSQL", "PostgreSQL"),
            ("Perfect-Redis", "PerfectRedis"),
            ("Perfect-SQLite", "SQLite"),
            ("Perfect-Thread", "PerfectThread"),
            ("Perfect-WebSockets", "PerfectWebSockets"),
            ("PerfectLib", "PerfectLib"),
        ]
        .into_iter()
        .map(|(dir, module)| (dir.to_string(), module.to_string()))
        .collect();

        Self {
            tools: ToolsConfig::default(),
            environment: BTreeMap::new(),
            repositories,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file, or use defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Module name configured for a repository directory
    ///
    /// Configured names may carry a trailing `/`.
    pub fn module_for(&self, repository: &str) -> Option<&str> {
        self.repositories
            .iter()
            .find(|(dir, _)| project_name(dir) == repository)
            .map(|(_, module)| module.as_str())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let tools = [
            ("pull", Some(&self.tools.pull)),
            ("clean", self.tools.clean.as_ref()),
            ("build", Some(&self.tools.build)),
            ("introspect", Some(&self.tools.introspect)),
        ];
        for (name, tool) in tools {
            if tool.is_some_and(|t| t.program.trim().is_empty()) {
                return Err(Error::config_validation(format!(
                    "tools.{} program must not be empty",
                    name
                )));
            }
        }

        if !self
            .tools
            .introspect
            .args
            .iter()
            .any(|a| a.contains(MODULE_PLACEHOLDER))
        {
            return Err(Error::config_validation(format!(
                "tools.introspect args must reference {}",
                MODULE_PLACEHOLDER
            )));
        }

        if self.repositories.is_empty() {
            return Err(Error::config_validation("at least one repository required"));
        }

        if let Some((dir, _)) = self.repositories.iter().find(|(_, m)| m.trim().is_empty()) {
            return Err(Error::config_validation(format!(
                "repository {} has an empty module name",
                dir
            )));
        }

        Ok(())
    }
}
