// Repository driver
//
// Walks the sources root, and for every configured repository pulls,
// builds and introspects it, then normalizes what the introspection
// tool reported. Repositories are processed one at a time.

pub mod process;

pub use process::{drain, ToolRunner};

use crate::config::Config;
use crate::decl::{decode_module_docs, extract_files, ProjectRecord, RenderContext};
use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A repository directory matched against the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Directory name under the sources root
    pub name: String,
    pub path: PathBuf,
    /// Module handed to the introspection tool
    pub module: String,
}

/// Orchestrates pull, build and introspection across repositories
pub struct Driver {
    config: Config,
    runner: ToolRunner,
    verbose: bool,
}

impl Driver {
    /// Create a driver from a validated configuration
    pub fn new(config: Config) -> Self {
        let runner = ToolRunner::new(config.environment.clone());
        Self {
            config,
            runner,
            verbose: false,
        }
    }

    /// Create driver with verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Document every configured repository found under `root`
    pub fn run(&self, root: &Path) -> Result<RenderContext> {
        if !root.is_dir() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }

        let repositories = self.discover_repositories(root)?;
        let progress = self.verbose.then(|| {
            let pb = ProgressBar::new(repositories.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .map(|style| style.progress_chars("#>-"))
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            pb
        });

        self.status(
            progress.as_ref(),
            &format!("Found {} configured repositories", repositories.len()),
        );

        let mut context = RenderContext::default();
        for repository in &repositories {
            if let Some(pb) = &progress {
                pb.set_message(repository.name.clone());
            }

            match self.process_repository(repository, progress.as_ref())? {
                Some(project) => {
                    self.status(
                        progress.as_ref(),
                        &format!(
                            "{}: {} files, {} declarations",
                            project.name,
                            project.files.len(),
                            project.declaration_count()
                        ),
                    );
                    context.projects.push(project);
                }
                None => self.status(
                    progress.as_ref(),
                    &format!("{}: no documented declarations, skipping", repository.name),
                ),
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Done");
        }

        Ok(context)
    }

    /// Configured repositories present directly under `root`, sorted by name
    ///
    /// Directories with no configured module are skipped.
    pub fn discover_repositories(&self, root: &Path) -> Result<Vec<Repository>> {
        let mut repositories = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(module) = self.config.module_for(name) else {
                continue;
            };

            repositories.push(Repository {
                name: name.to_string(),
                path: entry.path().to_path_buf(),
                module: module.to_string(),
            });
        }

        Ok(repositories)
    }

    /// Pull, build and introspect one repository
    ///
    /// Returns `None` when no file has a documented declaration.
    pub fn process_repository(
        &self,
        repository: &Repository,
        progress: Option<&ProgressBar>,
    ) -> Result<Option<ProjectRecord>> {
        let tools = &self.config.tools;
        let steps = [Some(&tools.pull), tools.clean.as_ref(), Some(&tools.build)];

        for tool in steps.into_iter().flatten() {
            self.status(progress, &format!("{}: {}", repository.name, tool.display()));
            self.runner.run(tool, &repository.path)?;
        }

        let introspect = tools.introspect.for_module(&repository.module);
        self.status(progress, &format!("{}: {}", repository.name, introspect.display()));
        let output = self.runner.capture(&introspect, &repository.path)?;

        let sources = decode_module_docs(&output)?;
        let files = extract_files(&sources)?;
        if files.is_empty() {
            return Ok(None);
        }

        Ok(Some(ProjectRecord::new(&repository.name, files)))
    }

    fn status(&self, progress: Option<&ProgressBar>, message: &str) {
        if !self.verbose {
            return;
        }
        match progress {
            Some(pb) => pb.suspend(|| eprintln!("{}", message)),
            None => eprintln!("{}", message),
        }
    }
}
