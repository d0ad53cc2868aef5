// External tool execution
//
// Commands always get an explicit working directory; the process-wide
// current directory is never touched.

use crate::config::ToolCommand;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;

const READ_CHUNK: usize = 1024;

/// Runs configured tools inside repository directories
#[derive(Debug, Clone, Default)]
pub struct ToolRunner {
    environment: BTreeMap<String, String>,
}

impl ToolRunner {
    /// Create a runner that adds `environment` to every command
    pub fn new(environment: BTreeMap<String, String>) -> Self {
        Self { environment }
    }

    /// Run a tool to completion, discarding its output
    pub fn run(&self, tool: &ToolCommand, dir: &Path) -> Result<()> {
        let output = self
            .command(tool, dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| spawn_error(tool, source))?;

        if !output.status.success() {
            return Err(Error::process(
                &tool.program,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        Ok(())
    }

    /// Run a tool to completion and return its stdout as UTF-8 text
    pub fn capture(&self, tool: &ToolCommand, dir: &Path) -> Result<String> {
        let mut child = self
            .command(tool, dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| spawn_error(tool, source))?;

        // Stderr is drained on its own thread so a full pipe can't stall stdout.
        let stderr = child.stderr.take().map(|pipe| thread::spawn(move || drain(pipe)));

        let stdout = match child.stdout.take().map(drain).transpose() {
            Ok(stdout) => stdout.unwrap_or_default(),
            Err(e) => {
                abandon(&mut child);
                return Err(e.into());
            }
        };

        let status = child.wait()?;
        let stderr = match stderr {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "stderr reader panicked")))?,
            None => Vec::new(),
        };

        if !status.success() {
            return Err(Error::process(
                &tool.program,
                status.code(),
                String::from_utf8_lossy(&stderr),
            ));
        }

        String::from_utf8(stdout).map_err(|e| {
            Error::decode(
                format!("{} output", tool.program),
                format!("invalid UTF-8: {}", e),
            )
        })
    }

    fn command(&self, tool: &ToolCommand, dir: &Path) -> Command {
        let mut command = Command::new(&tool.program);
        command.args(&tool.args).current_dir(dir).envs(&self.environment);
        command
    }
}

/// Read a stream to its end in fixed-size chunks
///
/// Interrupted reads are retried; any other error ends the read.
pub fn drain<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => return Ok(bytes),
            Ok(n) => bytes.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn abandon(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn spawn_error(tool: &ToolCommand, source: io::Error) -> Error {
    Error::Spawn {
        program: tool.program.clone(),
        source,
    }
}
