//! Running external extraction tools

use crate::{Error, Result};
use std::process::{Command, Output};
use tracing::debug;

/// Run a tool to completion and return its stdout
///
/// A missing binary maps to [`Error::ToolNotFound`]; a non-zero exit maps to
/// [`Error::ExtractionFailed`] carrying the tool's stderr.
pub fn run_tool(command: &mut Command, tool: &str) -> Result<String> {
    debug!("Running {:?}", command);
    let output = command.output();
    handle_output(output, tool)
}

fn handle_output(result: std::io::Result<Output>, tool: &str) -> Result<String> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(Error::extraction_failed(format!(
                    "{} exited with {}: {}",
                    tool,
                    output.status,
                    stderr.trim()
                )))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::tool_not_found(tool)),
        Err(e) => Err(Error::io(format!("Failed to run {}", tool), e)),
    }
}
