//! Collaborator interfaces for the comparison driver.
//!
//! The driver never spawns processes or touches the terminal directly; it
//! talks to a [`TreeParser`], a [`TextDiffer`] and a [`Confirm`]. The process
//! and terminal backed implementations live here next to in-memory ones used
//! for tests and batch runs.

mod confirm;
mod diff;
mod process;

pub use confirm::{is_affirmative, FixedConfirm, ScriptedConfirm, TerminalConfirm};
pub use diff::{unified_diff, BuiltinDiff, CONTEXT_LINES};
pub use process::{CommandParser, ExternalDiff};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Captured output of one parser run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutput {
    /// Raw tree text
    pub stdout: String,
    /// Diagnostics; non-empty means the run failed
    pub stderr: String,
}

impl ParseOutput {
    /// Output of a successful run
    pub fn tree(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Output of a failed run
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// True when the parser reported anything on stderr
    pub fn is_failure(&self) -> bool {
        !self.stderr.is_empty()
    }
}

/// Result of comparing a golden file against fresh output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// There is no golden file to compare against
    Missing,
    /// Golden content equals the output
    Identical,
    /// Unified diff, golden as "before"
    Differs(String),
}

/// Errors from running a collaborator
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` failed ({status}): {stderr}")]
    Diff {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Runs the external parser for a test
pub trait TreeParser {
    fn parse_tree(&self, test: &str) -> Result<ParseOutput, ToolError>;
}

/// Compares a golden file with freshly rendered text
pub trait TextDiffer {
    fn diff_text(&self, golden: &Path, actual: &str) -> Result<DiffOutcome, ToolError>;
}

/// Asks the operator a yes/no question
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Parser stand-in answering from a fixed table, for tests
#[derive(Debug, Default)]
pub struct MockParser {
    outputs: std::collections::HashMap<String, ParseOutput>,
}

impl MockParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the output for a test name
    pub fn with(mut self, test: &str, output: ParseOutput) -> Self {
        self.outputs.insert(test.to_string(), output);
        self
    }
}

impl TreeParser for MockParser {
    fn parse_tree(&self, test: &str) -> Result<ParseOutput, ToolError> {
        Ok(self
            .outputs
            .get(test)
            .cloned()
            .unwrap_or_else(|| ParseOutput::failure(format!("{}: no such file\n", test))))
    }
}

#[cfg(test)]
mod tests;
