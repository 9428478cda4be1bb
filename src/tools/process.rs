//! Process-backed collaborators: the external parser and `diff`.

use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::config::{DiffConfig, ParserConfig};

use super::{DiffOutcome, ParseOutput, TextDiffer, ToolError, TreeParser};

/// Runs the configured parser program once per test
#[derive(Debug, Clone)]
pub struct CommandParser {
    config: ParserConfig,
}

impl CommandParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl TreeParser for CommandParser {
    fn parse_tree(&self, test: &str) -> Result<ParseOutput, ToolError> {
        let program = &self.config.program;
        let args = self.config.args_for(test);
        log::debug!(
            "running `{} {}` in {}",
            program,
            args.join(" "),
            self.config.working_dir.display()
        );

        let output = Command::new(program)
            .args(&args)
            .current_dir(&self.config.working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            log::debug!("`{}` exited with {}", program, output.status);
        }

        Ok(ParseOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Runs `diff -du <golden> -` with the rendered text on stdin
#[derive(Debug, Clone)]
pub struct ExternalDiff {
    program: String,
    args: Vec<String>,
}

impl ExternalDiff {
    pub fn new(config: &DiffConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    fn run(&self, golden: &Path, actual: &str) -> Result<std::process::Output, ToolError> {
        let spawn_error = |source| ToolError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(golden)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Feed stdin from a separate thread so a large diff on stdout can't
        // stall both processes.
        let stdin = child.stdin.take();
        std::thread::scope(|scope| {
            if let Some(mut stdin) = stdin {
                scope.spawn(move || {
                    if let Err(e) = stdin.write_all(actual.as_bytes()) {
                        log::debug!("diff closed stdin early: {}", e);
                    }
                });
            }
            child.wait_with_output()
        })
        .map_err(spawn_error)
    }
}

impl TextDiffer for ExternalDiff {
    fn diff_text(&self, golden: &Path, actual: &str) -> Result<DiffOutcome, ToolError> {
        if !golden.exists() {
            return Ok(DiffOutcome::Missing);
        }

        log::debug!(
            "running `{} {}` against {}",
            self.program,
            self.args.join(" "),
            golden.display()
        );
        let output = self.run(golden, actual)?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        match output.status.code() {
            Some(0) if stderr.is_empty() => Ok(DiffOutcome::Identical),
            Some(1) if stderr.is_empty() => Ok(DiffOutcome::Differs(stdout)),
            // The golden file disappeared between the check and the run
            _ if !golden.exists() => Ok(DiffOutcome::Missing),
            _ => Err(ToolError::Diff {
                program: self.program.clone(),
                status: describe_status(output.status),
                stderr,
            }),
        }
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
