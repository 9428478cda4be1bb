//! Comparison driver
//!
//! For each test name: run the parser, render its tree, compare with the
//! golden file, report, and offer to gild when the golden is missing or out
//! of date. Tests are independent; a failing test never stops the batch.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::{Config, GoldenConfig};
use crate::render::{render_tree, render_tree_strict};
use crate::tools::{Confirm, DiffOutcome, TextDiffer, TreeParser};

/// How a single test compared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The parser reported errors, or the comparison itself failed
    Errored { message: String },
    /// No golden file exists yet
    MissingGolden,
    /// Golden file differs; `diff` is the unified diff
    Diff { diff: String },
    /// Golden file matches
    Pass,
}

impl Outcome {
    /// Whether this outcome asks the operator to gild
    pub fn offers_gild(&self) -> bool {
        matches!(self, Outcome::MissingGolden | Outcome::Diff { .. })
    }
}

/// What happened after the gild prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GildResult {
    Gilded,
    NotGilded,
    /// The operator said yes but the golden file couldn't be written
    Failed { message: String },
}

/// Result of running one test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestReport {
    pub name: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gild: Option<GildResult>,
}

impl TestReport {
    /// Passed, or the new output was accepted as golden
    pub fn is_resolved(&self) -> bool {
        self.outcome == Outcome::Pass || self.gild == Some(GildResult::Gilded)
    }
}

/// Results of a whole run, in the order the tests were given
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub passed: usize,
    pub errored: usize,
    pub missing_golden: usize,
    pub diff: usize,
    pub gilded: usize,
    pub results: Vec<TestReport>,
}

impl BatchSummary {
    pub fn from_reports(results: Vec<TestReport>) -> Self {
        let count = |f: fn(&TestReport) -> bool| results.iter().filter(|r| f(r)).count();
        Self {
            total: results.len(),
            passed: count(|r| r.outcome == Outcome::Pass),
            errored: count(|r| matches!(r.outcome, Outcome::Errored { .. })),
            missing_golden: count(|r| r.outcome == Outcome::MissingGolden),
            diff: count(|r| matches!(r.outcome, Outcome::Diff { .. })),
            gilded: count(|r| r.gild == Some(GildResult::Gilded)),
            results,
        }
    }

    /// Every test passed or was gilded
    pub fn is_success(&self) -> bool {
        self.results.iter().all(TestReport::is_resolved)
    }

    /// Tests left failing
    pub fn unresolved(&self) -> usize {
        self.results.iter().filter(|r| !r.is_resolved()).count()
    }

    /// One-line human summary
    pub fn summary_line(&self) -> String {
        format!(
            "{} tests: {} passed, {} gilded, {} failed",
            self.total,
            self.passed,
            self.gilded,
            self.unresolved()
        )
    }
}

/// Drives parse → render → compare → gild for a list of tests
pub struct Harness<'a> {
    parser: &'a dyn TreeParser,
    differ: &'a dyn TextDiffer,
    confirm: &'a dyn Confirm,
    golden: GoldenConfig,
    prompt: String,
    strict: bool,
}

impl<'a> Harness<'a> {
    /// Create a harness taking layout, prompt and strictness from a config
    pub fn with_config(
        parser: &'a dyn TreeParser,
        differ: &'a dyn TextDiffer,
        confirm: &'a dyn Confirm,
        config: &Config,
    ) -> Self {
        Self {
            parser,
            differ,
            confirm,
            golden: config.golden.clone(),
            prompt: config.gild.prompt.clone(),
            strict: config.render.strict,
        }
    }

    /// Run every test in order, writing the console report to `out`.
    ///
    /// Only a failure to write the report aborts the batch.
    pub fn run_batch<S: AsRef<str>>(
        &self,
        names: &[S],
        out: &mut dyn Write,
    ) -> io::Result<BatchSummary> {
        let mut reports = Vec::with_capacity(names.len());
        for name in names {
            reports.push(self.run_test(name.as_ref(), out)?);
        }
        Ok(BatchSummary::from_reports(reports))
    }

    /// Run one test, writing its console report to `out`
    pub fn run_test(&self, name: &str, out: &mut dyn Write) -> io::Result<TestReport> {
        let canonical = match self.parse_and_render(name) {
            Ok(canonical) => canonical,
            Err(message) => {
                write!(out, "{} errors\n{}", name, message)?;
                if !message.ends_with('\n') {
                    writeln!(out)?;
                }
                return Ok(TestReport {
                    name: name.to_string(),
                    outcome: Outcome::Errored { message },
                    gild: None,
                });
            }
        };

        let golden = self.golden.path_for(name);
        log::debug!("comparing {} against {}", name, golden.display());

        let outcome = match self.differ.diff_text(&golden, &canonical) {
            Ok(DiffOutcome::Identical) => Outcome::Pass,
            Ok(DiffOutcome::Missing) => Outcome::MissingGolden,
            Ok(DiffOutcome::Differs(diff)) => Outcome::Diff { diff },
            Err(e) => Outcome::Errored {
                message: e.to_string(),
            },
        };

        match &outcome {
            Outcome::Pass => writeln!(out, "{} pass", name)?,
            Outcome::MissingGolden => {
                writeln!(out, "{} missing golden", name)?;
                writeln!(out, "{}", canonical)?;
            }
            Outcome::Diff { diff } => {
                writeln!(out, "{} diff", name)?;
                writeln!(out, "{}", diff)?;
            }
            Outcome::Errored { message } => {
                writeln!(out, "{} errors", name)?;
                writeln!(out, "{}", message)?;
            }
        }

        let gild = if outcome.offers_gild() {
            out.flush()?;
            Some(self.offer_gild(&golden, &canonical))
        } else {
            None
        };

        Ok(TestReport {
            name: name.to_string(),
            outcome,
            gild,
        })
    }

    /// Run the parser and render its tree; `Err` carries the text to report
    fn parse_and_render(&self, name: &str) -> Result<String, String> {
        let output = self
            .parser
            .parse_tree(name)
            .map_err(|e| format!("{}\n", e))?;

        if output.is_failure() {
            return Err(output.stderr);
        }

        if self.strict {
            render_tree_strict(&output.stdout)
                .map_err(|e| format!("unbalanced parse tree: {}\n", e))
        } else {
            Ok(render_tree(&output.stdout))
        }
    }

    fn offer_gild(&self, golden: &Path, canonical: &str) -> GildResult {
        if !self.confirm.confirm(&self.prompt) {
            return GildResult::NotGilded;
        }

        match write_golden(golden, canonical) {
            Ok(()) => {
                log::debug!("gilded {}", golden.display());
                GildResult::Gilded
            }
            Err(e) => {
                let message = format!("failed to write {}: {}", golden.display(), e);
                log::error!("{}", message);
                GildResult::Failed { message }
            }
        }
    }
}

/// Write canonical text to a golden file exactly, creating its directory
pub fn write_golden(path: &Path, canonical: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, canonical)
}
