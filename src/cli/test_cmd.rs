//! Handler for running tests, the default mode of `gild`.

use std::io::{self, Write};

use crate::config::Config;
use crate::error::GildError;
use crate::harness::{BatchSummary, Harness};
use crate::tools::{
    BuiltinDiff, CommandParser, Confirm, ExternalDiff, FixedConfirm, TerminalConfirm, TextDiffer,
};

use super::GildMode;

pub(crate) fn run_tests(
    tests: &[String],
    config: &Config,
    mode: GildMode,
    json: bool,
) -> Result<bool, GildError> {
    let parser = CommandParser::new(&config.parser);
    let external;
    let differ: &dyn TextDiffer = if config.diff.builtin {
        &BuiltinDiff
    } else {
        external = ExternalDiff::new(&config.diff);
        &external
    };
    let confirm = select_confirm(mode, json, config.gild.accept.clone());
    let harness = Harness::with_config(&parser, differ, confirm.as_ref(), config);

    // With --json, stdout is reserved for the summary
    let summary = if json {
        let mut stdout = io::stdout();
        run_and_summarize(
            &harness,
            tests,
            &mut io::stderr(),
            Some(&mut stdout as &mut dyn Write),
        )?
    } else {
        run_and_summarize(&harness, tests, &mut io::stdout(), None)?
    };
    Ok(summary.is_success())
}

/// Pick the confirmer for a gild mode
pub(crate) fn select_confirm(mode: GildMode, json: bool, accept: Vec<String>) -> Box<dyn Confirm> {
    match mode {
        GildMode::Ask if json => Box::new(TerminalConfirm::on_stderr(accept)),
        GildMode::Ask => Box::new(TerminalConfirm::new(accept)),
        GildMode::Always => Box::new(FixedConfirm(true)),
        GildMode::Never => Box::new(FixedConfirm(false)),
    }
}

/// Run the batch, log the summary line and optionally print it as JSON
pub(crate) fn run_and_summarize(
    harness: &Harness<'_>,
    tests: &[String],
    report: &mut dyn Write,
    json_out: Option<&mut dyn Write>,
) -> Result<BatchSummary, GildError> {
    let summary = harness.run_batch(tests, report).map_err(GildError::Report)?;

    log::info!("{}", summary.summary_line());

    if let Some(out) = json_out {
        let text = serde_json::to_string_pretty(&summary)?;
        writeln!(out, "{}", text).map_err(GildError::Report)?;
    }

    Ok(summary)
}
