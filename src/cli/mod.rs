//! Command-line interface for the gild harness
//!
//! `gild foo bar` runs the named tests. `--render` and `--check` work on
//! trees and golden files directly without running the parser.

mod check_cmd;
mod render_cmd;
mod test_cmd;

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::GildError;

/// Golden-file regression harness for parse-tree output
#[derive(Parser, Debug)]
#[command(name = "gild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Test names, run in the order given
    #[arg(value_name = "TESTS", required_unless_present_any = ["render", "print_config"])]
    pub tests: Vec<String>,

    /// Config file (defaults to gild.toml in the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// When to gild missing or out-of-date golden files
    #[arg(long, value_enum, default_value_t = GildMode::Ask)]
    pub gild: GildMode,

    /// Compare in-process instead of running the external diff tool
    #[arg(long)]
    pub builtin_diff: bool,

    /// Report unbalanced parser output as an error
    #[arg(long)]
    pub strict: bool,

    /// Print a JSON summary on stdout; the report goes to stderr
    #[arg(long)]
    pub json: bool,

    /// Render a raw tree from FILE (`-` for stdin) and exit
    #[arg(long, value_name = "FILE", conflicts_with_all = ["tests", "check"])]
    pub render: Option<PathBuf>,

    /// Check that the golden files of the named tests are in canonical form
    #[arg(long)]
    pub check: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log spawned commands and golden paths
    #[arg(short, long)]
    pub verbose: bool,
}

/// Answer to every gild prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GildMode {
    /// Ask on the terminal
    Ask,
    /// Accept every change
    Always,
    /// Refuse every change
    Never,
}

impl Cli {
    /// Load the config file and apply flag overrides
    pub fn load_config(&self) -> Result<Config, GildError> {
        let mut config = Config::discover(self.config.as_deref(), Path::new("."))?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if self.builtin_diff {
            config.diff.builtin = true;
        }
        if self.strict {
            config.render.strict = true;
        }
    }

    /// Run the CLI. `Ok(false)` means some test (or check) failed.
    pub fn run(self) -> Result<bool, GildError> {
        if let Some(input) = &self.render {
            return render_cmd::run_render(input, self.strict, &mut std::io::stdout());
        }

        let config = self.load_config()?;
        log::debug!("parser: {} {:?}", config.parser.program, config.parser.args);

        if self.print_config {
            print!("{}", config.to_toml()?);
            return Ok(true);
        }

        if self.check {
            return check_cmd::run_check(&self.tests, &config.golden, &mut std::io::stdout());
        }

        test_cmd::run_tests(&self.tests, &config, self.gild, self.json)
    }
}
