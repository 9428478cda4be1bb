//! Gild CLI - golden-file harness for parse trees

use clap::Parser;
use std::process::ExitCode;

use gild::cli::Cli;
use gild::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(logging::level_for(cli.quiet, cli.verbose)) {
        eprintln!("warning: {}", e);
    }

    match cli.run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::from(2)
        }
    }
}
