//! Handler for `gild --check`.

use std::io::{self, Write};

use crate::config::GoldenConfig;
use crate::error::GildError;
use crate::render::is_canonical;

/// Verify each test's golden file is laid out exactly as the renderer would
pub(crate) fn run_check(
    tests: &[String],
    golden: &GoldenConfig,
    out: &mut dyn Write,
) -> Result<bool, GildError> {
    let mut all_canonical = true;

    for test in tests {
        let path = golden.path_for(test);
        log::debug!("checking {}", path.display());

        let status = match std::fs::read_to_string(&path) {
            Ok(text) if is_canonical(&text) => writeln!(out, "{} canonical", test),
            Ok(_) => {
                all_canonical = false;
                writeln!(out, "{} not canonical", test)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                all_canonical = false;
                writeln!(out, "{} missing golden", test)
            }
            Err(e) => {
                all_canonical = false;
                writeln!(out, "{} errors\nfailed to read {}: {}", test, path.display(), e)
            }
        };
        status.map_err(GildError::Report)?;
    }

    Ok(all_canonical)
}
