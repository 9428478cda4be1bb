//! Fatal errors for the `gild` command.
//!
//! Per-test problems never end up here; they are reported as `errors`
//! outcomes and the batch carries on. These are the failures that stop the
//! whole run before or after the batch.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error, Diagnostic)]
pub enum GildError {
    #[error(transparent)]
    #[diagnostic(
        code(gild::config),
        help("every key in gild.toml is optional; remove a key to fall back to its default")
    )]
    Config(#[from] ConfigError),

    #[error("failed to read {}", .path.display())]
    #[diagnostic(code(gild::io))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write the test report")]
    #[diagnostic(code(gild::io), help("is stdout closed?"))]
    Report(#[source] std::io::Error),

    #[error("failed to serialize results as JSON")]
    #[diagnostic(code(gild::json))]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize config")]
    #[diagnostic(code(gild::config))]
    ConfigToml(#[from] toml::ser::Error),
}
