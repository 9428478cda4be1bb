//! Gild
//!
//! Golden-file regression harness for parse-tree output. Runs an external
//! parser over each test input, renders its one-line tree into an indented
//! canonical form, compares it with a stored golden file and offers to
//! "gild" (accept) new or changed output.

pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
pub mod logging;
pub mod render;
pub mod tools;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::harness::{BatchSummary, Harness, Outcome, TestReport};
    pub use crate::render::{render_tree, strip_layout};
    pub use crate::tools::{Confirm, TextDiffer, TreeParser};
}
