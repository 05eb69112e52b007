//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, the input prompt,
//! signal handling, and the app runner.

pub mod app;
pub mod args;
pub mod presenter;
pub mod prompt;
pub mod signals;

// Re-export commonly used types
pub use app::{run, EXIT_ERROR, EXIT_INTERRUPTED, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, InputSource, RunOptions};
pub use presenter::Presenter;
