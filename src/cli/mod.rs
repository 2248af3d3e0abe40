//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the subscriber runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod signals;
pub mod theme_cmd;

// Re-export commonly used types
pub use app::{run_subscriber, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, ToastsArg};
pub use presenter::Presenter;
