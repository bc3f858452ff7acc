//! Error types for the lanedrag binary and its loaders.
//!
//! The drag engine itself never fails: every engine operation degrades to a
//! no-op or a cancellation. Errors only arise at the impure edges, when
//! reading a board fixture, an input script, a config file, or setting up
//! logging.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from the binary
//!   - [`FixtureError`] - Board fixture reading and validation
//!   - [`ScriptError`] - Input script reading and line parsing
//!   - [`ConfigError`] - Config file reading and TOML parsing
//!   - [`LoggingError`] - Log directory and subscriber setup
//!   - `std::io::Error` - Writing events to stdout

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::identifiers::{ItemId, LaneId};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All domain-specific error types convert into `AppError` via `From`,
/// so `main` composes them with `?`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The board fixture could not be loaded.
    #[error("Failed to load board: {0}")]
    Fixture(#[from] FixtureError),

    /// The input script could not be read or parsed.
    #[error("Failed to load script: {0}")]
    Script(#[from] ScriptError),

    /// The configuration file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when loading a board fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("Failed to read board fixture at {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The fixture is not valid JSON or does not match the fixture schema.
    #[error("Invalid board fixture: {reason}")]
    Parse {
        /// Parser error details.
        reason: String,
    },

    /// Two lanes share an id.
    #[error("Duplicate lane id: {0}")]
    DuplicateLane(LaneId),

    /// An item appears more than once across the board.
    #[error("Duplicate item id: {0}")]
    DuplicateItem(ItemId),
}

/// Errors encountered when loading an input script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script source could not be read.
    #[error("Failed to read script: {0}")]
    Read(#[from] std::io::Error),

    /// A line is not a valid script step.
    #[error("Invalid script step at line {line}: {reason}")]
    InvalidStep {
        /// 1-based line number of the offending line.
        line: usize,
        /// Parser error details.
        reason: String,
    },
}
