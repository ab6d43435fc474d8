//! # CLI Error Type
//!
//! Unified error type for the console driver.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in shopcart                               │
//! │                                                                         │
//! │  Startup                                Command loop                    │
//! │  ───────                                ────────────                    │
//! │  config file unreadable ─┐              bad command ──────┐             │
//! │  config invalid ─────────┼─► CliError   bad quantity ─────┼─► printed,  │
//! │  catalog invalid ────────┘   exit 1     refused by core ──┘   loop goes │
//! │                                                                on       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopcart_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration loaded but makes no sense.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML.
    #[error("Failed to render config: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    /// Bad command line arguments.
    #[error("{0}")]
    Usage(String),

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    /// Reading stdin, writing stdout, or reading the config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The command line typed at the prompt was not understood.
    #[error("Invalid command: {0}. Type 'help' for the list of commands.")]
    InvalidCommand(String),

    /// A command argument failed validation.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Refused by the core.
    #[error(transparent)]
    Core(#[from] CoreError),
}
