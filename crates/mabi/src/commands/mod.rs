//! Command implementations for the mabi CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod config;
pub mod facets;
pub mod search;

use crate::cli::Cli;
use crate::filter_args::FilterArgError;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Auction API error.
    #[error("API error: {0}")]
    Api(#[from] mabi_auction_api::Error),

    /// Metadata vocabulary error.
    #[error("metadata error: {0}")]
    Metadata(#[from] mabi_auction_filter::MetadataError),

    /// Malformed filter flag.
    #[error("filter error: {0}")]
    Filter(#[from] FilterArgError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color,
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}
