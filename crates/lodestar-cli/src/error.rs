//! Error type for the Lodestar CLI.

use std::io;

use thiserror::Error;

use lodestar::StateError;

/// Everything that can go wrong while running a scenario.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("failed to serialize scene: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("operation `{operation}` requires --{option}")]
    MissingOption {
        operation: &'static str,
        option: &'static str,
    },

    #[error("no element with id {0} in the scene")]
    UnknownElement(u64),

    #[error(transparent)]
    State(#[from] StateError),
}
