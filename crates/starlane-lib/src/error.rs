use std::path::PathBuf;

use thiserror::Error;

use crate::map::StarId;

/// Convenient result alias for the Starlane library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the scatter layout could not find a free position for a star
    /// within the configured attempt cap.
    #[error(
        "could not place star {placed} of {requested} after {attempts} attempts; \
         the map bounds are too small for the requested star count and separation"
    )]
    PlacementExhausted {
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    /// Raised when a configuration value is out of range or inconsistent.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Raised when a star name could not be found in the map.
    #[error("unknown star name: {name}{}", format_suggestions(.suggestions))]
    UnknownStar {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a star identifier does not belong to the current map.
    #[error("unknown star id: {id}")]
    UnknownStarId { id: StarId },

    /// Raised when an operation needs at least one star.
    #[error("star map is empty")]
    EmptyStarmap,

    /// Raised when a navigation command is not valid in the current state.
    #[error("cannot {command} while {state}")]
    InvalidCommand {
        state: String,
        command: &'static str,
    },

    /// Raised when reading a configuration or name list fails.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
