//! Common error types for OWM

use thiserror::Error;

use crate::FormKey;

/// Common result type for OWM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the OWM crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Plugin (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML configuration
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A record the run depends on is absent from the load order
    #[error("Missing required record: {0}")]
    MissingTemplate(String),

    /// Failure while processing one record, tagged with its identity
    #[error("Error processing record {record}: {source}")]
    Record {
        record: String,
        #[source]
        source: Box<Error>,
    },

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Attach the identity of the record being processed.
    ///
    /// Errors that already carry a record identity are returned unchanged,
    /// so the innermost record wins.
    pub fn for_record(self, key: &FormKey, editor_id: Option<&str>) -> Self {
        match self {
            Error::Record { .. } => self,
            other => Error::Record {
                record: match editor_id {
                    Some(edid) => format!("{} ({})", edid, key),
                    None => key.to_string(),
                },
                source: Box::new(other),
            },
        }
    }
}
