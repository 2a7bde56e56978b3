//! Error types for the converter.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort the whole conversion run, plus the per-update
/// wrapper that is logged and skipped.
#[derive(Error, Debug)]
pub enum Error {
    /// The input was not a valid telemetry envelope. Nothing is converted.
    #[error("Failed to decode telemetry envelope: {0}")]
    EnvelopeDecode(#[source] gnmi_rdf_common::Error),

    /// The input held no data at all.
    #[error("Failed to decode telemetry envelope: input is empty")]
    EmptyEnvelope,

    /// A single update of a response could not be converted.
    #[error("Failed to process update '{path}' from {source_id}: {error}")]
    Update {
        source_id: String,
        path: String,
        #[source]
        error: UpdateError,
    },

    /// Reading the input or writing triples failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an update failure with the response source and update path.
    pub fn update(
        source_id: impl Into<String>,
        path: impl Into<String>,
        error: UpdateError,
    ) -> Self {
        Self::Update {
            source_id: source_id.into(),
            path: path.into(),
            error,
        }
    }
}

/// Why a single counters update produced no triples.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("No counters found in update")]
    MissingCounters,

    #[error("Failed to decode counters: {0}")]
    CounterDecode(#[from] serde_json::Error),

    #[error("Invalid interface name in path: {0}")]
    InvalidInterfaceName(String),

    #[error("Interface name is empty")]
    EmptyInterfaceName,
}
