//! Error types for the search service.

use std::path::PathBuf;

/// Errors raised while loading events or running the service.
///
/// Request handling never fails with these; they only surface at startup.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Event file or directory could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File or directory being read
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A line of an event file is not a valid event record.
    #[error("Malformed event record in {path} at line {line}: {reason}")]
    MalformedRecord {
        /// Event file containing the record
        path: PathBuf,
        /// One-based line number
        line: usize,
        /// Decoder message
        reason: String,
    },

    /// A Parquet event file could not be decoded.
    #[cfg(feature = "parquet")]
    #[error("Malformed Parquet file {path}: {reason}")]
    Parquet {
        /// Event file being decoded
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// Directory holds no event files at all.
    #[error("No event files found in {dir}")]
    NoEventFiles {
        /// Directory that was scanned
        dir: PathBuf,
    },

    /// Listener could not bind to the configured address.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Requested bind address
        addr: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Server stopped with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
