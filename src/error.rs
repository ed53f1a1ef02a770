//! Diagnostic error types for the modi tracker.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. Note that most storage faults never reach
//! a caller as errors: the persistence adapter catches them and degrades to a
//! benign default (see [`crate::store::Storage`]). These types cover the paths
//! that do propagate — backend internals and tracker construction.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the modi tracker.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ModiError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Tracker(#[from] TrackerError),
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("I/O error: {source}")]
    #[diagnostic(
        code(modi::store::io),
        help(
            "A filesystem operation failed. Check that the data directory exists, \
             has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("redb transaction error: {message}")]
    #[diagnostic(
        code(modi::store::redb),
        help(
            "The embedded database encountered a transaction error. \
             This may indicate corruption — try running with a fresh data directory. \
             If the problem persists, file a bug report."
        )
    )]
    Redb { message: String },

    #[error("serialization error: {message}")]
    #[diagnostic(
        code(modi::store::serde),
        help(
            "Failed to serialize or deserialize a stored value. \
             This usually means the stored data was written by a different version. \
             Run `modi reset` to return to seed data."
        )
    )]
    Serialization { message: String },
}

// ---------------------------------------------------------------------------
// Tracker errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum TrackerError {
    #[error("data directory error: {path}")]
    #[diagnostic(
        code(modi::tracker::data_dir),
        help(
            "The data directory could not be accessed. \
             Ensure the path exists and has read/write permissions."
        )
    )]
    DataDir { path: String },

    #[error("identifier space exhausted")]
    #[diagnostic(
        code(modi::tracker::ids_exhausted),
        help(
            "The record ID allocator ran out of IDs. This requires 2^64 - 1 \
             allocations and should never happen in practice — if you see this, \
             something is very wrong. File a bug report."
        )
    )]
    IdsExhausted,
}

/// Convenience alias for functions returning modi results.
pub type ModiResult<T> = std::result::Result<T, ModiError>;
