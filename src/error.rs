//! Error types for flight-filter.
//!
//! No error here is fatal to a scan. Each variant documents where it is
//! recovered.

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A candidate selection pattern could not be compiled.
    ///
    /// Recovered by dropping that single pattern.
    #[error("invalid selection pattern {pattern:?}: {reason}")]
    Selector {
        /// The offending pattern.
        pattern: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A keyword list produced an invalid matcher.
    #[error("keyword matcher failed to compile: {0}")]
    Keyword(#[from] regex::Error),

    /// The document has no content root the engine can attach to.
    ///
    /// Recovered by giving up on that page once.
    #[error("document has no content root")]
    NoContentRoot,

    /// The settings storage snapshot could not be read.
    #[error("settings snapshot unreadable: {0}")]
    Settings(#[from] serde_json::Error),

    /// A removal event could not be delivered to its sink.
    ///
    /// Swallowed by the engine after logging.
    #[error("removal notification undeliverable: {0}")]
    Notify(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
