//! Error types and result handling for binlog-sql.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! Parsing itself is tolerant: malformed log lines are skipped, never
//! reported. Errors only come out of stream I/O, record encoding, and
//! invalid parser profiles.
//!
//! # Example
//!
//! ```rust
//! use binlog_sql::{Error, Result};
//!
//! fn check_table(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::Config("table name is empty".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! match check_table("") {
//!     Ok(()) => println!("ok"),
//!     Err(Error::Config(msg)) => eprintln!("Configuration error: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for binlog-sql operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parser profile, e.g. an empty table name.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error when encoding change records.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error reading the log stream or writing statements.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line shaped like `@<ordinal>=<value>` whose ordinal is unusable.
    ///
    /// The detector swallows this; it only exists so the parse attempt
    /// can say why a line was rejected.
    #[error("Invalid fragment: {message}")]
    InvalidFragment {
        /// Description of what was invalid
        message: String,
    },

    /// An integer ordinal that cannot name a column: zero, negative, or
    /// above [`crate::binlog::accumulator::MAX_ORDINAL`].
    ///
    /// The line is still a fragment; its value is just not stored.
    #[error("Ordinal out of range: {ordinal}")]
    OrdinalOutOfRange {
        /// Ordinal text as logged
        ordinal: String,
    },
}

/// A convenient Result type alias for binlog-sql operations.
///
/// This is equivalent to `std::result::Result<T, binlog_sql::Error>`.
pub type Result<T> = std::result::Result<T, Error>;
