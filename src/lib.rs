//! Reconstruct approximate SQL from `mysqlbinlog --verbose` row output.
//!
//! A [`binlog::BlockDetector`] picks row-change blocks for one table out of
//! the log text, collecting `@<ordinal>=<value>` fragments while a block is
//! open. When a block closes, a [`sql::StatementReconstructor`] turns it into
//! an `INSERT` statement; [`sql::ChangeRecord`] is the JSON form.
//! [`Converter`] wires the two together over a line stream.
//!
//! ```rust
//! use binlog_sql::{Converter, ParserConfig};
//!
//! let log = [
//!     "### INSERT INTO `vehicle_management`.`users`",
//!     "### SET",
//!     "###   @1=1",
//!     "###   @2='Alice'",
//!     "# at 1234",
//! ]
//! .join("\n");
//!
//! let mut out = Vec::new();
//! let mut converter = Converter::new(ParserConfig::generic("users")).unwrap();
//! converter.run(log.as_bytes(), &mut out).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "INSERT INTO users (c1, c2) VALUES (1, 'Alice');\n"
//! );
//! ```

pub mod binlog;
pub mod config;
pub mod converter;
pub mod error;
pub mod logging;
pub mod sql;

pub use config::{OutputFormat, ParserConfig};
pub use converter::{ConversionStats, Converter};
pub use error::{Error, Result};
