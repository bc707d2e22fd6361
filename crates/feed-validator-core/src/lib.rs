//! Feed Validator Core
//!
//! Validates newline-delimited JSON catalog feeds before ingestion. Each
//! logical line must decode to a record matching the schema of its kind;
//! problems are reported per line, in input order, as errors or warnings.
//!
//! ## Architecture
//!
//! 1. **Checker model** (`checker`): composable validators (object records,
//!    homogeneous maps and lists, string enumerations).
//! 2. **Schemas** (`schema`): the artist and track checker trees.
//! 3. **Validation** (`validate`): the recursive walk producing
//!    [`Violation`]s and [`Notice`]s.
//! 4. **Reader** (`reader`): reassembles records split at U+2028/U+2029.
//! 5. **Driver** (`driver`): streams a feed, enforces the error budget and
//!    builds a [`FeedReport`].
//!
//! ## Example
//!
//! ```rust
//! use feed_validator_core::{FeedValidator, RecordKind, ValidatorConfig};
//! use std::io::Cursor;
//!
//! let schema = RecordKind::Artist.schema().unwrap();
//! let validator = FeedValidator::new(&schema, ValidatorConfig::default());
//! let report = validator.validate_reader(Cursor::new(b"{\"id\":\"A1\"}\n".to_vec()));
//!
//! assert_eq!(report.lines_processed, 1);
//! assert_eq!(report.error_count(), 1);
//! ```

pub mod checker;
pub mod config;
pub mod driver;
pub mod error;
pub mod kind;
pub mod reader;
pub mod schema;
pub mod validate;
pub mod violation;

pub use checker::{
    Checker, CompositeChecker, EnumStringChecker, Field, FieldSpec, HomogeneousListChecker,
    HomogeneousMapChecker,
};
pub use config::ValidatorConfig;
pub use driver::{FeedReport, FeedValidator, LineWarning};
pub use error::{FeedError, Result};
pub use kind::{PrimitiveKind, ValueKind};
pub use reader::{logical_lines, LogicalLines, PhysicalLines};
pub use schema::{artist_schema, track_schema, RecordKind};
pub use violation::{EntryRole, Location, Notice, Outcome, Violation};

/// Crate version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
