//! partialcheck - approximate callsign lookup
//!
//! Finds the entries of a callsign list (such as MASTER.SCP) that are most
//! similar to a possibly mistyped call, ranked best first. Meant as a copy
//! check during contest logging.
//!
//! # Features
//! - Character fingerprint index that prunes candidates before scoring
//! - Edit alignment with distance, accuracy and the longest intact run
//! - Parallel search across index buckets with deterministic ranking
//! - SCP and call history readers, pluggable line parsers
//!
//! # Example
//! ```
//! use partialcheck::Database;
//!
//! let scp = "# MASTER.SCP\nW1AW\nK1ABC\nW1AX\n";
//! let db = Database::read_scp(scp.as_bytes()).unwrap();
//!
//! assert_eq!(db.find_strings("W1AZ"), vec!["W1AW", "W1AX"]);
//! assert!(db.find("W1").is_empty());
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod indexing;

pub use algorithms::{align, Alignment, AlignmentOp, EditMatcher, Matcher, MatchingAssembly};
pub use config::SearchConfig;
pub use error::{Error, Result};
pub use indexing::{
    Database, Entry, EntryParser, FieldName, FieldSet, FieldValues, Match, ScpFormat,
    SharedDatabase,
};
