//! Callsign index and search
//!
//! - Entry / FieldSet: normalized callsign records and their auxiliary schema
//! - EntrySet: per-character bucket of the fingerprint index
//! - Database: fingerprint index with parallel ranked search
//! - Parsers: SCP and call history line formats
//! - Thread-safe wrapper: concurrent add/find

pub mod database;
pub mod entry;
pub mod entry_set;
pub mod parser;
pub mod threadsafe;

pub use database::*;
pub use entry::*;
pub use entry_set::*;
pub use parser::*;
pub use threadsafe::*;
