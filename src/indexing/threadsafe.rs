//! Thread-safe wrapper for the callsign database.
//!
//! [`Database`] is build-once/read-many: the borrow checker keeps `add` and
//! `find` apart. When an application keeps adding calls while other threads
//! query (for example a logger that learns worked calls during a contest),
//! share a [`SharedDatabase`] instead.
//!
//! - Read operations (find, contains) acquire a shared read lock
//! - Write operations (add, load) acquire an exclusive write lock
//! - Multiple readers can proceed concurrently
//! - Writers block all other access

use std::io::BufRead;
use std::sync::Arc;

use parking_lot::RwLock;

use super::database::{Database, Match};
use super::entry::FieldSet;
use super::parser::EntryParser;
use crate::error::Result;

/// Single-writer/many-reader handle to a [`Database`]
#[derive(Clone, Default)]
pub struct SharedDatabase {
    inner: Arc<RwLock<Database>>,
}

impl SharedDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing database.
    pub fn from_database(database: Database) -> Self {
        Self {
            inner: Arc::new(RwLock::new(database)),
        }
    }

    /// Add a callsign with optional field values.
    ///
    /// Acquires an exclusive write lock.
    pub fn add<S: AsRef<str>>(&self, key: &str, values: &[S]) -> bool {
        self.inner.write().add(key, values)
    }

    /// Load more entries from a reader.
    ///
    /// Acquires an exclusive write lock for the entire read.
    pub fn load<R: BufRead, P: EntryParser + ?Sized>(
        &self,
        reader: R,
        parser: &P,
    ) -> Result<usize> {
        self.inner.write().load(reader, parser)
    }

    /// Acquires a shared read lock.
    pub fn find(&self, query: &str) -> Vec<Match> {
        self.inner.read().find(query)
    }

    /// Acquires a shared read lock.
    pub fn find_strings(&self, query: &str) -> Vec<String> {
        self.inner.read().find_strings(query)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn field_set(&self) -> FieldSet {
        self.inner.read().field_set().clone()
    }

    /// Get direct access to the underlying database (for advanced use).
    ///
    /// Returns a read guard that can be used for multiple operations.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, Database> {
        self.inner.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexing::ScpFormat;
    use std::thread;

    #[test]
    fn test_shared_add_and_find() {
        let db = SharedDatabase::new();
        db.add::<&str>("W1AW", &[]);
        db.add::<&str>("W1AX", &[]);

        assert_eq!(db.len(), 2);
        assert!(db.contains("w1aw"));
        assert_eq!(db.find_strings("W1AZ"), vec!["W1AW", "W1AX"]);
        assert!(db.field_set().is_empty());
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let seed = Database::read_scp("K1ABC\nDL1ABC\n".as_bytes()).unwrap();
        let db = SharedDatabase::from_database(seed);

        let writer = {
            let db = db.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    db.add::<&str>(&format!("N{}QRP", i % 10), &[]);
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let db = db.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let matches = db.find("K1ABC");
                        assert_eq!(matches[0].key(), "K1ABC");
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(db.len(), 12);
    }

    #[test]
    fn test_shared_load() {
        let db = SharedDatabase::new();
        let added = db.load("# header\nOH2BH\n\nOH2BH\n".as_bytes(), &ScpFormat).unwrap();
        assert_eq!(added, 1);
        assert_eq!(db.read().entries()[0].key(), "OH2BH");
    }
}
