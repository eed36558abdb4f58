//! Fingerprint index of callsigns with parallel ranked search
//!
//! Every entry is indexed under each distinct character of its key. A query
//! only aligns against entries that share at least one character with it, one
//! parallel task per query character, and the accepted matches are merged,
//! deduplicated and sorted into a single ranked list.
//!
//! The database is build-once/read-many: population takes `&mut self`, search
//! takes `&self`. Wrap it in [`SharedDatabase`](super::SharedDatabase) when
//! writers and readers need to run concurrently.

use std::cmp::Ordering;
use std::io::BufRead;

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::entry::{Entry, FieldName, FieldSet, FieldValues};
use super::entry_set::EntrySet;
use super::parser::{is_comment, parse_order_line, split_record, EntryParser, ScpFormat};
use crate::algorithms::normalize::normalize_key;
use crate::algorithms::{EditMatcher, MatchingAssembly, Matcher};
use crate::config::SearchConfig;
use crate::error::Result;

/// A candidate accepted by [`Database::find`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    entry: Entry,
    distance: usize,
    accuracy: f64,
    longest_part: usize,
    assembly: MatchingAssembly,
}

impl Match {
    pub fn key(&self) -> &str {
        self.entry.key()
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn assembly(&self) -> &MatchingAssembly {
        &self.assembly
    }

    /// Longest run of characters the candidate shares intact with the query
    pub fn longest_part(&self) -> usize {
        self.longest_part
    }

    /// Ranking order: better matches sort first.
    ///
    /// Accuracy descending, then longest matched run descending, then key
    /// length ascending, then key ascending.
    pub fn ranking(&self, other: &Self) -> Ordering {
        other
            .accuracy
            .total_cmp(&self.accuracy)
            .then_with(|| other.longest_part.cmp(&self.longest_part))
            .then_with(|| self.key().chars().count().cmp(&other.key().chars().count()))
            .then_with(|| self.key().cmp(other.key()))
    }

    pub fn is_better_than(&self, other: &Self) -> bool {
        self.ranking(other) == Ordering::Less
    }
}

/// The callsign database
#[derive(Debug, Clone, Default)]
pub struct Database {
    field_set: FieldSet,
    config: SearchConfig,
    /// All entries, in insertion order
    entries: Vec<Entry>,
    /// Key to entry id
    keys: AHashMap<String, usize>,
    /// Fingerprint character to the ids of every entry containing it
    buckets: AHashMap<char, EntrySet>,
}

impl Database {
    /// Create an empty database without auxiliary fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty database with the given field schema
    pub fn with_fields(field_set: FieldSet) -> Self {
        Self {
            field_set,
            ..Self::default()
        }
    }

    /// Builder: Replace the search configuration
    pub fn with_config(mut self, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Read a database in the MASTER.SCP format
    pub fn read_scp<R: BufRead>(reader: R) -> Result<Self> {
        Self::read(reader, ScpFormat)
    }

    /// Read a database using the given line parser
    pub fn read<R: BufRead, P: EntryParser>(reader: R, parser: P) -> Result<Self> {
        let mut database = Self::new();
        database.load(reader, &parser)?;
        Ok(database)
    }

    /// Add every entry the parser accepts from `reader`.
    ///
    /// Lines are trimmed and blank lines skipped before they reach the parser.
    /// Rejected lines are dropped. Returns the number of new entries.
    pub fn load<R: BufRead, P: EntryParser + ?Sized>(
        &mut self,
        reader: R,
        parser: &P,
    ) -> Result<usize> {
        let mut lines = 0usize;
        let mut rejected = 0usize;
        let mut added = 0usize;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            lines += 1;
            match parser.parse_entry(line) {
                Some(entry) => {
                    if self.insert(entry) {
                        added += 1;
                    }
                }
                None => {
                    trace!(line, "rejected line");
                    rejected += 1;
                }
            }
        }

        debug!(lines, rejected, added, entries = self.len(), "database loaded");
        Ok(added)
    }

    /// Read a database in the call history format.
    ///
    /// The first `!!Order!!` line declares the field set; records before it
    /// are skipped, and so are records without a callsign.
    pub fn read_call_history<R: BufRead>(reader: R) -> Result<Self> {
        let mut database: Option<Self> = None;
        let mut skipped = 0usize;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || is_comment(line) {
                continue;
            }

            if let Some(field_set) = parse_order_line(line) {
                if database.is_some() {
                    warn!(line, "ignoring repeated order line");
                } else {
                    if field_set.call_position().is_none() {
                        warn!(line, "order line declares no Call column");
                    }
                    database = Some(Self::with_fields(field_set));
                }
                continue;
            }

            let Some(db) = database.as_mut() else {
                skipped += 1;
                continue;
            };
            let values = split_record(line);
            let call = db
                .field_set
                .call_position()
                .and_then(|pos| values.get(pos))
                .filter(|call| !call.is_empty());
            match call {
                Some(call) => {
                    db.add(call, &values);
                }
                None => skipped += 1,
            }
        }

        let database = database.unwrap_or_default();
        debug!(
            skipped,
            fields = database.field_set.len(),
            entries = database.len(),
            "call history loaded"
        );
        Ok(database)
    }

    /// Add a callsign with optional field values.
    ///
    /// Values are assigned to the schema fields by position only when exactly
    /// one value per field is given; otherwise the entry is stored key-only.
    /// The `Call` and `Ignore` columns are never stored. Returns false if the
    /// key is empty or already present.
    pub fn add<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> bool {
        let field_values = if !values.is_empty() && values.len() == self.field_set.len() {
            let mut field_values = FieldValues::new();
            for (name, value) in self.field_set.iter().zip(values) {
                if name.is_reserved() || name.as_str().is_empty() {
                    continue;
                }
                field_values.insert(name.clone(), value.as_ref().trim().to_string());
            }
            Some(field_values)
        } else {
            if !values.is_empty() {
                debug!(
                    key,
                    values = values.len(),
                    fields = self.field_set.len(),
                    "field count mismatch, storing key only"
                );
            }
            None
        };

        let entry = match field_values {
            Some(values) => Entry::with_values(key, values),
            None => Entry::new(key),
        };
        self.insert(entry)
    }

    /// Insert a prepared entry. Returns false if the key is empty or already present.
    pub fn insert(&mut self, entry: Entry) -> bool {
        if entry.key().is_empty() || self.keys.contains_key(entry.key()) {
            return false;
        }

        let id = self.entries.len();
        for &c in entry.fingerprint() {
            self.buckets.entry(c).or_default().insert(id);
        }
        self.keys.insert(entry.key().to_string(), id);
        self.entries.push(entry);
        true
    }

    /// Find all entries similar to `query`, best match first
    pub fn find(&self, query: &str) -> Vec<Match> {
        self.find_with(query, &EditMatcher)
    }

    /// Keys of [`find`](Self::find), in the same order
    pub fn find_strings(&self, query: &str) -> Vec<String> {
        self.find(query)
            .iter()
            .map(|m| m.key().to_string())
            .collect()
    }

    /// Find with a caller-supplied matcher
    pub fn find_with<M: Matcher + ?Sized>(&self, query: &str, matcher: &M) -> Vec<Match> {
        let query = normalize_key(query);
        if query.chars().count() < self.config.min_query_len {
            return Vec::new();
        }
        let source = Entry::new(&query);

        // one task per query character that has a bucket
        let buckets: Vec<&EntrySet> = source
            .fingerprint()
            .iter()
            .filter_map(|c| self.buckets.get(c))
            .collect();
        let candidates: usize = buckets.iter().map(|b| b.len()).sum();

        let accepted: Vec<Match> = buckets
            .par_iter()
            .flat_map_iter(|bucket| self.match_bucket(&source, bucket, matcher))
            .collect();

        let mut seen: AHashSet<&str> = AHashSet::with_capacity(accepted.len());
        let mut unique: Vec<&Match> = accepted.iter().filter(|m| seen.insert(m.key())).collect();
        unique.sort_by(|a, b| a.ranking(b));
        let matches: Vec<Match> = unique.into_iter().cloned().collect();

        trace!(
            query = %query,
            matcher = matcher.name(),
            buckets = buckets.len(),
            candidates,
            hits = matches.len(),
            "find"
        );
        matches
    }

    fn match_bucket<M: Matcher + ?Sized>(
        &self,
        source: &Entry,
        bucket: &EntrySet,
        matcher: &M,
    ) -> Vec<Match> {
        bucket
            .ids()
            .iter()
            .filter_map(|&id| self.entries.get(id))
            .filter_map(|entry| {
                let alignment = matcher.align(source.key(), entry.key());
                if !self.config.accepts(alignment.accuracy) {
                    return None;
                }
                Some(Match {
                    entry: entry.clone(),
                    distance: alignment.distance,
                    accuracy: alignment.accuracy,
                    longest_part: alignment.assembly.longest_part(),
                    assembly: alignment.assembly,
                })
            })
            .collect()
    }

    /// The auxiliary field schema
    pub fn field_set(&self) -> &FieldSet {
        &self.field_set
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the database contains `key` (normalized before lookup)
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(&normalize_key(key))
    }

    /// Get the entry for `key` (normalized before lookup)
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.keys
            .get(&normalize_key(key))
            .and_then(|&id| self.entries.get(id))
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of distinct fingerprint characters
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of entries indexed under `c`
    pub fn bucket_len(&self, c: char) -> usize {
        self.buckets.get(&c).map_or(0, EntrySet::len)
    }

    /// Value of `field` for `key`, if present
    pub fn field_value(&self, key: &str, field: &FieldName) -> Option<&str> {
        self.get(key)?.get(field.as_str())
    }
}
