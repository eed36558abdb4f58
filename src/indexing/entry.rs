//! Entries and the auxiliary field schema
//!
//! An [`Entry`] is an immutable, normalized callsign together with its
//! fingerprint and, when the database carries a schema, the values of the
//! schema fields for that callsign.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithms::normalize::{fingerprint, normalize_key, Fingerprint};

/// Name of an auxiliary data field
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Column holding the callsign itself; its value becomes the entry key
    pub const CALL: &'static str = "Call";
    /// Column whose values are dropped
    pub const IGNORE: &'static str = "Ignore";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_call(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::CALL)
    }

    /// Reserved fields are never stored as entry values
    pub fn is_reserved(&self) -> bool {
        self.is_call() || self.0.eq_ignore_ascii_case(Self::IGNORE)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Ordered schema of field names
///
/// The position of a name is the position of its value in a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(Vec<FieldName>);

impl FieldSet {
    pub fn new<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<FieldName>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FieldName> {
        self.0.get(index)
    }

    /// Position of the first field with the given name (case-insensitive)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|f| f.as_str().eq_ignore_ascii_case(name))
    }

    /// Position of the callsign column, if the schema has one
    pub fn call_position(&self) -> Option<usize> {
        self.position(FieldName::CALL)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldName> {
        self.0.iter()
    }
}

/// Field values of one entry
pub type FieldValues = BTreeMap<FieldName, String>;

/// An immutable callsign record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    key: String,
    fingerprint: Fingerprint,
    field_values: Option<FieldValues>,
}

impl Entry {
    /// Create a key-only entry. The key is normalized (trimmed, uppercase).
    pub fn new(key: &str) -> Self {
        Self::build(key, None)
    }

    /// Create an entry carrying field values
    pub fn with_values(key: &str, values: FieldValues) -> Self {
        Self::build(key, Some(values))
    }

    fn build(key: &str, field_values: Option<FieldValues>) -> Self {
        let key = normalize_key(key);
        let fingerprint = fingerprint(&key);
        Self {
            key,
            fingerprint,
            field_values,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Distinct characters of the key, sorted
    pub fn fingerprint(&self) -> &[char] {
        &self.fingerprint
    }

    pub fn field_values(&self) -> Option<&FieldValues> {
        self.field_values.as_ref()
    }

    /// Value of a schema field, if this entry carries one
    pub fn get(&self, field: &str) -> Option<&str> {
        self.field_values
            .as_ref()?
            .iter()
            .find(|(name, _)| name.as_str().eq_ignore_ascii_case(field))
            .map(|(_, value)| value.as_str())
    }
}
