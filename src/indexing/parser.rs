//! Line formats for populating a database
//!
//! - SCP: one callsign per line, `#` starts a comment line
//! - Call history: comma-separated records whose columns are declared by a
//!   leading `!!Order!!` line
//!
//! Any `Fn(&str) -> Option<Entry>` can be used as a line parser, so other
//! formats plug into [`Database::read`](crate::Database::read) without changes
//! to the index.

use super::entry::{Entry, FieldSet};

/// Maps one trimmed, non-blank line to an entry, or rejects it
pub trait EntryParser {
    fn parse_entry(&self, line: &str) -> Option<Entry>;
}

impl<F> EntryParser for F
where
    F: Fn(&str) -> Option<Entry>,
{
    fn parse_entry(&self, line: &str) -> Option<Entry> {
        self(line)
    }
}

/// The MASTER.SCP format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScpFormat;

impl EntryParser for ScpFormat {
    fn parse_entry(&self, line: &str) -> Option<Entry> {
        if is_comment(line) {
            return None;
        }
        Some(Entry::new(line))
    }
}

/// Whether the first non-space character of `line` is `#`
#[inline]
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Marker that opens the column declaration of a call history file
pub const ORDER_MARKER: &str = "!!Order!!";

/// Parse a `!!Order!!,Call,Name,...` line into the declared field set
pub fn parse_order_line(line: &str) -> Option<FieldSet> {
    let mut columns = line.split(',');
    let marker = columns.next()?.trim();
    if !marker.eq_ignore_ascii_case(ORDER_MARKER) {
        return None;
    }
    Some(FieldSet::new(columns.map(str::trim)))
}

/// Split a call history record into its raw column values
pub fn split_record(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scp_format() {
        assert_eq!(ScpFormat.parse_entry("w1aw").map(|e| e.key().to_string()), Some("W1AW".into()));
        assert!(ScpFormat.parse_entry("# Master.scp comment").is_none());
        assert!(ScpFormat.parse_entry("  #indented").is_none());
    }

    #[test]
    fn test_closure_parser() {
        let only_k = |line: &str| line.starts_with('K').then(|| Entry::new(line));
        assert!(only_k.parse_entry("K1ABC").is_some());
        assert!(only_k.parse_entry("W1AW").is_none());
    }

    #[test]
    fn test_parse_order_line() {
        let fields = parse_order_line("!!Order!!,Call,Name,Loc1,").unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields.call_position(), Some(0));
        assert_eq!(fields.position("Loc1"), Some(2));

        assert!(parse_order_line("DL1ABC,Hans").is_none());
    }

    #[test]
    fn test_split_record() {
        assert_eq!(split_record("DL1ABC, Hans ,JO31,"), vec!["DL1ABC", "Hans", "JO31", ""]);
    }
}
