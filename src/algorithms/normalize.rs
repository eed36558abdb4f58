//! Key normalization and fingerprinting
//!
//! Every key stored in a database and every query goes through [`normalize_key`]
//! first, so that `w1aw`, ` W1AW ` and `W1AW` all address the same entry.

use smallvec::SmallVec;

/// Distinct characters of a key, sorted ascending
pub type Fingerprint = SmallVec<[char; 16]>;

/// Trim surrounding whitespace and convert to uppercase
#[must_use]
pub fn normalize_key(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Compute the set of distinct characters occurring in `key`
#[must_use]
pub fn fingerprint(key: &str) -> Fingerprint {
    let mut chars: Fingerprint = key.chars().collect();
    chars.sort_unstable();
    chars.dedup();
    chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  w1aw "), "W1AW");
        assert_eq!(normalize_key("dl1abc/p"), "DL1ABC/P");
        assert_eq!(normalize_key("   "), "");
    }

    #[test]
    fn test_fingerprint_distinct_sorted() {
        assert_eq!(fingerprint("W1AW").as_slice(), &['1', 'A', 'W']);
        assert_eq!(fingerprint("AAA").as_slice(), &['A']);
        assert!(fingerprint("").is_empty());
    }
}
