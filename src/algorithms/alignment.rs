//! Edit alignment between a query and a candidate key
//!
//! Computes the Levenshtein distance with a full DP table and walks the table
//! back to recover the edit path (the "assembly"). The assembly is what lets the
//! ranking prefer a candidate that shares one long intact run with the query
//! over an equally distant candidate whose matching characters are scattered.
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(m*n) for the backtrace table
//!
//! Callsigns are short, so the quadratic table is a few hundred cells at most.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Matcher;

/// A single step of an alignment, read from the query towards the candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignmentOp {
    /// Character present at this position in both tokens
    Match(char),
    /// Query character replaced by a candidate character
    Substitute { from: char, to: char },
    /// Candidate character missing from the query
    Insert(char),
    /// Query character missing from the candidate
    Delete(char),
}

impl AlignmentOp {
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, AlignmentOp::Match(_))
    }
}

/// Ordered reconstruction of the edit path between two tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingAssembly {
    ops: Vec<AlignmentOp>,
}

impl MatchingAssembly {
    /// Length of the longest run of consecutive matched characters
    #[must_use]
    pub fn longest_part(&self) -> usize {
        let mut longest = 0;
        let mut current = 0;
        for op in &self.ops {
            if op.is_match() {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 0;
            }
        }
        longest
    }

    /// Total number of matched characters
    #[must_use]
    pub fn matched(&self) -> usize {
        self.ops.iter().filter(|op| op.is_match()).count()
    }

    pub fn ops(&self) -> &[AlignmentOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Rebuild the query side of the alignment
    #[must_use]
    pub fn source(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                AlignmentOp::Match(c) | AlignmentOp::Delete(c) => Some(c),
                AlignmentOp::Substitute { from, .. } => Some(from),
                AlignmentOp::Insert(_) => None,
            })
            .collect()
    }

    /// Rebuild the candidate side of the alignment
    #[must_use]
    pub fn target(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                AlignmentOp::Match(c) | AlignmentOp::Insert(c) => Some(c),
                AlignmentOp::Substitute { to, .. } => Some(to),
                AlignmentOp::Delete(_) => None,
            })
            .collect()
    }
}

/// Result of aligning two tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Minimum number of insertions, deletions and substitutions
    pub distance: usize,
    /// Normalized similarity in [0, 1]
    pub accuracy: f64,
    pub assembly: MatchingAssembly,
}

/// Default matcher: unit-cost edit alignment
///
/// Stateless calculator - all instances are equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMatcher;

impl EditMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Matcher for EditMatcher {
    fn align(&self, query: &str, candidate: &str) -> Alignment {
        align(query, candidate)
    }

    fn name(&self) -> &'static str {
        "edit"
    }
}

/// Align `query` against `candidate`.
///
/// # Example
/// ```
/// use partialcheck::algorithms::alignment::align;
///
/// let alignment = align("W1AZ", "W1AW");
/// assert_eq!(alignment.distance, 1);
/// assert_eq!(alignment.accuracy, 0.75);
/// assert_eq!(alignment.assembly.longest_part(), 3);
/// ```
#[must_use]
pub fn align(query: &str, candidate: &str) -> Alignment {
    let a: SmallVec<[char; 32]> = query.chars().collect();
    let b: SmallVec<[char; 32]> = candidate.chars().collect();
    align_chars(&a, &b)
}

/// Align two char slices. See [`align`].
#[must_use]
pub fn align_chars(a: &[char], b: &[char]) -> Alignment {
    let m = a.len();
    let n = b.len();

    let table = distance_table(a, b);
    let distance = table[m * (n + 1) + n];
    let assembly = backtrace(a, b, &table);

    Alignment {
        distance,
        accuracy: accuracy(distance, m, n),
        assembly,
    }
}

/// Normalize a distance against the longer of the two token lengths.
///
/// Two empty tokens are identical; one empty token shares nothing with the other.
#[inline]
#[must_use]
pub fn accuracy(distance: usize, len_a: usize, len_b: usize) -> f64 {
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 1.0;
    }
    (1.0 - (distance as f64 / max_len as f64)).clamp(0.0, 1.0)
}

/// Full Levenshtein table, row-major with `n + 1` columns
fn distance_table(a: &[char], b: &[char]) -> Vec<usize> {
    let m = a.len();
    let n = b.len();
    let cols = n + 1;
    let mut dp = vec![0usize; (m + 1) * cols];

    for j in 0..=n {
        dp[j] = j;
    }
    for i in 1..=m {
        dp[i * cols] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let substitution = dp[(i - 1) * cols + j - 1] + cost;
            let deletion = dp[(i - 1) * cols + j] + 1;
            let insertion = dp[i * cols + j - 1] + 1;
            dp[i * cols + j] = substitution.min(deletion).min(insertion);
        }
    }

    dp
}

/// Walk the table from the bottom-right corner back to the origin.
///
/// Ties prefer match, then substitution, then deletion, then insertion, so the
/// same pair of tokens always yields the same assembly.
fn backtrace(a: &[char], b: &[char], dp: &[usize]) -> MatchingAssembly {
    let cols = b.len() + 1;
    let mut ops = Vec::with_capacity(a.len().max(b.len()));
    let mut i = a.len();
    let mut j = b.len();

    while i > 0 || j > 0 {
        let here = dp[i * cols + j];
        if i > 0 && j > 0 {
            let diagonal = dp[(i - 1) * cols + j - 1];
            if a[i - 1] == b[j - 1] && here == diagonal {
                ops.push(AlignmentOp::Match(a[i - 1]));
                i -= 1;
                j -= 1;
                continue;
            }
            if here == diagonal + 1 {
                ops.push(AlignmentOp::Substitute { from: a[i - 1], to: b[j - 1] });
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && here == dp[(i - 1) * cols + j] + 1 {
            ops.push(AlignmentOp::Delete(a[i - 1]));
            i -= 1;
        } else {
            ops.push(AlignmentOp::Insert(b[j - 1]));
            j -= 1;
        }
    }

    ops.reverse();
    MatchingAssembly { ops }
}
