//! Token alignment and normalization
//!
//! The alignment is a standalone function for composability, plus a
//! trait-based interface so a search can be driven by a different matcher.

pub mod alignment;
pub mod normalize;

pub use alignment::*;
pub use normalize::*;

/// Trait for pairwise token matchers.
///
/// Implementations must be pure: the same pair of tokens always produces the
/// same alignment, and `accuracy` stays within [0, 1].
pub trait Matcher: Send + Sync {
    fn align(&self, query: &str, candidate: &str) -> Alignment;

    /// Name of the matcher for debugging/logging
    fn name(&self) -> &'static str;
}
