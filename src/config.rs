//! Search configuration
//!
//! The defaults reproduce classic super check partial behavior: queries shorter
//! than three characters are not searched, and candidates must reach an accuracy
//! of 0.65 to be reported.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default minimum accuracy for a candidate to be reported (inclusive)
pub const DEFAULT_ACCURACY_THRESHOLD: f64 = 0.65;

/// Default minimum number of query characters
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Tunables for [`Database::find`](crate::Database::find)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Candidates with an accuracy below this value are dropped
    pub accuracy_threshold: f64,
    /// Queries with fewer characters return no results
    pub min_query_len: usize,
}

impl SearchConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set the accuracy threshold
    #[must_use]
    pub fn with_accuracy_threshold(mut self, threshold: f64) -> Self {
        self.accuracy_threshold = threshold;
        self
    }

    /// Builder: Set the minimum query length
    #[must_use]
    pub fn with_min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = len;
        self
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if !self.accuracy_threshold.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "accuracy_threshold must be a finite number, got {}",
                self.accuracy_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.accuracy_threshold) {
            return Err(Error::InvalidConfig(format!(
                "accuracy_threshold must be in range [0.0, 1.0], got {}",
                self.accuracy_threshold
            )));
        }
        if self.min_query_len == 0 {
            return Err(Error::InvalidConfig("min_query_len must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Whether a candidate with the given accuracy is reported
    #[inline]
    #[must_use]
    pub fn accepts(&self, accuracy: f64) -> bool {
        accuracy >= self.accuracy_threshold
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            accuracy_threshold: DEFAULT_ACCURACY_THRESHOLD,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.accuracy_threshold, 0.65);
        assert_eq!(config.min_query_len, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let config = SearchConfig::default();
        assert!(config.accepts(0.65));
        assert!(config.accepts(1.0));
        assert!(!config.accepts(0.65 - f64::EPSILON));
        assert!(!config.accepts(0.0));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(SearchConfig::new().with_accuracy_threshold(1.5).validate().is_err());
        assert!(SearchConfig::new().with_accuracy_threshold(-0.1).validate().is_err());
        assert!(SearchConfig::new().with_accuracy_threshold(f64::NAN).validate().is_err());
        assert!(SearchConfig::new().with_min_query_len(0).validate().is_err());
        assert!(SearchConfig::new().with_min_query_len(1).validate().is_ok());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"min_query_len": 4}"#).unwrap();
        assert_eq!(config.min_query_len, 4);
        assert_eq!(config.accuracy_threshold, DEFAULT_ACCURACY_THRESHOLD);
    }
}
