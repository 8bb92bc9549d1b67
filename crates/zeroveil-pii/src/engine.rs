//! Engine traits for entity recognition and anonymization.

use crate::error::PiiResult;
use serde::{Deserialize, Serialize};

/// A recognized entity span.
///
/// `start..end` is a byte range into the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerResult {
    /// Entity type label, e.g. `EMAIL_ADDRESS`
    pub entity_type: String,

    /// Start byte offset (inclusive)
    pub start: usize,

    /// End byte offset (exclusive)
    pub end: usize,

    /// Confidence in `[0, 1]`
    pub score: f32,
}

impl RecognizerResult {
    /// Create a result.
    #[must_use]
    pub fn new(entity_type: impl Into<String>, start: usize, end: usize, score: f32) -> Self {
        Self {
            entity_type: entity_type.into(),
            start,
            end,
            score,
        }
    }

    /// Span length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two spans share at least one byte.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Finds PII entity spans in text.
///
/// Implementations must be thread-safe; the default scrubber is shared
/// process-wide.
pub trait EntityRecognizer: Send + Sync {
    /// Analyze `text` written in `language`.
    ///
    /// # Errors
    /// Returns error if the language is unsupported or the engine fails.
    fn analyze(&self, text: &str, language: &str) -> PiiResult<Vec<RecognizerResult>>;
}

/// Rewrites recognized spans.
pub trait Anonymizer: Send + Sync {
    /// Produce the anonymized text for `results` found in `text`.
    ///
    /// # Errors
    /// Returns error if a span does not fit the text.
    fn anonymize(&self, text: &str, results: &[RecognizerResult]) -> PiiResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps() {
        let a = RecognizerResult::new("PERSON", 0, 5, 0.8);
        let b = RecognizerResult::new("EMAIL_ADDRESS", 4, 10, 1.0);
        let c = RecognizerResult::new("URL", 10, 12, 0.5);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!b.overlaps(&c));
        assert_eq!(b.len(), 6);
        assert!(!c.is_empty());
    }

    #[test]
    fn test_result_serialization() {
        let result = RecognizerResult::new("US_SSN", 5, 16, 0.85);
        let json = serde_json::to_string(&result).expect("serialize result");
        assert!(json.contains(r#""entity_type":"US_SSN""#));
    }
}
