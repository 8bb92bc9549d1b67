//! Placeholder-replacing anonymizer.

use crate::engine::{Anonymizer, RecognizerResult};
use crate::error::{PiiError, PiiResult};

/// Replaces every recognized span with `<ENTITY_TYPE>`.
///
/// Overlapping spans of the same entity type are merged into one. Remaining
/// overlaps are resolved before replacing: the higher score wins, then the
/// longer span, then the earlier one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceAnonymizer;

impl ReplaceAnonymizer {
    /// Create the anonymizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn placeholder(entity_type: &str) -> String {
        format!("<{entity_type}>")
    }
}

impl Anonymizer for ReplaceAnonymizer {
    fn anonymize(&self, text: &str, results: &[RecognizerResult]) -> PiiResult<String> {
        for result in results {
            if result.start > result.end
                || result.end > text.len()
                || !text.is_char_boundary(result.start)
                || !text.is_char_boundary(result.end)
            {
                return Err(PiiError::Engine(format!(
                    "span {}..{} does not fit text of {} bytes",
                    result.start,
                    result.end,
                    text.len()
                )));
            }
        }

        let kept = resolve_overlaps(results);

        let mut output = text.to_string();
        for result in kept.iter().rev() {
            output.replace_range(
                result.start..result.end,
                &Self::placeholder(&result.entity_type),
            );
        }

        Ok(output)
    }
}

/// Pick a non-overlapping subset of `results`, sorted by start offset.
fn resolve_overlaps(results: &[RecognizerResult]) -> Vec<RecognizerResult> {
    let mut candidates = merge_same_type(results);

    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.len().cmp(&a.len()))
            .then_with(|| a.start.cmp(&b.start))
    });

    let mut kept: Vec<RecognizerResult> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !kept.iter().any(|k| k.overlaps(&candidate)) {
            kept.push(candidate);
        }
    }

    kept.sort_by_key(|r| r.start);
    kept
}

/// Union overlapping spans that share an entity type, keeping the best score.
fn merge_same_type(results: &[RecognizerResult]) -> Vec<RecognizerResult> {
    let mut sorted: Vec<&RecognizerResult> = results.iter().filter(|r| !r.is_empty()).collect();
    sorted.sort_by(|a, b| {
        a.entity_type
            .cmp(&b.entity_type)
            .then_with(|| a.start.cmp(&b.start))
    });

    let mut merged: Vec<RecognizerResult> = Vec::with_capacity(sorted.len());
    for result in sorted {
        match merged.last_mut() {
            Some(last) if last.entity_type == result.entity_type && last.overlaps(result) => {
                last.end = last.end.max(result.end);
                last.score = last.score.max(result.score);
            }
            _ => merged.push(result.clone()),
        }
    }

    merged
}
