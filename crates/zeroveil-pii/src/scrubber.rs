//! Scrubbing pipeline: recognize, then anonymize.

use crate::engine::{Anonymizer, EntityRecognizer};
use crate::error::PiiResult;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Language used by [`scrub`].
pub const DEFAULT_LANGUAGE: &str = "en";

/// Output of a scrub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrubResult {
    /// Text with every recognized entity replaced
    pub text: String,

    /// Number of entities the recognizer reported
    pub entities_found: usize,
}

impl ScrubResult {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            entities_found: 0,
        }
    }
}

/// A recognizer and an anonymizer wired together.
#[derive(Clone)]
pub struct Scrubber {
    recognizer: Arc<dyn EntityRecognizer>,
    anonymizer: Arc<dyn Anonymizer>,
}

impl std::fmt::Debug for Scrubber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scrubber").finish_non_exhaustive()
    }
}

impl Scrubber {
    /// Build a scrubber from custom engines.
    #[must_use]
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, anonymizer: Arc<dyn Anonymizer>) -> Self {
        Self {
            recognizer,
            anonymizer,
        }
    }

    /// Build a scrubber from the bundled engines.
    ///
    /// `PERSON` coverage is limited to common English given names and there
    /// is no `LOCATION` detection. For either, build a
    /// [`crate::PatternRecognizer`] with deny lists and pass it to
    /// [`Scrubber::new`].
    ///
    /// # Errors
    /// Returns [`crate::PiiError::BackendUnavailable`] if either bundled engine was
    /// compiled out.
    pub fn with_default_engines() -> PiiResult<Self> {
        let recognizer = default_recognizer()?;
        let anonymizer = default_anonymizer()?;
        Ok(Self::new(recognizer, anonymizer))
    }

    /// Scrub `text` written in `language`.
    ///
    /// Empty input short-circuits without touching either engine. When
    /// nothing is recognized the text comes back unchanged.
    pub fn scrub(&self, text: &str, language: &str) -> PiiResult<ScrubResult> {
        if text.is_empty() {
            return Ok(ScrubResult::unchanged(text));
        }

        let results = self.recognizer.analyze(text, language)?;
        tracing::debug!("PII recognizer found {} entities", results.len());

        if results.is_empty() {
            return Ok(ScrubResult::unchanged(text));
        }

        let anonymized = self.anonymizer.anonymize(text, &results)?;

        Ok(ScrubResult {
            text: anonymized,
            entities_found: results.len(),
        })
    }
}

static SHARED: OnceCell<Scrubber> = OnceCell::new();

fn shared() -> PiiResult<&'static Scrubber> {
    SHARED.get_or_try_init(|| {
        tracing::debug!("Initializing shared PII scrubber");
        Scrubber::with_default_engines()
    })
}

/// Scrub English `text` with the shared default scrubber.
///
/// # Errors
/// Returns [`crate::PiiError::BackendUnavailable`] for non-empty input when the
/// bundled engines are compiled out.
pub fn scrub(text: &str) -> PiiResult<ScrubResult> {
    scrub_with_language(text, DEFAULT_LANGUAGE)
}

/// Scrub `text` written in `language` with the shared default scrubber.
pub fn scrub_with_language(text: &str, language: &str) -> PiiResult<ScrubResult> {
    if text.is_empty() {
        return Ok(ScrubResult::unchanged(text));
    }

    shared()?.scrub(text, language)
}

/// Whether the bundled engines are compiled in.
///
/// `true` means [`scrub`] works, not that every entity type is covered; see
/// [`Scrubber::with_default_engines`].
#[must_use]
pub fn is_available() -> bool {
    cfg!(all(feature = "analyzer", feature = "anonymizer"))
}

#[cfg(feature = "analyzer")]
fn default_recognizer() -> PiiResult<Arc<dyn EntityRecognizer>> {
    Ok(Arc::new(crate::pattern::PatternRecognizer::new()))
}

#[cfg(not(feature = "analyzer"))]
fn default_recognizer() -> PiiResult<Arc<dyn EntityRecognizer>> {
    Err(crate::error::PiiError::BackendUnavailable {
        component: "analyzer",
        hint: "enable the `analyzer` feature of zeroveil-pii",
    })
}

#[cfg(feature = "anonymizer")]
fn default_anonymizer() -> PiiResult<Arc<dyn Anonymizer>> {
    Ok(Arc::new(crate::anonymizer::ReplaceAnonymizer::new()))
}

#[cfg(not(feature = "anonymizer"))]
fn default_anonymizer() -> PiiResult<Arc<dyn Anonymizer>> {
    Err(crate::error::PiiError::BackendUnavailable {
        component: "anonymizer",
        hint: "enable the `anonymizer` feature of zeroveil-pii",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RecognizerResult;
    use crate::error::PiiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRecognizer {
        calls: AtomicUsize,
        results: Vec<RecognizerResult>,
    }

    impl EntityRecognizer for CountingRecognizer {
        fn analyze(&self, _text: &str, _language: &str) -> PiiResult<Vec<RecognizerResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.clone())
        }
    }

    struct CountingAnonymizer {
        calls: AtomicUsize,
    }

    impl Anonymizer for CountingAnonymizer {
        fn anonymize(&self, _text: &str, results: &[RecognizerResult]) -> PiiResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("[{} redacted]", results.len()))
        }
    }

    fn stubs(
        results: Vec<RecognizerResult>,
    ) -> (Arc<CountingRecognizer>, Arc<CountingAnonymizer>, Scrubber) {
        let recognizer = Arc::new(CountingRecognizer {
            calls: AtomicUsize::new(0),
            results,
        });
        let anonymizer = Arc::new(CountingAnonymizer {
            calls: AtomicUsize::new(0),
        });
        let scrubber = Scrubber::new(recognizer.clone(), anonymizer.clone());
        (recognizer, anonymizer, scrubber)
    }

    #[test]
    fn test_empty_input_skips_engines() {
        let (recognizer, anonymizer, scrubber) = stubs(Vec::new());

        let result = scrubber.scrub("", "en").expect("scrub");
        assert_eq!(result.text, "");
        assert_eq!(result.entities_found, 0);
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(anonymizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_entities_returns_original() {
        let (recognizer, anonymizer, scrubber) = stubs(Vec::new());

        let result = scrubber.scrub("just a sentence", "en").expect("scrub");
        assert_eq!(result.text, "just a sentence");
        assert_eq!(result.entities_found, 0);
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(anonymizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_entities_counted_from_recognizer() {
        let (_, anonymizer, scrubber) = stubs(vec![
            RecognizerResult::new("PERSON", 0, 4, 0.85),
            RecognizerResult::new("EMAIL_ADDRESS", 8, 20, 1.0),
        ]);

        let result = scrubber.scrub("John at j@example.com", "en").expect("scrub");
        assert_eq!(result.entities_found, 2);
        assert_eq!(result.text, "[2 redacted]");
        assert_eq!(anonymizer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_recognizer_error_propagates() {
        struct Failing;
        impl EntityRecognizer for Failing {
            fn analyze(&self, _: &str, language: &str) -> PiiResult<Vec<RecognizerResult>> {
                Err(PiiError::UnsupportedLanguage(language.to_string()))
            }
        }

        let (_, anonymizer, _) = stubs(Vec::new());
        let scrubber = Scrubber::new(Arc::new(Failing), anonymizer);
        let result = scrubber.scrub("Hallo Welt", "de");
        assert!(matches!(result, Err(PiiError::UnsupportedLanguage(_))));
    }

    #[test]
    fn test_global_empty_input_needs_no_backend() {
        let result = scrub("").expect("empty scrub never fails");
        assert_eq!(result, ScrubResult::unchanged(""));
    }

    #[test]
    fn test_availability_matches_features() {
        assert_eq!(
            is_available(),
            cfg!(feature = "analyzer") && cfg!(feature = "anonymizer")
        );
    }

    #[cfg(not(feature = "analyzer"))]
    #[test]
    fn test_missing_analyzer_reported() {
        let err = scrub("jane@example.com").expect_err("analyzer compiled out");
        assert!(matches!(
            err,
            PiiError::BackendUnavailable {
                component: "analyzer",
                ..
            }
        ));
    }
}
