//! Pattern-based entity recognizer.

use crate::engine::{EntityRecognizer, RecognizerResult};
use crate::error::{PiiError, PiiResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// Entity recognizer driven by regular expressions and deny lists.
///
/// Default patterns cover `EMAIL_ADDRESS`, `PHONE_NUMBER`, `CREDIT_CARD`,
/// `US_SSN`, `IP_ADDRESS` and `URL`, plus `PERSON` for capitalized common
/// English given names (with an optional capitalized surname). Names outside
/// that list and `LOCATION` are not recognized by default; register them with
/// [`PatternRecognizer::with_deny_list`]. Deny lists match whole words,
/// case-sensitively.
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    patterns: Vec<EntityPattern>,
    languages: Vec<String>,
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternRecognizer {
    /// Create a recognizer with the default patterns, supporting English.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: default_patterns(),
            languages: vec!["en".to_string()],
        }
    }

    /// Create a recognizer with no patterns at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            languages: vec!["en".to_string()],
        }
    }

    /// Add a custom pattern.
    ///
    /// # Errors
    /// Returns error if `pattern` is not a valid regular expression.
    pub fn with_pattern(
        mut self,
        entity_type: impl Into<String>,
        pattern: &str,
        score: f32,
    ) -> PiiResult<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| PiiError::Engine(format!("invalid pattern {pattern:?}: {e}")))?;

        self.patterns.push(EntityPattern {
            entity_type: entity_type.into(),
            regex,
            score,
            validate: None,
        });
        Ok(self)
    }

    /// Add a deny list: every whole-word occurrence of any entry is reported
    /// as `entity_type` with score 1.0.
    ///
    /// # Errors
    /// Returns error if the combined list does not fit in a single compiled
    /// regex (very large lists exceed the regex size limit).
    pub fn with_deny_list<I, S>(
        mut self,
        entity_type: impl Into<String>,
        words: I,
    ) -> PiiResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entity_type = entity_type.into();
        let alternatives: Vec<String> = words
            .into_iter()
            .map(|w| regex::escape(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();

        if alternatives.is_empty() {
            return Ok(self);
        }

        let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
        let regex = Regex::new(&pattern).map_err(|e| {
            PiiError::Engine(format!(
                "deny list for {entity_type} ({} entries) rejected: {e}",
                alternatives.len()
            ))
        })?;

        self.patterns.push(EntityPattern {
            entity_type,
            regex,
            score: 1.0,
            validate: None,
        });
        Ok(self)
    }

    /// Replace the supported language list.
    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Languages this recognizer accepts.
    #[must_use]
    pub fn supported_languages(&self) -> &[String] {
        &self.languages
    }
}

impl EntityRecognizer for PatternRecognizer {
    fn analyze(&self, text: &str, language: &str) -> PiiResult<Vec<RecognizerResult>> {
        if !self.languages.iter().any(|l| l == language) {
            return Err(PiiError::UnsupportedLanguage(language.to_string()));
        }

        let mut results: Vec<RecognizerResult> = Vec::new();

        for pattern in &self.patterns {
            for matched in pattern.regex.find_iter(text) {
                if let Some(validate) = pattern.validate {
                    if !validate(matched.as_str()) {
                        continue;
                    }
                }

                let result = RecognizerResult::new(
                    pattern.entity_type.clone(),
                    matched.start(),
                    matched.end(),
                    pattern.score,
                );
                match results.iter_mut().find(|r| {
                    r.entity_type == result.entity_type
                        && r.start == result.start
                        && r.end == result.end
                }) {
                    Some(existing) => existing.score = existing.score.max(result.score),
                    None => results.push(result),
                }
            }
        }

        results.sort_by_key(|r| (r.start, r.end));
        Ok(results)
    }
}

/// A single detection pattern with an optional post-match check.
#[derive(Clone)]
struct EntityPattern {
    entity_type: String,
    regex: Regex,
    score: f32,
    validate: Option<fn(&str) -> bool>,
}

impl std::fmt::Debug for EntityPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityPattern")
            .field("entity_type", &self.entity_type)
            .field("regex", &self.regex.as_str())
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

fn default_patterns() -> Vec<EntityPattern> {
    let pattern = |entity_type: &str,
                   regex: &Lazy<Regex>,
                   score: f32,
                   validate: Option<fn(&str) -> bool>| EntityPattern {
        entity_type: entity_type.to_string(),
        regex: Regex::clone(regex),
        score,
        validate,
    };

    vec![
        pattern("EMAIL_ADDRESS", &EMAIL_REGEX, 1.0, None),
        pattern("PERSON", &PERSON_REGEX, 0.6, None),
        pattern("URL", &URL_REGEX, 0.6, None),
        pattern("PHONE_NUMBER", &PHONE_REGEX, 0.75, None),
        pattern("US_SSN", &SSN_REGEX, 0.85, Some(valid_ssn)),
        pattern("CREDIT_CARD", &CREDIT_CARD_REGEX, 1.0, Some(luhn_valid)),
        pattern("IP_ADDRESS", &IPV4_REGEX, 0.95, Some(valid_ipv4)),
    ]
}

/// Luhn checksum over the digits of `candidate`.
fn luhn_valid(candidate: &str) -> bool {
    let digits: Vec<u32> = candidate.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 13 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Rejects the ranges the SSA never issues (000, 666, 9xx area; 00 group; 0000 serial).
fn valid_ssn(candidate: &str) -> bool {
    let parts: Vec<&str> = candidate.split('-').collect();
    match parts.as_slice() {
        [area, group, serial] => {
            *area != "000"
                && *area != "666"
                && !area.starts_with('9')
                && *group != "00"
                && *serial != "0000"
        }
        _ => false,
    }
}

fn valid_ipv4(candidate: &str) -> bool {
    candidate.split('.').all(|octet| octet.parse::<u8>().is_ok())
}

// Compiled regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"']*[^\s<>"'.,;:!?)]"#)
        .expect("valid URL regex")
});

static PERSON_REGEX: Lazy<Regex> = Lazy::new(|| {
    let names = crate::names::COMMON_GIVEN_NAMES.join("|");
    Regex::new(&format!(r"\b(?:{names})(?: [A-Z][a-z]+(?:-[A-Z][a-z]+)?)?\b"))
        .expect("valid person regex")
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b")
        .expect("valid phone regex")
});

static SSN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("valid SSN regex"));

static CREDIT_CARD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d{4}[-\s]?){3}\d{4}\b").expect("valid credit card regex"));

static IPV4_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("valid IPv4 regex"));
