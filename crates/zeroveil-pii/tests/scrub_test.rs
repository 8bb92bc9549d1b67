//! End-to-end scrubbing with the bundled engines.

#![cfg(all(feature = "analyzer", feature = "anonymizer"))]

use std::sync::Arc;
use zeroveil_pii::{scrub, PatternRecognizer, ReplaceAnonymizer, Scrubber};

#[test]
fn test_empty_text() {
    let result = scrub("").expect("scrub empty");
    assert_eq!(result.text, "");
    assert_eq!(result.entities_found, 0);
}

#[test]
fn test_person_and_email_removed() {
    let recognizer = PatternRecognizer::new()
        .with_deny_list("PERSON", ["Zebulon"])
        .expect("deny list compiles");
    let scrubber = Scrubber::new(Arc::new(recognizer), Arc::new(ReplaceAnonymizer::new()));

    let result = scrubber
        .scrub("Contact Zebulon at zeb@example.com", "en")
        .expect("scrub");

    assert_eq!(result.entities_found, 2);
    assert_eq!(result.text, "Contact <PERSON> at <EMAIL_ADDRESS>");
}

#[test]
fn test_shared_scrubber_removes_person_and_email() {
    let result = scrub("Contact John at john@example.com").expect("scrub");

    assert!(result.entities_found >= 2);
    assert!(!result.text.contains("john@example.com"));
    assert!(!result.text.contains("John"));
    assert_eq!(result.text, "Contact <PERSON> at <EMAIL_ADDRESS>");
}

#[test]
fn test_shared_scrubber_leaves_locations() {
    let text = "The meeting moved to Paris.";
    let result = scrub(text).expect("scrub");

    assert_eq!(result.text, text);
    assert_eq!(result.entities_found, 0);
}

#[test]
fn test_url_keeps_sentence_period() {
    let result = scrub("See https://docs.example.org/setup.").expect("scrub");
    assert_eq!(result.text, "See <URL>.");
}

#[test]
fn test_shared_scrubber() {
    let result = scrub("Card 4111 1111 1111 1111, SSN 123-45-6789").expect("scrub");

    assert_eq!(result.entities_found, 2);
    assert_eq!(result.text, "Card <CREDIT_CARD>, SSN <US_SSN>");
}

#[test]
fn test_clean_text_untouched() {
    let text = "The quarterly report is due on Friday.";
    let result = scrub(text).expect("scrub");

    assert_eq!(result.text, text);
    assert_eq!(result.entities_found, 0);
}

#[test]
fn test_unsupported_language_fails() {
    let result = zeroveil_pii::scrub_with_language("Hallo Welt", "de");
    assert!(matches!(
        result,
        Err(zeroveil_pii::PiiError::UnsupportedLanguage(_))
    ));
}
