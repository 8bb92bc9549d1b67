//! ZeroVeil PII - scrub personally identifiable information before it leaves
//! the machine.
//!
//! Scrubbing is split between two pluggable engines:
//!
//! - an [`EntityRecognizer`] that finds entity spans in text, and
//! - an [`Anonymizer`] that rewrites those spans.
//!
//! Which entity types get recognized is entirely up to the recognizer. The
//! bundled [`PatternRecognizer`] (feature `analyzer`) covers emails, phone
//! numbers, credit cards, US SSNs, IP addresses and URLs, people named with a
//! common English given name, plus any deny lists you register. It has no
//! `LOCATION` detection and misses uncommon names; add those with
//! [`PatternRecognizer::with_deny_list`]. The bundled [`ReplaceAnonymizer`] (feature `anonymizer`)
//! swaps each span for an `<ENTITY_TYPE>` placeholder.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "analyzer", feature = "anonymizer"))]
//! # fn main() -> Result<(), zeroveil_pii::PiiError> {
//! let result = zeroveil_pii::scrub("Reach me at jane@example.com")?;
//! assert_eq!(result.text, "Reach me at <EMAIL_ADDRESS>");
//! assert_eq!(result.entities_found, 1);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "analyzer", feature = "anonymizer")))]
//! # fn main() {}
//! ```
//!
//! Custom engines plug in through [`Scrubber::new`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[cfg(feature = "anonymizer")]
pub mod anonymizer;
pub mod engine;
pub mod error;
#[cfg(feature = "analyzer")]
mod names;
#[cfg(feature = "analyzer")]
pub mod pattern;
pub mod scrubber;

// Re-export commonly used types
#[cfg(feature = "anonymizer")]
pub use anonymizer::ReplaceAnonymizer;
pub use engine::{Anonymizer, EntityRecognizer, RecognizerResult};
pub use error::{PiiError, PiiResult};
#[cfg(feature = "analyzer")]
pub use pattern::PatternRecognizer;
pub use scrubber::{
    is_available, scrub, scrub_with_language, ScrubResult, Scrubber, DEFAULT_LANGUAGE,
};
