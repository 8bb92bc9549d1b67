//! ZeroVeil - minimal client SDK for the ZeroVeil privacy relay.
//!
//! Scrub PII locally, then send the cleaned text through the relay:
//!
//! ```rust,no_run
//! use zeroveil::{scrub, ZeroVeilClient};
//!
//! # async fn example() -> zeroveil::Result<()> {
//! let result = scrub("Contact me at john@example.com")?;
//! assert_eq!(result.text, "Contact me at <EMAIL_ADDRESS>");
//!
//! let client = ZeroVeilClient::from_env()?;
//! let response = client.send(&result.text, None).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```
//!
//! The relay owns routing, tier and model selection. Device detection is a
//! separate utility for clients deciding whether to run a model locally.
//!
//! # Crates
//!
//! - [`config`] - Connection settings
//! - [`client`] - Retrying relay client
//! - [`pii`] - PII scrubbing
//! - [`device`] - Hardware capability detection

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;

pub use zeroveil_client as client;
pub use zeroveil_core as config;
pub use zeroveil_device as device;
pub use zeroveil_pii as pii;

// Re-export commonly used types
pub use error::{Error, ErrorKind, Result};
pub use zeroveil_client::{
    create_client, Message, Response, Role, SendOptions, Usage, ZeroVeilClient,
};
pub use zeroveil_core::{load_config, ZeroVeilConfig};
pub use zeroveil_device::{
    detect_device_capabilities, print_device_info, DeviceCapability, DeviceDetectionResult,
    GpuInfo, SystemInfo,
};
pub use zeroveil_pii::{is_available as pii_available, scrub, ScrubResult, Scrubber};

/// SDK version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
