//! ZeroVeil Core - connection settings shared by the ZeroVeil client crates.
//!
//! The relay owns every routing, tier and model decision. The client side only
//! needs to know where the relay lives, how to authenticate and how long to
//! wait for a single request, which is what this crate models.
//!
//! # Modules
//!
//! - [`config`] - `ZeroVeilConfig` and the environment / TOML loaders
//! - [`error`] - Configuration error types using thiserror
//!
//! # Example
//!
//! ```rust
//! use zeroveil_core::ZeroVeilConfig;
//!
//! let config = ZeroVeilConfig::default().with_api_key("zv-test");
//! assert_eq!(config.endpoint, "https://api.zeroveil.io/v1");
//! assert_eq!(config.chat_completions_url(), "https://api.zeroveil.io/v1/chat/completions");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{
    load_config, ZeroVeilConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, ENV_API_KEY,
    ENV_ENDPOINT, ENV_TIMEOUT,
};
pub use error::{ConfigError, ConfigResult};
