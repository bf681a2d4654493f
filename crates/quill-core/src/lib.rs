//! # quill-core
//!
//! Configuration and shared error types for the quill wallet core.
//!
//! The crypto and chain crates report failures through the errors defined
//! here, so callers match on one set of types.
//!
//! ## Modules
//!
//! - [`config`] - Configuration types ([`Config`], [`WalletConfig`], [`LoggingConfig`])
//! - [`config_loader`] - Reading and writing `~/.quill/config.toml`
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust
//! use quill_core::{Config, ConfigError};
//!
//! fn load(toml_str: &str) -> Result<Config, ConfigError> {
//!     let config: Config =
//!         toml::from_str(toml_str).map_err(|e| ConfigError::parse_failed(e.to_string()))?;
//!     config.validate()?;
//!     Ok(config)
//! }
//!
//! let config = load("[logging]\nlevel = \"info\"\n").expect("valid config");
//! assert_eq!(config.logging.level, "info");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod config_loader;
pub mod error;

pub use config::{Config, LoggingConfig, WalletConfig};
pub use config_loader::{expand_path, ConfigLoader};
pub use error::{
    ConfigError, DecodeError, EncodeError, SignError, TransactionError, WalletError,
};
