//! Configuration types for quill.
//!
//! Configuration is stored in TOML format at `~/.quill/config.toml`. Every
//! section is optional; missing sections and fields fall back to defaults.
//!
//! # Examples
//!
//! ```
//! use quill_core::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.wallet.payment_path, "m/44'/60'/0'/0/0");
//! assert_eq!(config.logging.level, "warn");
//! ```
//!
//! # Default TOML Output
//!
//! ```toml
//! [wallet]
//! identity_path = "m/0'/1/0"
//! payment_path = "m/44'/60'/0'/0/0"
//! mnemonic_env = "QUILL_MNEMONIC"
//!
//! [logging]
//! level = "warn"
//! format = "pretty"
//! # file = "~/.quill/logs/quill.log"
//! ```

use crate::error::ConfigError;
use bip32::DerivationPath;
use serde::{Deserialize, Serialize};

/// Log levels accepted in `[logging] level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log formats accepted in `[logging] format`.
pub const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

/// Top-level configuration.
///
/// - **Wallet**: derivation paths and where the mnemonic comes from
/// - **Logging**: default level, output format and optional log file
///
/// # Examples
///
/// ```
/// use quill_core::config::Config;
///
/// let toml_str = r#"
/// [wallet]
/// payment_path = "m/44'/60'/0'/0/1"
///
/// [logging]
/// format = "json"
/// "#;
///
/// let config: Config = toml::from_str(toml_str).expect("valid TOML");
/// assert_eq!(config.wallet.payment_path, "m/44'/60'/0'/0/1");
/// assert_eq!(config.wallet.identity_path, "m/0'/1/0");
/// assert_eq!(config.logging.format, "json");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// HD wallet settings.
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_identity_path() -> String {
    "m/0'/1/0".to_string()
}

fn default_payment_path() -> String {
    "m/44'/60'/0'/0/0".to_string()
}

fn default_mnemonic_env() -> String {
    "QUILL_MNEMONIC".to_string()
}

/// HD wallet configuration.
///
/// Two keys are derived from the same mnemonic: an identity key used for
/// message signing and a payment key used for Ethereum transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletConfig {
    /// BIP-32 path of the identity key.
    ///
    /// Default: `m/0'/1/0`
    #[serde(default = "default_identity_path")]
    pub identity_path: String,

    /// BIP-32 path of the payment key.
    ///
    /// Default: `m/44'/60'/0'/0/0`, the first account of the standard
    /// Ethereum derivation.
    #[serde(default = "default_payment_path")]
    pub payment_path: String,

    /// Name of the environment variable holding the mnemonic phrase.
    ///
    /// Default: `QUILL_MNEMONIC`
    #[serde(default = "default_mnemonic_env")]
    pub mnemonic_env: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            identity_path: default_identity_path(),
            payment_path: default_payment_path(),
            mnemonic_env: default_mnemonic_env(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Logging configuration.
///
/// Verbosity flags on the command line take precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level: one of [`LOG_LEVELS`].
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: one of [`LOG_FORMATS`].
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Optional log file. Rotated daily. Supports `~` expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field:
    /// a derivation path that does not parse, an empty mnemonic variable name,
    /// or an unknown log level or format.
    ///
    /// # Examples
    ///
    /// ```
    /// use quill_core::config::Config;
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.wallet.payment_path = "44'/60'".to_string();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path("wallet.identity_path", &self.wallet.identity_path)?;
        validate_path("wallet.payment_path", &self.wallet.payment_path)?;

        if self.wallet.mnemonic_env.trim().is_empty() {
            return Err(ConfigError::invalid_value("wallet.mnemonic_env", "<empty>"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                &self.logging.level,
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.format",
                &self.logging.format,
            ));
        }

        if matches!(&self.logging.file, Some(file) if file.trim().is_empty()) {
            return Err(ConfigError::invalid_value("logging.file", "<empty>"));
        }

        Ok(())
    }

    /// Generates the default configuration as a commented TOML string.
    ///
    /// # Examples
    ///
    /// ```
    /// use quill_core::config::Config;
    ///
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[wallet]"));
    /// assert!(toml.contains("[logging]"));
    /// ```
    #[must_use]
    pub fn default_toml() -> String {
        r#"[wallet]
# Identity key, used for message signing
identity_path = "m/0'/1/0"
# Payment key, used for Ethereum transactions
payment_path = "m/44'/60'/0'/0/0"
# Environment variable holding the mnemonic phrase
mnemonic_env = "QUILL_MNEMONIC"

[logging]
level = "warn"
format = "pretty"
# file = "~/.quill/logs/quill.log"
"#
        .to_string()
    }

    /// Creates a configuration builder for customizing values in tests.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

fn validate_path(field: &str, path: &str) -> Result<(), ConfigError> {
    path.parse::<DerivationPath>()
        .map(|_| ())
        .map_err(|_| ConfigError::invalid_value(field, path))
}

/// Builder for [`Config`].
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ConfigBuilder {
    config: Config,
}

#[cfg(test)]
impl ConfigBuilder {
    /// Creates a builder seeded with default values.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the identity key derivation path.
    #[must_use]
    pub(crate) fn identity_path(mut self, path: impl Into<String>) -> Self {
        self.config.wallet.identity_path = path.into();
        self
    }

    /// Sets the payment key derivation path.
    #[must_use]
    pub(crate) fn payment_path(mut self, path: impl Into<String>) -> Self {
        self.config.wallet.payment_path = path.into();
        self
    }

    /// Sets the environment variable the mnemonic is read from.
    #[must_use]
    pub(crate) fn mnemonic_env(mut self, name: impl Into<String>) -> Self {
        self.config.wallet.mnemonic_env = name.into();
        self
    }

    /// Sets the default log level.
    #[must_use]
    pub(crate) fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Sets the log output format.
    #[must_use]
    pub(crate) fn log_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    /// Sets the log file path.
    #[must_use]
    pub(crate) fn log_file(mut self, file: impl Into<String>) -> Self {
        self.config.logging.file = Some(file.into());
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub(crate) fn build(self) -> Config {
        self.config
    }
}
