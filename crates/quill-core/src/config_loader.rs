//! Loading and saving the quill configuration file.
//!
//! Configuration lives at `~/.quill/config.toml` by default. A missing file
//! is not an error for [`ConfigLoader::load`]; defaults are returned instead.
//!
//! # Examples
//!
//! ```no_run
//! use quill_core::config_loader::ConfigLoader;
//!
//! let loader = ConfigLoader::new().expect("failed to create loader");
//!
//! if !loader.exists() {
//!     loader.write_default().expect("failed to write default config");
//! }
//!
//! let config = loader.load().expect("failed to load config");
//! println!("payment key path: {}", config.wallet.payment_path);
//! ```

use crate::config::Config;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// The configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// The base directory name within the home directory.
const BASE_DIR_NAME: &str = ".quill";

/// Reads and writes the configuration file under a base directory.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Base directory for quill files (default: `~/.quill`).
    base_dir: PathBuf,

    /// The configuration file itself.
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader rooted at `~/.quill`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] if the home directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self::with_base_dir(default_base_dir()?))
    }

    /// Creates a loader rooted at a custom base directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use quill_core::config_loader::ConfigLoader;
    /// use std::path::PathBuf;
    ///
    /// let loader = ConfigLoader::with_base_dir(PathBuf::from("/custom/quill"));
    /// assert_eq!(loader.config_path(), PathBuf::from("/custom/quill/config.toml"));
    /// ```
    #[must_use]
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        let config_path = base_dir.join(CONFIG_FILE_NAME);
        Self {
            base_dir,
            config_path,
        }
    }

    /// Creates a loader for an explicit configuration file path.
    ///
    /// The file's parent directory becomes the base directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use quill_core::config_loader::ConfigLoader;
    /// use std::path::{Path, PathBuf};
    ///
    /// let loader = ConfigLoader::for_file(Path::new("/etc/quill/wallet.toml"));
    /// assert_eq!(loader.config_path(), PathBuf::from("/etc/quill/wallet.toml"));
    /// assert_eq!(loader.base_dir(), Path::new("/etc/quill"));
    /// ```
    #[must_use]
    pub fn for_file(path: &Path) -> Self {
        let base_dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        Self {
            base_dir,
            config_path: path.to_path_buf(),
        }
    }

    /// Returns the path to the configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Loads and validates the configuration, or returns defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseFailed`] for invalid TOML,
    /// [`ConfigError::InvalidValue`] for values that fail validation and
    /// [`ConfigError::Io`] if the file cannot be read.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Loads the configuration, failing if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] if there is no configuration file,
    /// otherwise the same errors as [`load`](Self::load).
    pub fn load_required(&self) -> Result<Config, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Err(ConfigError::file_not_found(
                config_path.display().to_string(),
            ));
        }

        Self::load_from_path(&config_path)
    }

    /// Saves the configuration, creating the base directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] on write failure and
    /// [`ConfigError::ParseFailed`] if serialization fails.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        self.ensure_base_dir()?;

        let config_path = self.config_path();

        let toml_str = toml::to_string_pretty(config).map_err(|e| {
            ConfigError::parse_failed(format!("failed to serialize configuration: {e}"))
        })?;

        fs::write(&config_path, toml_str).map_err(|e| {
            ConfigError::io(
                format!("failed to write configuration to {}", config_path.display()),
                e,
            )
        })
    }

    /// Writes the commented default configuration from [`Config::default_toml`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the directory or file cannot be written.
    pub fn write_default(&self) -> Result<(), ConfigError> {
        self.ensure_base_dir()?;

        let config_path = self.config_path();

        fs::write(&config_path, Config::default_toml()).map_err(|e| {
            ConfigError::io(
                format!(
                    "failed to write default configuration to {}",
                    config_path.display()
                ),
                e,
            )
        })
    }

    /// Checks if the configuration file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.config_path().exists()
    }

    fn ensure_base_dir(&self) -> Result<(), ConfigError> {
        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir).map_err(|e| {
                ConfigError::io(
                    format!(
                        "failed to create base directory {}",
                        self.base_dir.display()
                    ),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::io(format!("failed to read {}", path.display()), e))?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_failed(format!("invalid TOML in {}: {e}", path.display()))
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// Expands a leading `~` to the home directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the path starts with `~` and
/// the home directory cannot be determined.
///
/// # Examples
///
/// ```
/// use quill_core::config_loader::expand_path;
///
/// let path = expand_path("/var/log/quill.log").expect("absolute path");
/// assert_eq!(path.to_string_lossy(), "/var/log/quill.log");
/// ```
pub fn expand_path(path: &str) -> Result<PathBuf, ConfigError> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(ConfigError::no_home_directory)?;
        Ok(home.join(rest))
    } else if path == "~" {
        dirs::home_dir().ok_or_else(ConfigError::no_home_directory)
    } else {
        Ok(PathBuf::from(path))
    }
}

/// Returns the default base directory (`~/.quill`).
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the home directory cannot be determined.
pub fn default_base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(ConfigError::no_home_directory)?;
    Ok(home.join(BASE_DIR_NAME))
}
