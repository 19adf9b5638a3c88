//! TOML options file for the store client.
//!
//! Looked up at the platform-appropriate location:
//! - Windows:  `%APPDATA%\ADLS\options.toml`
//! - Linux:    `~/.config/adls/options.toml`
//! - macOS:    `~/Library/Application Support/ADLS/options.toml`
//!
//! ```toml
//! [transport]
//! user_agent_suffix = "my-app/1.2"
//! path_prefix = "/tenant-a"
//! default_timeout_ms = 30000
//! ssl_channel_mode = "OpenSSL"
//!
//! [retry]
//! max_retries = 6
//!
//! [read_ahead]
//! queue_depth = 4
//! ```
//!
//! Every key is optional.  An absent key leaves the corresponding option at
//! whatever value it already had, so a file only needs to mention what it
//! changes.  Values are applied through the regular setters: a negative
//! `queue_depth` is rejected, an unknown `ssl_channel_mode` falls back to
//! `Default`, and `insecure = false` cannot undo an earlier `insecure = true`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::options::{OptionsError, StoreOptions};
use crate::domain::ssl_channel_mode::SslChannelMode;

/// Error type for options file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error reading options at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse options TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value in the file was rejected by a setter.
    #[error(transparent)]
    Options(#[from] OptionsError),
}

// ── File schema ───────────────────────────────────────────────────────────────

/// Parsed contents of an options file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsFile {
    pub transport: TransportSection,
    pub retry: RetrySection,
    pub read_ahead: ReadAheadSection,
}

/// Request shaping and channel security.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TransportSection {
    pub user_agent_suffix: Option<String>,
    /// Only `true` has an effect.
    pub insecure: Option<bool>,
    pub remote_exceptions: Option<bool>,
    pub path_prefix: Option<String>,
    pub default_timeout_ms: Option<i32>,
    /// Kept as raw text so an unrecognised name can be reported before it is
    /// resolved.
    pub ssl_channel_mode: Option<String>,
    pub alter_cipher_suites: Option<bool>,
    pub conditional_create: Option<bool>,
}

/// Exponential retry policy parameters.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySection {
    pub max_retries: Option<i32>,
    pub interval_ms: Option<i32>,
    pub factor: Option<i32>,
}

/// File input stream prefetching.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ReadAheadSection {
    pub queue_depth: Option<i32>,
}

impl OptionsFile {
    /// Parses an options document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, wrong value types or
    /// unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies every present value onto `options`.
    ///
    /// The queue depth is the only value that can be rejected, so it goes
    /// first: a rejected file leaves `options` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Options`] when `read_ahead.queue_depth` is
    /// negative.
    pub fn apply_to(&self, options: &mut StoreOptions) -> Result<(), ConfigError> {
        if let Some(depth) = self.read_ahead.queue_depth {
            options.set_read_ahead_queue_depth(depth)?;
        }

        let t = &self.transport;
        if let Some(suffix) = &t.user_agent_suffix {
            options.set_user_agent_suffix(suffix.as_str());
        }
        if t.insecure == Some(true) {
            options.set_insecure_transport();
        }
        if let Some(enabled) = t.remote_exceptions {
            options.set_throwing_remote_exceptions(enabled);
        }
        if let Some(prefix) = &t.path_prefix {
            options.set_file_path_prefix(prefix.as_str());
        }
        if let Some(timeout_ms) = t.default_timeout_ms {
            options.set_default_timeout_ms(timeout_ms);
        }
        if let Some(name) = &t.ssl_channel_mode {
            if SslChannelMode::lookup(name).is_none() {
                warn!(
                    "unrecognised ssl_channel_mode {name:?}, using {}",
                    SslChannelMode::Default
                );
            }
            options.set_ssl_channel_mode(name);
        }
        if let Some(alter) = t.alter_cipher_suites {
            options.set_alter_cipher_suites(alter);
        }
        if let Some(enabled) = t.conditional_create {
            options.set_enable_conditional_create(enabled);
        }

        let r = &self.retry;
        if let Some(max_retries) = r.max_retries {
            options.set_max_retries(max_retries);
        }
        if let Some(interval_ms) = r.interval_ms {
            options.set_exponential_retry_interval_ms(interval_ms);
        }
        if let Some(factor) = r.factor {
            options.set_exponential_factor(factor);
        }
        Ok(())
    }

    /// Builds fresh options from defaults plus this file.
    ///
    /// # Errors
    ///
    /// See [`apply_to`](Self::apply_to).
    pub fn to_options(&self) -> Result<StoreOptions, ConfigError> {
        let mut options = StoreOptions::default();
        self.apply_to(&mut options)?;
        Ok(options)
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the options file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default options file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn options_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("options.toml"))
}

/// Loads options from `path`, returning `StoreOptions::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Options`] if a value is rejected.
pub fn load_options_file(path: &Path) -> Result<StoreOptions, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!("reading store options from {}", path.display());
            OptionsFile::from_toml_str(&content)?.to_options()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no options file at {}, using defaults", path.display());
            Ok(StoreOptions::default())
        }
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Resolves the platform config base directory including the `ADLS` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("ADLS"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("adls"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("ADLS"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
