//! # adls-core
//!
//! Client-side configuration for the Data Lake Store client.
//!
//! The store client, its file input stream and its TLS socket factory all
//! read their tunables from a single [`StoreOptions`] value.  The caller
//! builds that value once, hands it to the client, and never touches it
//! again.
//!
//! # Layout
//!
//! - **`domain`** – Pure types with no I/O: [`StoreOptions`] itself, the
//!   closed set of [`SslChannelMode`]s, and the [`ExponentialRetryPolicy`]
//!   view the client derives from the retry fields.
//!
//! - **`storage`** – Reads an options TOML file from disk and applies it to a
//!   `StoreOptions` through the same setters a caller would use.  Nothing is
//!   ever written back.
//!
//! ```rust
//! use adls_core::{SslChannelMode, StoreOptions};
//!
//! let mut opts = StoreOptions::new();
//! opts.set_user_agent_suffix("my-app/1.0").set_max_retries(7);
//! opts.set_ssl_channel_mode("openssl");
//!
//! assert_eq!(opts.max_retries(), 7);
//! assert_eq!(opts.ssl_channel_mode(), SslChannelMode::OpenSsl);
//! ```

pub mod domain;
pub mod storage;

pub use domain::options::{OptionsError, StoreOptions};
pub use domain::retry::ExponentialRetryPolicy;
pub use domain::ssl_channel_mode::SslChannelMode;
pub use storage::options_file::{load_options_file, options_file_path, ConfigError, OptionsFile};
