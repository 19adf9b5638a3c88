//! Domain layer: the options value and the types derived from it.
//!
//! Nothing here performs I/O, spawns threads or logs.  Every type is a plain
//! value that can be cloned and shared behind an `Arc` once configured.

pub mod options;
pub mod retry;
pub mod ssl_channel_mode;

pub use options::{OptionsError, StoreOptions};
pub use retry::ExponentialRetryPolicy;
pub use ssl_channel_mode::SslChannelMode;
