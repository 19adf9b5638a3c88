//! [`StoreOptions`]: every tunable the store client and its collaborators read.
//!
//! # Usage pattern
//!
//! Build the options once, then hand them over:
//!
//! ```rust
//! use std::sync::Arc;
//! use adls_core::StoreOptions;
//!
//! let mut opts = StoreOptions::new();
//! opts.set_file_path_prefix("/tenant-a")
//!     .set_default_timeout_ms(30_000)
//!     .set_read_ahead_queue_depth(8)?
//!     .set_max_retries(6);
//!
//! // From here on the options are only read.
//! let shared = Arc::new(opts);
//! assert_eq!(shared.read_ahead_queue_depth(), Some(8));
//! # Ok::<(), adls_core::OptionsError>(())
//! ```
//!
//! Setters take `&mut self` and return `&mut Self`, so a configured value
//! wrapped in an `Arc` can no longer be modified.  That is the whole
//! concurrency story: one writer while building, any number of readers after.
//!
//! # Validation
//!
//! Only the read-ahead queue depth is checked.  The retry fields and the
//! default timeout are stored exactly as given, including zero and negative
//! values; the client decides what they mean.  The transport-security mode is
//! never rejected, unknown names resolve to [`SslChannelMode::Default`].

use std::time::Duration;

use thiserror::Error;

use crate::domain::retry::ExponentialRetryPolicy;
use crate::domain::ssl_channel_mode::SslChannelMode;

/// Default number of retries for the exponential retry policy.
pub const DEFAULT_MAX_RETRIES: i32 = 4;
/// Default wait before the first retry, in milliseconds.
pub const DEFAULT_EXPONENTIAL_RETRY_INTERVAL_MS: i32 = 1000;
/// Default multiplier applied to the wait after every retry.
pub const DEFAULT_EXPONENTIAL_FACTOR: i32 = 4;
/// Stored default timeout meaning "the client picks its own".
pub const DEFAULT_TIMEOUT_UNSET: i32 = -1;

/// Errors raised while setting options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// A setter was given a value outside its accepted range.  The stored
    /// value is left unchanged.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Client options for the Data Lake Store client.
///
/// | Field                       | Default     |
/// |-----------------------------|-------------|
/// | user_agent_suffix           | unset       |
/// | insecure_transport          | `false`     |
/// | remote_exceptions           | `false`     |
/// | file_path_prefix            | unset       |
/// | read_ahead_queue_depth      | unset       |
/// | default_timeout_ms          | `-1`        |
/// | alter_cipher_suites         | `true`      |
/// | ssl_channel_mode            | `Default`   |
/// | max_retries                 | `4`         |
/// | exponential_retry_interval  | `1000` ms   |
/// | exponential_factor          | `4`         |
/// | conditional_create          | `false`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    user_agent_suffix: Option<String>,
    insecure_transport: bool,
    remote_exceptions: bool,
    file_path_prefix: Option<String>,
    read_ahead_queue_depth: Option<u32>,
    default_timeout_ms: i32,
    alter_cipher_suites: bool,
    ssl_channel_mode: SslChannelMode,
    max_retries: i32,
    exponential_retry_interval_ms: i32,
    exponential_factor: i32,
    conditional_create: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            user_agent_suffix: None,
            insecure_transport: false,
            remote_exceptions: false,
            file_path_prefix: None,
            read_ahead_queue_depth: None,
            default_timeout_ms: DEFAULT_TIMEOUT_UNSET,
            alter_cipher_suites: true,
            ssl_channel_mode: SslChannelMode::Default,
            max_retries: DEFAULT_MAX_RETRIES,
            exponential_retry_interval_ms: DEFAULT_EXPONENTIAL_RETRY_INTERVAL_MS,
            exponential_factor: DEFAULT_EXPONENTIAL_FACTOR,
            conditional_create: false,
        }
    }
}

impl StoreOptions {
    /// Creates options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Setters ───────────────────────────────────────────────────────────────

    /// Text appended verbatim to the `User-Agent` header the client builds.
    pub fn set_user_agent_suffix(&mut self, suffix: impl Into<String>) -> &mut Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Talk plain `http` instead of `https`.
    ///
    /// Intended for mock or fake servers in tests; the real service only
    /// accepts `https`.  The flag cannot be turned back off.
    pub fn set_insecure_transport(&mut self) -> &mut Self {
        self.insecure_transport = true;
        self
    }

    /// Surface the exception name returned by the server instead of the
    /// client's own error type.
    pub fn set_throwing_remote_exceptions(&mut self, enabled: bool) -> &mut Self {
        self.remote_exceptions = enabled;
        self
    }

    /// Prefix prepended to every path the client sends, scoping it to a
    /// subtree of the store.
    pub fn set_file_path_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.file_path_prefix = Some(prefix.into());
        self
    }

    /// Number of read-ahead buffers the file input stream keeps in flight.
    /// `0` disables read-ahead.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidArgument`] for a negative depth; the
    /// previously stored depth is kept.
    pub fn set_read_ahead_queue_depth(&mut self, depth: i32) -> Result<&mut Self, OptionsError> {
        let depth = u32::try_from(depth).map_err(|_| {
            OptionsError::InvalidArgument(format!("queue depth has to be 0 or more, got {depth}"))
        })?;
        self.read_ahead_queue_depth = Some(depth);
        Ok(self)
    }

    /// Default timeout for client calls, in milliseconds.  Stored as given.
    pub fn set_default_timeout_ms(&mut self, timeout_ms: i32) -> &mut Self {
        self.default_timeout_ms = timeout_ms;
        self
    }

    /// Whether the socket factory may reorder cipher suites to prefer
    /// hardware-accelerated ones.
    pub fn set_alter_cipher_suites(&mut self, alter: bool) -> &mut Self {
        self.alter_cipher_suites = alter;
        self
    }

    /// Selects the transport-security mode by name.  See
    /// [`SslChannelMode::resolve`] for matching rules.
    pub fn set_ssl_channel_mode(&mut self, name: &str) -> &mut Self {
        self.ssl_channel_mode = SslChannelMode::resolve(name);
        self
    }

    /// Retries after the first attempt.  Stored as given, not validated.
    pub fn set_max_retries(&mut self, max_retries: i32) -> &mut Self {
        self.max_retries = max_retries;
        self
    }

    /// Wait before the first retry, in milliseconds.  Stored as given.
    pub fn set_exponential_retry_interval_ms(&mut self, interval_ms: i32) -> &mut Self {
        self.exponential_retry_interval_ms = interval_ms;
        self
    }

    /// Multiplier applied to the wait after each retry.  Stored as given.
    pub fn set_exponential_factor(&mut self, factor: i32) -> &mut Self {
        self.exponential_factor = factor;
        self
    }

    /// Create files with an overwrite precondition so concurrent creators do
    /// not clobber each other.
    pub fn set_enable_conditional_create(&mut self, enabled: bool) -> &mut Self {
        self.conditional_create = enabled;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Suffix for the `User-Agent` header, `None` until set.
    pub fn user_agent_suffix(&self) -> Option<&str> {
        self.user_agent_suffix.as_deref()
    }

    /// Whether requests go over plain `http`.
    pub fn is_using_insecure_transport(&self) -> bool {
        self.insecure_transport
    }

    /// Whether server exception names are surfaced to callers.
    pub fn is_throwing_remote_exceptions_enabled(&self) -> bool {
        self.remote_exceptions
    }

    /// Prefix prepended to request paths, `None` until set.
    pub fn file_path_prefix(&self) -> Option<&str> {
        self.file_path_prefix.as_deref()
    }

    /// `None` until a depth has been set; the stream then picks its own.
    pub fn read_ahead_queue_depth(&self) -> Option<u32> {
        self.read_ahead_queue_depth
    }

    /// Raw stored timeout, [`DEFAULT_TIMEOUT_UNSET`] when never set.
    pub fn default_timeout_ms(&self) -> i32 {
        self.default_timeout_ms
    }

    /// The timeout the client should apply, if any.  Only strictly positive
    /// stored values count; zero and negatives leave the client default.
    pub fn default_timeout(&self) -> Option<Duration> {
        u64::try_from(self.default_timeout_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Whether the socket factory may reorder cipher suites.
    pub fn should_alter_cipher_suites(&self) -> bool {
        self.alter_cipher_suites
    }

    /// The resolved transport-security mode.
    pub fn ssl_channel_mode(&self) -> SslChannelMode {
        self.ssl_channel_mode
    }

    /// Retry count for the exponential policy.
    pub fn max_retries(&self) -> i32 {
        self.max_retries
    }

    /// First retry wait, in milliseconds.
    pub fn exponential_retry_interval_ms(&self) -> i32 {
        self.exponential_retry_interval_ms
    }

    /// Backoff multiplier.
    pub fn exponential_factor(&self) -> i32 {
        self.exponential_factor
    }

    /// Whether file creation carries an overwrite precondition.
    pub fn should_enable_conditional_create(&self) -> bool {
        self.conditional_create
    }

    /// Snapshot of the three retry fields as a schedule the client can walk.
    pub fn retry_policy(&self) -> ExponentialRetryPolicy {
        ExponentialRetryPolicy::new(
            self.max_retries,
            self.exponential_retry_interval_ms,
            self.exponential_factor,
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_new_options_have_documented_defaults() {
        // Arrange / Act
        let opts = StoreOptions::new();

        // Assert
        assert_eq!(opts.user_agent_suffix(), None);
        assert!(!opts.is_using_insecure_transport());
        assert!(!opts.is_throwing_remote_exceptions_enabled());
        assert_eq!(opts.file_path_prefix(), None);
        assert_eq!(opts.read_ahead_queue_depth(), None);
        assert_eq!(opts.default_timeout_ms(), -1);
        assert!(opts.should_alter_cipher_suites());
        assert_eq!(opts.ssl_channel_mode(), SslChannelMode::Default);
        assert_eq!(opts.max_retries(), 4);
        assert_eq!(opts.exponential_retry_interval_ms(), 1000);
        assert_eq!(opts.exponential_factor(), 4);
        assert!(!opts.should_enable_conditional_create());
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(StoreOptions::new(), StoreOptions::default());
    }

    // ── Read-ahead queue depth ────────────────────────────────────────────────

    #[test]
    fn test_queue_depth_accepts_non_negative_values() {
        for depth in [0, 1, 4, 128, i32::MAX] {
            let mut opts = StoreOptions::new();
            opts.set_read_ahead_queue_depth(depth).unwrap();
            assert_eq!(opts.read_ahead_queue_depth(), Some(depth as u32));
        }
    }

    #[test]
    fn test_negative_queue_depth_is_rejected_without_mutation() {
        // Arrange
        let mut opts = StoreOptions::new();
        opts.set_read_ahead_queue_depth(3).unwrap();

        // Act
        for depth in [-1, -2, i32::MIN] {
            let result = opts.set_read_ahead_queue_depth(depth);

            // Assert
            assert!(matches!(result, Err(OptionsError::InvalidArgument(_))));
        }
        assert_eq!(opts.read_ahead_queue_depth(), Some(3));
    }

    #[test]
    fn test_negative_queue_depth_on_fresh_options_stays_unset() {
        let mut opts = StoreOptions::new();
        assert!(opts.set_read_ahead_queue_depth(-5).is_err());
        assert_eq!(opts.read_ahead_queue_depth(), None);
    }

    #[test]
    fn test_invalid_queue_depth_error_mentions_value() {
        let mut opts = StoreOptions::new();
        let err = opts.set_read_ahead_queue_depth(-7).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: queue depth has to be 0 or more, got -7"
        );
    }

    // ── Insecure transport ────────────────────────────────────────────────────

    #[test]
    fn test_insecure_transport_is_sticky() {
        let mut opts = StoreOptions::new();
        opts.set_insecure_transport();
        assert!(opts.is_using_insecure_transport());

        // Calling it again is harmless and still leaves the flag set.
        opts.set_insecure_transport();
        assert!(opts.is_using_insecure_transport());
    }

    // ── Unvalidated fields ────────────────────────────────────────────────────

    #[test]
    fn test_retry_fields_accept_nonsensical_values() {
        // Arrange
        let mut opts = StoreOptions::new();

        // Act
        opts.set_max_retries(-3)
            .set_exponential_retry_interval_ms(0)
            .set_exponential_factor(-1);

        // Assert
        assert_eq!(opts.max_retries(), -3);
        assert_eq!(opts.exponential_retry_interval_ms(), 0);
        assert_eq!(opts.exponential_factor(), -1);
    }

    #[test]
    fn test_default_timeout_stores_any_value() {
        let mut opts = StoreOptions::new();
        opts.set_default_timeout_ms(-250);
        assert_eq!(opts.default_timeout_ms(), -250);
    }

    #[test]
    fn test_default_timeout_view_only_reports_positive_values() {
        let mut opts = StoreOptions::new();
        assert_eq!(opts.default_timeout(), None);

        opts.set_default_timeout_ms(0);
        assert_eq!(opts.default_timeout(), None);

        opts.set_default_timeout_ms(-10);
        assert_eq!(opts.default_timeout(), None);

        opts.set_default_timeout_ms(1500);
        assert_eq!(opts.default_timeout(), Some(Duration::from_millis(1500)));
    }

    // ── Transport-security mode ───────────────────────────────────────────────

    #[test]
    fn test_ssl_channel_mode_resolves_case_insensitively() {
        let mut opts = StoreOptions::new();
        opts.set_ssl_channel_mode("default_jse");
        assert_eq!(opts.ssl_channel_mode(), SslChannelMode::DefaultJse);
    }

    #[test]
    fn test_unknown_ssl_channel_mode_overwrites_with_default() {
        // Arrange: a previously chosen mode must not survive a bad name.
        let mut opts = StoreOptions::new();
        opts.set_ssl_channel_mode("OpenSSL");

        // Act
        opts.set_ssl_channel_mode("bogus-mode");

        // Assert
        assert_eq!(opts.ssl_channel_mode(), SslChannelMode::Default);
    }

    // ── Chaining ──────────────────────────────────────────────────────────────

    #[test]
    fn test_chained_setters_all_apply() {
        // Arrange
        let mut opts = StoreOptions::new();

        // Act
        opts.set_user_agent_suffix("x")
            .set_max_retries(7)
            .set_file_path_prefix("/scoped")
            .set_throwing_remote_exceptions(true)
            .set_alter_cipher_suites(false)
            .set_enable_conditional_create(true);

        // Assert
        assert_eq!(opts.user_agent_suffix(), Some("x"));
        assert_eq!(opts.max_retries(), 7);
        assert_eq!(opts.file_path_prefix(), Some("/scoped"));
        assert!(opts.is_throwing_remote_exceptions_enabled());
        assert!(!opts.should_alter_cipher_suites());
        assert!(opts.should_enable_conditional_create());
    }

    #[test]
    fn test_setter_order_does_not_matter() {
        let mut a = StoreOptions::new();
        a.set_max_retries(7).set_user_agent_suffix("x");

        let mut b = StoreOptions::new();
        b.set_user_agent_suffix("x").set_max_retries(7);

        assert_eq!(a, b);
    }

    #[test]
    fn test_queue_depth_setter_chains_through_result() {
        let mut opts = StoreOptions::new();
        opts.set_read_ahead_queue_depth(2)
            .unwrap()
            .set_exponential_factor(2);
        assert_eq!(opts.read_ahead_queue_depth(), Some(2));
        assert_eq!(opts.exponential_factor(), 2);
    }

    #[test]
    fn test_retry_policy_reflects_retry_fields() {
        let mut opts = StoreOptions::new();
        opts.set_max_retries(2)
            .set_exponential_retry_interval_ms(100)
            .set_exponential_factor(3);

        let policy = opts.retry_policy();

        assert_eq!(policy.max_retries(), 2);
        assert_eq!(policy.interval_ms(), 100);
        assert_eq!(policy.factor(), 3);
    }
}
