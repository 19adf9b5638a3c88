//! `adls-options`: print the options a store client would be built with.
//!
//! Options are layered in this order, later layers winning:
//!
//! 1. Built-in defaults.
//! 2. The options file (`--config`, or the platform default location).
//! 3. Command-line flags, each of which can also come from an `ADLS_*`
//!    environment variable.
//!
//! # Usage
//!
//! ```text
//! adls-options [OPTIONS]
//!
//! Options:
//!   --config <PATH>                  Options TOML file
//!   --user-agent-suffix <TEXT>       Appended to the User-Agent header
//!   --insecure                       Use http instead of https
//!   --remote-exceptions <BOOL>       Surface server exception names
//!   --path-prefix <PREFIX>           Prefix for every request path
//!   --read-ahead-queue-depth <N>     Read-ahead buffers in flight (>= 0)
//!   --default-timeout-ms <MS>        Default call timeout
//!   --ssl-channel-mode <MODE>        OpenSSL | Default_JSE | Default
//!   --alter-cipher-suites <BOOL>     Prefer accelerated cipher suites
//!   --max-retries <N>                Exponential retry count
//!   --retry-interval-ms <MS>         Wait before the first retry
//!   --backoff-factor <N>             Wait multiplier per retry
//!   --conditional-create <BOOL>      Create files with an overwrite guard
//! ```

use std::path::PathBuf;

use adls_core::{load_options_file, options_file_path, OptionsError, StoreOptions};
use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Print the effective Data Lake Store client options.
#[derive(Debug, Parser)]
#[command(name = "adls-options", version)]
struct Cli {
    /// Options TOML file.  Defaults to the platform config location; a
    /// missing file means "defaults only".
    #[arg(long, env = "ADLS_OPTIONS_FILE")]
    config: Option<PathBuf>,

    #[arg(long, env = "ADLS_USER_AGENT_SUFFIX")]
    user_agent_suffix: Option<String>,

    /// Use plain http.  Only meant for mock servers.
    #[arg(long, env = "ADLS_INSECURE")]
    insecure: bool,

    #[arg(long, env = "ADLS_REMOTE_EXCEPTIONS")]
    remote_exceptions: Option<bool>,

    #[arg(long, env = "ADLS_PATH_PREFIX")]
    path_prefix: Option<String>,

    #[arg(long, allow_negative_numbers = true, env = "ADLS_READ_AHEAD_QUEUE_DEPTH")]
    read_ahead_queue_depth: Option<i32>,

    #[arg(long, allow_negative_numbers = true, env = "ADLS_DEFAULT_TIMEOUT_MS")]
    default_timeout_ms: Option<i32>,

    /// Unknown names fall back to `Default`.
    #[arg(long, env = "ADLS_SSL_CHANNEL_MODE")]
    ssl_channel_mode: Option<String>,

    #[arg(long, env = "ADLS_ALTER_CIPHER_SUITES")]
    alter_cipher_suites: Option<bool>,

    #[arg(long, allow_negative_numbers = true, env = "ADLS_MAX_RETRIES")]
    max_retries: Option<i32>,

    #[arg(long, allow_negative_numbers = true, env = "ADLS_RETRY_INTERVAL_MS")]
    retry_interval_ms: Option<i32>,

    #[arg(long, allow_negative_numbers = true, env = "ADLS_BACKOFF_FACTOR")]
    backoff_factor: Option<i32>,

    #[arg(long, env = "ADLS_CONDITIONAL_CREATE")]
    conditional_create: Option<bool>,
}

impl Cli {
    /// Applies every flag that was given onto `opts`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidArgument`] for a negative
    /// `--read-ahead-queue-depth`.
    fn apply_to(&self, opts: &mut StoreOptions) -> Result<(), OptionsError> {
        if let Some(depth) = self.read_ahead_queue_depth {
            opts.set_read_ahead_queue_depth(depth)?;
        }
        if let Some(suffix) = &self.user_agent_suffix {
            opts.set_user_agent_suffix(suffix.as_str());
        }
        if self.insecure {
            opts.set_insecure_transport();
        }
        if let Some(enabled) = self.remote_exceptions {
            opts.set_throwing_remote_exceptions(enabled);
        }
        if let Some(prefix) = &self.path_prefix {
            opts.set_file_path_prefix(prefix.as_str());
        }
        if let Some(timeout_ms) = self.default_timeout_ms {
            opts.set_default_timeout_ms(timeout_ms);
        }
        if let Some(mode) = &self.ssl_channel_mode {
            opts.set_ssl_channel_mode(mode);
        }
        if let Some(alter) = self.alter_cipher_suites {
            opts.set_alter_cipher_suites(alter);
        }
        if let Some(max_retries) = self.max_retries {
            opts.set_max_retries(max_retries);
        }
        if let Some(interval_ms) = self.retry_interval_ms {
            opts.set_exponential_retry_interval_ms(interval_ms);
        }
        if let Some(factor) = self.backoff_factor {
            opts.set_exponential_factor(factor);
        }
        if let Some(enabled) = self.conditional_create {
            opts.set_enable_conditional_create(enabled);
        }
        Ok(())
    }

    /// Layers defaults, the options file and the flags into one value.
    fn into_store_options(self) -> anyhow::Result<StoreOptions> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => options_file_path().ok(),
        };

        let mut opts = match &path {
            Some(path) => load_options_file(path)
                .with_context(|| format!("failed to load options from {}", path.display()))?,
            None => {
                debug!("no platform config directory, starting from defaults");
                StoreOptions::default()
            }
        };

        self.apply_to(&mut opts)
            .context("invalid command-line option")?;
        Ok(opts)
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn or_unset<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "(unset)".to_string(), |v| v.to_string())
}

/// Formats `opts` as an aligned two-column table.
fn render(opts: &StoreOptions) -> String {
    let policy = opts.retry_policy();
    let schedule = policy
        .delays()
        .map(|d| d.as_millis().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let rows = [
        ("user_agent_suffix", or_unset(opts.user_agent_suffix())),
        ("insecure_transport", opts.is_using_insecure_transport().to_string()),
        (
            "remote_exceptions",
            opts.is_throwing_remote_exceptions_enabled().to_string(),
        ),
        ("path_prefix", or_unset(opts.file_path_prefix())),
        ("read_ahead_queue_depth", or_unset(opts.read_ahead_queue_depth())),
        ("default_timeout_ms", opts.default_timeout_ms().to_string()),
        ("alter_cipher_suites", opts.should_alter_cipher_suites().to_string()),
        ("ssl_channel_mode", opts.ssl_channel_mode().to_string()),
        ("max_retries", opts.max_retries().to_string()),
        ("retry_interval_ms", opts.exponential_retry_interval_ms().to_string()),
        ("backoff_factor", opts.exponential_factor().to_string()),
        ("retry_schedule_ms", format!("[{schedule}]")),
        (
            "conditional_create",
            opts.should_enable_conditional_create().to_string(),
        ),
    ];

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.into_iter()
        .map(|(key, value)| format!("{key:<width$}  {value}\n"))
        .collect()
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Level is overridden by `RUST_LOG`; logs go to stderr so the table on
    // stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = cli.into_store_options()?;

    info!(
        "effective options: mode={}, max_retries={}",
        opts.ssl_channel_mode(),
        opts.max_retries()
    );
    print!("{}", render(&opts));
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
