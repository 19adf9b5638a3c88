//! Exponential retry schedule derived from [`StoreOptions`](super::StoreOptions).
//!
//! The client's retry loop (issue request, inspect status, sleep, try again)
//! lives with the HTTP transport.  This type only answers two questions for
//! it: "may I retry attempt `n`?" and "how long do I wait first?".
//!
//! ```text
//! retry:   0         1                2
//! wait:    interval  interval*factor  interval*factor^2   ... up to max_retries
//! ```
//!
//! The stored fields are not validated, so the schedule has to stay well
//! defined for any `i32` input: multiplication saturates, negative waits
//! clamp to zero, and `max_retries <= 0` means no retries at all.

use std::time::Duration;

/// Retry count, base interval and backoff factor of the exponential policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialRetryPolicy {
    max_retries: i32,
    interval_ms: i32,
    factor: i32,
}

impl ExponentialRetryPolicy {
    /// Builds a policy from the raw option values, unvalidated.
    pub fn new(max_retries: i32, interval_ms: i32, factor: i32) -> Self {
        Self {
            max_retries,
            interval_ms,
            factor,
        }
    }

    /// Retries allowed after the first attempt; `<= 0` disables retrying.
    pub fn max_retries(&self) -> i32 {
        self.max_retries
    }

    /// Wait before the first retry, in milliseconds.
    pub fn interval_ms(&self) -> i32 {
        self.interval_ms
    }

    /// Multiplier applied to the wait after every retry.
    pub fn factor(&self) -> i32 {
        self.factor
    }

    /// Whether the retry numbered `retry` (0-based) is still allowed.
    pub fn should_retry(&self, retry: u32) -> bool {
        i64::from(retry) < i64::from(self.max_retries)
    }

    /// Wait before the retry numbered `retry`, or `None` once retries are
    /// exhausted.  Constant time in `retry`.
    pub fn delay_for(&self, retry: u32) -> Option<Duration> {
        if !self.should_retry(retry) {
            return None;
        }
        let wait_ms = scaled_wait(i64::from(self.interval_ms), i64::from(self.factor), retry);
        Some(clamp_to_duration(wait_ms))
    }

    /// Every wait in the schedule, first retry first.
    pub fn delays(&self) -> RetryDelays {
        RetryDelays {
            remaining: u32::try_from(self.max_retries).unwrap_or(0),
            next_wait_ms: i64::from(self.interval_ms),
            factor: i64::from(self.factor),
        }
    }

    /// Sum of all waits if every retry is used, saturating at
    /// `Duration::MAX`.
    ///
    /// Within a few dozen steps the raw wait either saturates, reaches zero,
    /// or repeats with period two (factor `1` or `-1`).  From there the rest
    /// of the schedule is summed in closed form instead of walked.
    pub fn total_delay(&self) -> Duration {
        let mut delays = self.delays();
        let mut total = Duration::ZERO;
        while let Some(wait) = delays.next() {
            total = total.saturating_add(wait);
            if let Some(rest) = delays.periodic_sum() {
                return total.saturating_add(rest);
            }
        }
        total
    }
}

/// Iterator over the waits of an [`ExponentialRetryPolicy`].
#[derive(Debug, Clone)]
pub struct RetryDelays {
    remaining: u32,
    next_wait_ms: i64,
    factor: i64,
}

impl Iterator for RetryDelays {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let wait = clamp_to_duration(self.next_wait_ms);
        self.next_wait_ms = self.next_wait_ms.saturating_mul(self.factor);
        Some(wait)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RetryDelays {}

impl RetryDelays {
    /// Sum of the remaining waits when they alternate between at most two
    /// values, `None` while the schedule is still changing.
    fn periodic_sum(&self) -> Option<Duration> {
        let first = self.next_wait_ms;
        let second = first.saturating_mul(self.factor);
        if second.saturating_mul(self.factor) != first {
            return None;
        }
        let pair = clamp_to_duration(first).saturating_add(clamp_to_duration(second));
        let odd = if self.remaining % 2 == 1 {
            clamp_to_duration(first)
        } else {
            Duration::ZERO
        };
        Some(pair.saturating_mul(self.remaining / 2).saturating_add(odd))
    }
}

/// `interval * factor^steps` with the sign of the exact product, saturated
/// to the `i64` range.
fn scaled_wait(interval: i64, factor: i64, steps: u32) -> i64 {
    match factor.checked_pow(steps) {
        Some(scale) => interval.saturating_mul(scale),
        // Only reachable for |factor| >= 2, so the exact product is out of range.
        None if interval == 0 => 0,
        None => {
            let negative = (interval < 0) != (factor < 0 && steps % 2 == 1);
            if negative {
                i64::MIN
            } else {
                i64::MAX
            }
        }
    }
}

fn clamp_to_duration(ms: i64) -> Duration {
    Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
