use std::time::Duration;

/// Delay between attempts after a transient (502/503) response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed(Duration),
    /// `base * 2^retry`, never more than `cap`.
    Exponential { base: Duration, cap: Duration },
}

/// How the transport reacts to transient server unavailability.
///
/// The default retries forever with a fixed 3 second delay.
///
/// # Examples
///
/// ```
/// use bundler_vidispine::{Backoff, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default()
///     .max_attempts(Some(5))
///     .backoff(Backoff::Exponential {
///         base: Duration::from_millis(500),
///         cap: Duration::from_secs(30),
///     });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. `None` never gives up.
    ///
    /// Default: None
    pub max_attempts: Option<u32>,

    /// Default: `Backoff::Fixed(3s)`
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            backoff: Backoff::Fixed(Duration::from_secs(3)),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Whether another attempt may follow `attempts` completed ones.
    pub fn should_retry(&self, attempts: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempts < max)
    }

    /// Delay before retry number `retry` (0 = first retry).
    pub fn delay(&self, retry: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { base, cap } => crate::core::retry_delay(retry, base, cap),
        }
    }
}
