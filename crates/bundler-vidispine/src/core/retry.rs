use std::time::Duration;

/// Delay before retry number `retry` (0 = first retry) under exponential
/// backoff: `base` doubled `retry` times, never more than `cap`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use bundler_vidispine::retry_delay;
///
/// let base = Duration::from_millis(100);
/// let cap = Duration::from_secs(1);
///
/// assert_eq!(retry_delay(0, base, cap), Duration::from_millis(100));
/// assert_eq!(retry_delay(2, base, cap), Duration::from_millis(400));
/// assert_eq!(retry_delay(10, base, cap), cap);
/// ```
pub fn retry_delay(retry: u32, base: Duration, cap: Duration) -> Duration {
    match 1u32.checked_shl(retry).and_then(|factor| base.checked_mul(factor)) {
        Some(delay) => delay.min(cap),
        None => cap,
    }
}
