//! Exponential backoff with optional jitter.

use rand::Rng;
use std::time::Duration;

/// Calculate the delay to wait after the given failed attempt.
///
/// `attempt` is 1-based: the delay after the first failure is `base_ms`, and
/// each further failure multiplies it by `multiplier`, capped at `max_ms`.
/// `jitter_percent` adds up to that percentage of the delay at random.
pub fn calculate_backoff(
    attempt: u32,
    base_ms: u64,
    multiplier: u32,
    max_ms: u64,
    jitter_percent: u64,
) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = u64::from(multiplier).saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    let jitter_range = capped_delay.saturating_mul(jitter_percent) / 100;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay.saturating_add(jitter))
}
