//! Exponential backoff with jitter for status polling.

use rand::Rng;
use std::time::Duration;

/// Delay before poll number `attempt` (0-based): `base * 2^attempt`,
/// capped at `max`, minus up to 10% jitter so polls from many clients spread
/// out without ever exceeding the cap.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    let exponential = 2u64.saturating_pow(attempt);
    let capped_delay = base_ms.saturating_mul(exponential).min(max_ms.max(base_ms));

    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay - jitter)
}

/// Stateful poll schedule.
#[derive(Debug, Clone)]
pub struct PollBackoff {
    attempt: u32,
    base_ms: u64,
    max_ms: u64,
}

impl PollBackoff {
    pub fn new(base_ms: u64, max_ms: u64) -> Self {
        Self {
            attempt: 0,
            base_ms,
            max_ms,
        }
    }

    /// Delay before the next poll.
    pub fn next_delay(&mut self) -> Duration {
        let delay = calculate_backoff(self.attempt, self.base_ms, self.max_ms);
        self.attempt = self.attempt.saturating_add(1);
        delay
    }

    /// Number of delays handed out so far.
    pub fn attempts(&self) -> u32 {
        self.attempt
    }
}
