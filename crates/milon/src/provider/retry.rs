//! Retry/backoff policy shared by the network adapters.
//!
//! Every network adapter honors the same fail-soft contract: transient
//! failures are retried up to a fixed bound, and an exhausted bound
//! degrades to the adapter's documented empty result instead of an error.

use std::time::Duration;

/// A failed fetch attempt, classified for backoff purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 429 - back off harder before retrying.
    RateLimited,
    /// Any other network, HTTP, or payload failure.
    Failed(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::RateLimited => f.write_str("rate limited (429)"),
            FetchError::Failed(msg) => f.write_str(msg),
        }
    }
}

/// Retry bounds and delays for network adapters.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: usize,
    /// Base delay after a rate-limit response; scaled by attempt number.
    pub rate_limit_base: Duration,
    /// Base delay after any other failure; scaled by attempt number.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_base: Duration::from_millis(2000),
            retry_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Zero-delay policy for tests.
    pub fn immediate() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_base: Duration::ZERO,
            retry_delay: Duration::ZERO,
        }
    }

    /// Run `op` under this policy.
    ///
    /// Returns `None` once the attempt bound is exhausted; the final
    /// failure is logged with `label` so batch output names the term.
    pub fn run<T>(
        &self,
        label: &str,
        mut op: impl FnMut() -> Result<T, FetchError>,
    ) -> Option<T> {
        for attempt in 1..=self.max_attempts {
            match op() {
                Ok(value) => return Some(value),
                Err(err) => {
                    if attempt == self.max_attempts {
                        tracing::warn!("{}: giving up after {} attempts: {}", label, attempt, err);
                        return None;
                    }
                    let delay = match err {
                        FetchError::RateLimited => self.rate_limit_base * attempt as u32,
                        FetchError::Failed(_) => self.retry_delay * attempt as u32,
                    };
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_on_first_attempt() {
        let policy = RetryPolicy::immediate();
        let mut calls = 0;
        let result = policy.run("test", || {
            calls += 1;
            Ok::<_, FetchError>(42)
        });
        assert_eq!(result, Some(42));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_recovers_within_bound() {
        let policy = RetryPolicy::immediate();
        let mut calls = 0;
        let result = policy.run("test", || {
            calls += 1;
            if calls < 3 {
                Err(FetchError::Failed("boom".to_string()))
            } else {
                Ok(7)
            }
        });
        assert_eq!(result, Some(7));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_bound_exhausted_before_fourth_attempt() {
        // Three consecutive 429s exhaust the bound; a would-be success on
        // the fourth attempt is never reached.
        let policy = RetryPolicy::immediate();
        let mut calls = 0;
        let result = policy.run("test", || {
            calls += 1;
            if calls <= 3 {
                Err(FetchError::RateLimited)
            } else {
                Ok(99)
            }
        });
        assert_eq!(result, None);
        assert_eq!(calls, 3);
    }
}
