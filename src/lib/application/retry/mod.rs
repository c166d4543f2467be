//! Bounded retry around a single agent task.
//!
//! Attempts run strictly one after another with a fixed pause between a
//! failure and the next attempt. Every error is treated alike. Nothing carries
//! over between attempts except whatever external state the task itself left
//! behind (for a browser agent, the page it was on).

mod observer;
mod policy;

#[cfg(test)]
mod tests;

pub use observer::{RetryObserver, TerminalObserver};
pub use policy::RetryPolicy;

use crate::constants::FAILURE_SENTINEL;
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{info, warn};

/// One unit of work that may be attempted repeatedly with the same prompt.
#[async_trait]
pub trait RetryableTask: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn attempt(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// How a retried task ended.
#[derive(Debug)]
pub enum RetryOutcome<E> {
    Succeeded { value: String, attempts: u32 },
    Exhausted { attempts: u32, last_error: E },
}

impl<E> RetryOutcome<E> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Succeeded { attempts, .. } | RetryOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RetryOutcome::Succeeded { .. })
    }

    /// The answer, or the fixed failure sentinel once attempts ran out.
    pub fn into_message(self) -> String {
        match self {
            RetryOutcome::Succeeded { value, .. } => value,
            RetryOutcome::Exhausted { .. } => FAILURE_SENTINEL.to_string(),
        }
    }
}

/// Attempt `task` up to `policy.attempts()` times, pausing `policy.delay()`
/// after each failure that still has an attempt left. Never returns an error.
pub async fn run_with_retries<T, O>(
    task: &T,
    prompt: &str,
    policy: &RetryPolicy,
    observer: &mut O,
) -> RetryOutcome<T::Error>
where
    T: RetryableTask + ?Sized,
    O: RetryObserver + ?Sized,
{
    let limit = policy.attempts();
    let mut attempt = 1;

    loop {
        info!(attempt, limit, "Starting task attempt");
        observer.attempt_started(attempt, limit);

        let error = match task.attempt(prompt).await {
            Ok(value) => {
                info!(attempt, "Task attempt succeeded");
                return RetryOutcome::Succeeded {
                    value,
                    attempts: attempt,
                };
            }
            Err(error) => error,
        };

        warn!(attempt, limit, %error, "Task attempt failed");
        observer.attempt_failed(attempt, &error);

        if attempt >= limit {
            warn!(attempts = attempt, "Giving up after final attempt");
            return RetryOutcome::Exhausted {
                attempts: attempt,
                last_error: error,
            };
        }

        observer.retry_scheduled(attempt, policy.delay());
        sleep(policy.delay()).await;
        attempt += 1;
    }
}
