use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, the first one included.
    pub max_attempts: usize,
    /// Pause between two attempts.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            delay: Duration::from_secs(3),
        }
    }
}

/// Runs `f` until it succeeds or `max_attempts` is used up, returning the
/// last error in that case.
pub async fn retry_async<F, Fut, T, E>(config: &RetryConfig, mut f: F) -> Result<T, E>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match f(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) => {
                if attempt >= config.max_attempts {
                    return Err(e);
                }
                log::warn!(
                    "Attempt {}/{} failed: {}; retrying in {:?}",
                    attempt,
                    config.max_attempts,
                    e,
                    config.delay
                );
                tokio::time::sleep(config.delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn quick(max_attempts: usize) -> RetryConfig {
        RetryConfig {
            max_attempts,
            delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn succeeds_after_failures() {
        let counter = AtomicUsize::new(0);
        let res: Result<usize, &'static str> = retry_async(&quick(3), |_| async {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err("fail")
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(res, Ok(2));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_at_max_attempts_with_last_error() {
        let counter = AtomicUsize::new(0);
        let res: Result<(), String> = retry_async(&quick(2), |attempt| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Err(format!("failure #{}", attempt)) }
        })
        .await;

        assert_eq!(res, Err("failure #2".to_string()));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn single_attempt_never_sleeps() {
        let res: Result<(), &'static str> = retry_async(
            &RetryConfig {
                max_attempts: 1,
                delay: Duration::from_secs(3600),
            },
            |_| async { Err("down") },
        )
        .await;
        assert_eq!(res, Err("down"));
    }
}
