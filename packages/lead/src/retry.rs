//! HTTP retry helper for transient submission errors.
//!
//! Remote sinks call [`send`] instead of `reqwest::RequestBuilder::send()`
//! so that every submission gets exponential backoff on connection
//! failures, timeouts, rate limiting and server errors.
//!
//! ```ignore
//! let response = retry::send(|| client.put(&url).json(&lead), &policy).await?;
//! ```

use std::time::Duration;

use reqwest::StatusCode;

use crate::LeadError;

/// Maximum length of the response body kept in [`LeadError::Status`].
const BODY_PREVIEW_LEN: usize = 500;

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Two retries, one second apart then two (three attempts in total).
    pub const DEFAULT: Self = Self {
        max_retries: 2,
        base_delay: Duration::from_secs(1),
    };

    /// Delay before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(1u32 << attempt.saturating_sub(1).min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sends the request built by `build_request`, retrying transient failures
/// according to `policy`.
///
/// The closure is called once per attempt since builders are consumed by
/// `.send()`. HTTP 4xx responses other than 429 are permanent and are not
/// retried.
///
/// # Errors
///
/// Returns [`LeadError::Http`] if the request cannot be sent, or
/// [`LeadError::Status`] if the server answers with a non-success status
/// after all retries.
pub async fn send<F>(build_request: F, policy: &RetryPolicy) -> Result<reqwest::Response, LeadError>
where
    F: Fn() -> reqwest::RequestBuilder + Send + Sync,
{
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = policy.delay_for(attempt);
            log::warn!("  retry {attempt}/{} in {delay:?}...", policy.max_retries);
            tokio::time::sleep(delay).await;
        }

        let can_retry = attempt < policy.max_retries;
        attempt += 1;

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && can_retry {
                    log::warn!("  transient error: {e}");
                    continue;
                }
                return Err(LeadError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return Ok(response);
                }

                if is_retryable_status(status) && can_retry {
                    log::warn!("  HTTP {status}");
                    continue;
                }

                let body = response.text().await.unwrap_or_default();
                return Err(LeadError::Status {
                    status: status.as_u16(),
                    body: truncate(&body, BODY_PREVIEW_LEN),
                });
            }
        }
    }
}

/// Returns `true` for statuses worth retrying: 429 and any 5xx.
#[must_use]
pub fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_request()
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
