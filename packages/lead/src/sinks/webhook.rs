//! Webhook sink for spreadsheet-script style endpoints.
//!
//! Posts the whole payload as JSON to a single URL (for example a
//! spreadsheet macro that appends a row per request).

use birthmodel_lead_models::LeadSubmission;

use super::SubmissionSink;
use crate::LeadError;
use crate::retry::{self, RetryPolicy};

/// Posts leads to a webhook URL.
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

impl WebhookSink {
    /// Creates a sink posting to `url`.
    #[must_use]
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
            retry: RetryPolicy::DEFAULT,
        }
    }

    /// Overrides the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn request(&self, lead: &LeadSubmission) -> reqwest::RequestBuilder {
        self.client.post(&self.url).json(lead)
    }
}

#[async_trait::async_trait]
impl SubmissionSink for WebhookSink {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        log::debug!("POST {}", self.url);
        retry::send(|| self.request(lead), &self.retry).await?;
        Ok(())
    }
}
