//! Hosted key-value document store sink.
//!
//! Each lead is written as its own JSON document with
//! `PUT {base_url}/{collection}/{id}`. The store authenticates with a
//! single static API key sent in a request header.

use birthmodel_lead_models::LeadSubmission;

use super::SubmissionSink;
use crate::LeadError;
use crate::retry::{self, RetryPolicy};

/// Header the API key is sent in unless configured otherwise.
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Writes leads to a hosted key-value document store.
pub struct KeyValueStoreSink {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    api_key: Option<String>,
    api_key_header: String,
    retry: RetryPolicy,
}

impl KeyValueStoreSink {
    /// Creates a sink writing into `collection` under `base_url`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, collection: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.trim_matches('/').to_string(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            retry: RetryPolicy::DEFAULT,
        }
    }

    /// Sends `api_key` in the `header` request header.
    #[must_use]
    pub fn with_api_key(mut self, header: &str, api_key: String) -> Self {
        header.clone_into(&mut self.api_key_header);
        self.api_key = Some(api_key);
        self
    }

    /// Overrides the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// URL of the document a lead with `id` is stored at.
    #[must_use]
    pub fn document_url(&self, id: &str) -> String {
        format!("{}/{}/{id}", self.base_url, self.collection)
    }

    fn request(&self, lead: &LeadSubmission) -> reqwest::RequestBuilder {
        let builder = self.client.put(self.document_url(&lead.id)).json(lead);
        match &self.api_key {
            Some(key) => builder.header(self.api_key_header.as_str(), key),
            None => builder,
        }
    }
}

#[async_trait::async_trait]
impl SubmissionSink for KeyValueStoreSink {
    fn name(&self) -> &'static str {
        "key_value"
    }

    async fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        let url = self.document_url(&lead.id);
        log::debug!("PUT {url}");
        retry::send(|| self.request(lead), &self.retry).await?;
        Ok(())
    }
}
