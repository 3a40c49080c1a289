//! Sink selection from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `LEAD_SINK` | `log` | `log`, `key_value` (alias `kv`) or `webhook` |
//! | `LEAD_SINK_URL` | | Store base URL (`key_value`) or endpoint URL (`webhook`) |
//! | `LEAD_SINK_COLLECTION` | `leads` | Document collection for `key_value` |
//! | `LEAD_SINK_API_KEY` | | Static API key for `key_value` |
//! | `LEAD_SINK_API_KEY_HEADER` | `x-api-key` | Header the API key is sent in |
//! | `LEAD_SINK_TIMEOUT_SECS` | `30` | Per-request timeout for remote sinks |
//! | `LEAD_SINK_RETRIES` | `2` | Retries after a failed remote attempt |

use std::sync::Arc;
use std::time::Duration;

use strum_macros::{AsRefStr, Display, EnumString};

use crate::LeadError;
use crate::retry::RetryPolicy;
use crate::sinks::key_value::DEFAULT_API_KEY_HEADER;
use crate::sinks::{KeyValueStoreSink, LogSink, SubmissionSink, WebhookSink};

/// Collection used when `LEAD_SINK_COLLECTION` is unset.
pub const DEFAULT_COLLECTION: &str = "leads";

/// Request timeout used when `LEAD_SINK_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which sink to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SinkKind {
    /// Log the payload only.
    #[default]
    Log,
    /// Hosted key-value document store.
    #[strum(to_string = "key_value", serialize = "kv")]
    KeyValue,
    /// Webhook endpoint.
    Webhook,
}

/// Resolved sink configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Sink to build.
    pub kind: SinkKind,
    /// Base URL (key-value) or endpoint URL (webhook).
    pub url: Option<String>,
    /// Document collection for the key-value store.
    pub collection: String,
    /// Static API key for the key-value store.
    pub api_key: Option<String>,
    /// Header the API key is sent in.
    pub api_key_header: String,
    /// Per-request timeout for remote sinks.
    pub timeout: Duration,
    /// Retries after the first attempt of a remote submission.
    pub retries: u32,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::Log,
            url: None,
            collection: DEFAULT_COLLECTION.to_string(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retries: RetryPolicy::DEFAULT.max_retries,
        }
    }
}

impl SinkConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::Config`] if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, LeadError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::Config`] if `LEAD_SINK` names an unknown sink, or
    /// if `LEAD_SINK_TIMEOUT_SECS` or `LEAD_SINK_RETRIES` is not a whole
    /// number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LeadError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let kind = match get("LEAD_SINK") {
            Some(raw) => raw.trim().parse().map_err(|_| LeadError::Config {
                message: format!("Unknown LEAD_SINK '{raw}' (expected log, key_value or webhook)"),
            })?,
            None => SinkKind::default(),
        };

        let timeout = match get("LEAD_SINK_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|_| LeadError::Config {
                message: format!("LEAD_SINK_TIMEOUT_SECS must be a whole number, got '{raw}'"),
            })?),
            None => defaults.timeout,
        };

        let retries = match get("LEAD_SINK_RETRIES") {
            Some(raw) => raw.trim().parse().map_err(|_| LeadError::Config {
                message: format!("LEAD_SINK_RETRIES must be a whole number, got '{raw}'"),
            })?,
            None => defaults.retries,
        };

        Ok(Self {
            kind,
            url: get("LEAD_SINK_URL"),
            collection: get("LEAD_SINK_COLLECTION").unwrap_or(defaults.collection),
            api_key: get("LEAD_SINK_API_KEY"),
            api_key_header: get("LEAD_SINK_API_KEY_HEADER").unwrap_or(defaults.api_key_header),
            timeout,
            retries,
        })
    }

    /// Retry policy for remote sinks.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retries,
            ..RetryPolicy::DEFAULT
        }
    }

    /// Builds the configured sink.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::Config`] if a remote sink has no URL, or
    /// [`LeadError::Http`] if the HTTP client cannot be built.
    pub fn build(&self) -> Result<Arc<dyn SubmissionSink>, LeadError> {
        match self.kind {
            SinkKind::Log => Ok(Arc::new(LogSink)),
            SinkKind::KeyValue => {
                let url = self.require_url()?;
                let mut sink = KeyValueStoreSink::new(self.http_client()?, url, &self.collection)
                    .with_retry(self.retry_policy());
                if let Some(key) = &self.api_key {
                    sink = sink.with_api_key(&self.api_key_header, key.clone());
                } else {
                    log::warn!("LEAD_SINK_API_KEY is not set; key-value requests are unauthenticated");
                }
                Ok(Arc::new(sink))
            }
            SinkKind::Webhook => {
                let url = self.require_url()?;
                Ok(Arc::new(
                    WebhookSink::new(self.http_client()?, url).with_retry(self.retry_policy()),
                ))
            }
        }
    }

    fn require_url(&self) -> Result<&str, LeadError> {
        self.url.as_deref().ok_or_else(|| LeadError::Config {
            message: format!("LEAD_SINK_URL is required for the {} sink", self.kind),
        })
    }

    fn http_client(&self) -> Result<reqwest::Client, LeadError> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }
}
