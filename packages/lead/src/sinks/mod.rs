//! Submission sink abstraction and implementations.

pub mod key_value;
pub mod webhook;

use std::sync::Mutex;

use birthmodel_lead_models::LeadSubmission;

use crate::LeadError;

pub use key_value::KeyValueStoreSink;
pub use webhook::WebhookSink;

/// Destination for finished leads.
#[async_trait::async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Short name used in logs (e.g., `"key_value"`).
    fn name(&self) -> &str;

    /// Stores one lead.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError`] if the lead could not be stored.
    async fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError>;
}

/// Sink that only logs the payload. Used when no remote store is
/// configured.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait::async_trait]
impl SubmissionSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        log::info!(
            "Lead {} from {} <{}> at {}: total savings {}",
            lead.id,
            lead.contact.name,
            lead.contact.email,
            lead.contact.hospital_name,
            lead.results.total_savings,
        );
        log::debug!("Lead payload: {}", serde_json::to_string(lead)?);
        Ok(())
    }
}

/// Sink that keeps submissions in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    submissions: Mutex<Vec<LeadSubmission>>,
    reject: bool,
}

impl MemorySink {
    /// Creates an empty sink that accepts every lead.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that rejects every lead as if the remote store were
    /// unavailable (HTTP 503).
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    /// Leads accepted so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the `Mutex` is poisoned.
    #[must_use]
    pub fn submissions(&self) -> Vec<LeadSubmission> {
        self.submissions
            .lock()
            .expect("MemorySink mutex poisoned")
            .clone()
    }
}

#[async_trait::async_trait]
impl SubmissionSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        if self.reject {
            return Err(LeadError::Status {
                status: 503,
                body: "memory sink is rejecting submissions".to_string(),
            });
        }

        self.submissions
            .lock()
            .expect("MemorySink mutex poisoned")
            .push(lead.clone());
        Ok(())
    }
}
