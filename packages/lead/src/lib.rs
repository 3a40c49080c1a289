#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lead submission for the `BirthModel` ROI calculator.
//!
//! A lead is handed to a [`SubmissionSink`]. The sink is an opaque
//! collaborator: the calculator produces its results before and
//! independently of any submission, and a failing sink never affects them.
//!
//! Sinks are selected at startup from environment variables (see
//! [`config`]):
//!
//! | Sink | Transport |
//! |---|---|
//! | [`sinks::KeyValueStoreSink`] | `PUT {base}/{collection}/{id}` with a static API key header |
//! | [`sinks::WebhookSink`] | `POST {url}` (spreadsheet-script style endpoint) |
//! | [`sinks::LogSink`] | logs the payload; used when nothing is configured |
//! | [`sinks::MemorySink`] | keeps submissions in memory |

pub mod config;
pub mod retry;
pub mod sinks;

#[cfg(test)]
mod test_server;

use birthmodel_calculator_models::CalculationResults;
use birthmodel_lead_models::{ContactField, ContactForm, LeadReceipt, LeadSubmission};
use thiserror::Error;

pub use config::{SinkConfig, SinkKind};
pub use sinks::SubmissionSink;

/// Errors from lead submission.
#[derive(Debug, Error)]
pub enum LeadError {
    /// Required contact fields were left blank.
    #[error("Missing required contact fields: {}", join_fields(.fields))]
    MissingFields {
        /// The blank fields, in form order.
        fields: Vec<ContactField>,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store answered with a non-success status.
    #[error("Submission rejected with HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// Sink configuration is incomplete or invalid.
    #[error("Invalid sink configuration: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },

    /// Payload could not be serialized.
    #[error("Failed to serialize lead: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn join_fields(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(AsRef::<str>::as_ref)
        .collect::<Vec<&str>>()
        .join(", ")
}

/// Submits a lead built from `contact` and a finished results snapshot.
///
/// Assigns a fresh document id and timestamp, hands the payload to `sink`
/// and returns a receipt.
///
/// # Errors
///
/// Returns [`LeadError::MissingFields`] without contacting the sink if any
/// required contact field is blank, or whatever error the sink reports.
pub async fn submit_lead(
    sink: &dyn SubmissionSink,
    contact: ContactForm,
    results: CalculationResults,
) -> Result<LeadReceipt, LeadError> {
    let missing = contact.missing_required_fields();
    if !missing.is_empty() {
        return Err(LeadError::MissingFields { fields: missing });
    }

    let lead = LeadSubmission::new(
        uuid::Uuid::new_v4().to_string(),
        contact,
        results,
        chrono::Utc::now(),
    );

    log::info!("Submitting lead {} via {} sink", lead.id, sink.name());
    sink.submit(&lead).await?;
    log::info!("Lead {} accepted", lead.id);

    Ok(lead.receipt())
}
