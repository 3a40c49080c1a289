#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Contact form and lead submission payload types.
//!
//! A lead is a [`ContactForm`] with a finished [`CalculationResults`]
//! snapshot attached. The submission payload is a single flat JSON object:
//! contact fields, result fields, a document id and a timestamp, all in
//! camelCase.

use birthmodel_calculator_models::CalculationResults;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A field of the contact form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ContactField {
    /// Full name.
    Name,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Hospital name.
    HospitalName,
    /// City / state.
    Location,
    /// Free-text notes and questions.
    Specification,
}

impl ContactField {
    /// Every field, in form order.
    pub const ALL: &[Self] = &[
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::HospitalName,
        Self::Location,
        Self::Specification,
    ];

    /// Whether the form refuses to submit while this field is blank.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Specification)
    }

    /// Form label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::HospitalName => "Hospital Name",
            Self::Location => "Location",
            Self::Specification => "Additional Specifications",
        }
    }
}

/// Contact details entered on the "Request Detailed Analysis" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Hospital name.
    pub hospital_name: String,
    /// City / state.
    pub location: String,
    /// Free-text notes and questions. Optional.
    pub specification: String,
}

impl ContactForm {
    /// Returns the current value of `field`.
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::HospitalName => &self.hospital_name,
            ContactField::Location => &self.location,
            ContactField::Specification => &self.specification,
        }
    }

    /// Overwrites a single field.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::HospitalName => &mut self.hospital_name,
            ContactField::Location => &mut self.location,
            ContactField::Specification => &mut self.specification,
        };
        *slot = value.into();
    }

    /// Required fields that are empty or whitespace-only, in form order.
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<ContactField> {
        ContactField::ALL
            .iter()
            .copied()
            .filter(|field| field.is_required() && self.get(*field).trim().is_empty())
            .collect()
    }

    /// Whether every required field has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_required_fields().is_empty()
    }
}

/// Formats a submission time as an ISO 8601 UTC timestamp with millisecond
/// precision (e.g., `2024-03-01T14:05:09.123Z`).
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The payload handed to a submission sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    /// Document id assigned to this lead.
    pub id: String,
    /// Contact details, flattened into the payload.
    #[serde(flatten)]
    pub contact: ContactForm,
    /// Calculator results, flattened into the payload.
    #[serde(flatten)]
    pub results: CalculationResults,
    /// When the lead was submitted (see [`format_timestamp`]).
    pub timestamp: String,
}

impl LeadSubmission {
    /// Builds a payload from a contact form and a results snapshot.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        contact: ContactForm,
        results: CalculationResults,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            contact,
            results,
            timestamp: format_timestamp(submitted_at),
        }
    }

    /// Receipt describing this submission.
    #[must_use]
    pub fn receipt(&self) -> LeadReceipt {
        LeadReceipt {
            id: self.id.clone(),
            submitted_at: self.timestamp.clone(),
            total_savings: self.results.total_savings,
        }
    }
}

/// Confirmation returned once a sink has accepted a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadReceipt {
    /// Document id of the stored lead.
    pub id: String,
    /// Submission timestamp.
    pub submitted_at: String,
    /// Headline savings figure quoted back to the user.
    pub total_savings: f64,
}
