#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the `BirthModel` ROI server.
//!
//! These types are serialized to JSON for the REST API. They wrap the
//! calculator and lead model types so the API contract can evolve
//! separately from them.

use std::collections::BTreeMap;

use birthmodel_calculator_models::{
    CalculationResults, FieldGroup, RawNumber, SchemaVersion, VersionedInputs, VersionedResults,
};
use birthmodel_lead_models::{ContactField, ContactForm, LeadReceipt};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Query parameters for the fields endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsQueryParams {
    /// Schema to describe. Defaults to the current schema.
    pub schema_version: Option<SchemaVersion>,
}

/// Field metadata for one schema, grouped by form section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFields {
    /// Schema the fields belong to.
    pub schema_version: SchemaVersion,
    /// Form sections in display order.
    pub groups: Vec<FieldGroup>,
}

/// Body of a calculate request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Schema the inputs belong to. Defaults to the current schema.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Raw field values keyed by wire name. Absent fields keep their
    /// defaults; unparseable values count as zero.
    #[serde(default)]
    pub inputs: BTreeMap<String, RawNumber>,
}

/// Response of a calculate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    /// The inputs after defaults and coercion were applied.
    pub inputs: VersionedInputs,
    /// Results computed from [`Self::inputs`].
    pub results: VersionedResults,
}

/// Body of a lead submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    /// Contact details.
    pub contact: ContactForm,
    /// Raw current-schema field values the results are computed from.
    #[serde(default)]
    pub inputs: BTreeMap<String, RawNumber>,
}

/// Response of an accepted lead submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadAccepted {
    /// Receipt from the submission sink.
    #[serde(flatten)]
    pub receipt: LeadReceipt,
    /// Results attached to the lead.
    pub results: CalculationResults,
}

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
    /// Required contact fields left blank, when that was the problem.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<ContactField>,
    /// Results that were computed before the failure, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<CalculationResults>,
}

impl ApiError {
    /// An error carrying only a message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            missing_fields: Vec::new(),
            results: None,
        }
    }
}
