#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Input and result types for the `BirthModel` savings calculator.
//!
//! The input shape has changed between revisions of the calculator, so every
//! shape is tagged with a [`SchemaVersion`] instead of being mutated in
//! place. [`CalculatorInputs`] is the current (`v2`) shape and
//! [`LegacyInputs`] is the original salary-based (`v1`) shape.
//!
//! Every type here is plain data. The formulas live in
//! `birthmodel_calculator`.

pub mod coerce;
pub mod format;
pub mod legacy;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use coerce::{RawNumber, coerce_number};
pub use format::format_amount;
pub use legacy::{LegacyCalculationResults, LegacyInputField, LegacyInputs};

/// Version tag of a calculator input schema.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SchemaVersion {
    /// Original revision: salary-based staff savings, single lag-time field.
    V1,
    /// Current revision: procedure counts, per-procedure lag hours and
    /// headcount-based staff time.
    #[default]
    V2,
}

impl SchemaVersion {
    /// All known schema versions, oldest first.
    pub const ALL: &[Self] = &[Self::V1, Self::V2];
}

/// Unit a calculator field is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldUnit {
    /// Plain count (deliveries, staff, procedures).
    Count,
    /// Percentage in the range 0-100.
    Percent,
    /// US dollars.
    Dollars,
    /// Hours.
    Hours,
}

/// Presentation metadata for one calculator field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Wire key (e.g., `"deliveriesPerYear"`).
    pub key: String,
    /// Form label.
    pub label: String,
    /// Title of the form group the field belongs to.
    pub group: String,
    /// Explanation shown on hover.
    pub tooltip: String,
    /// Typical-range hint shown next to the input.
    pub suggestion: String,
    /// Unit the value is expressed in.
    pub unit: FieldUnit,
    /// Slider lower bound.
    pub min: f64,
    /// Slider upper bound.
    pub max: f64,
    /// Slider increment.
    pub step: f64,
    /// Value a fresh calculator starts with. Filled from the schema
    /// defaults, not from TOML.
    #[serde(default)]
    pub default: f64,
}

/// A titled group of fields, in form order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGroup {
    /// Group title.
    pub title: String,
    /// Fields in this group.
    pub fields: Vec<FieldSpec>,
}

/// A field of the current (`v2`) input schema.
///
/// The string form is the wire key used in JSON bodies and form posts.
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
pub enum InputField {
    /// Annual delivery volume.
    DeliveriesPerYear,
    /// Percent of claims denied on first submission.
    DenialRate,
    /// Average dollar amount billed per delivery.
    ClaimAmount,
    /// Annual count of scheduled C-sections.
    CsectionCount,
    /// Annual count of scheduled inductions.
    InductionCount,
    /// Average hours from admission to C-section start.
    CsectionLagHours,
    /// Average hours from admission to induction start.
    InductionLagHours,
    /// Nurses scheduled per shift.
    NurseCount,
    /// Administrative staff per shift.
    AdminCount,
    /// Providers per shift.
    ProviderCount,
}

impl InputField {
    /// Every field, in form order.
    pub const ALL: &[Self] = &[
        Self::DeliveriesPerYear,
        Self::DenialRate,
        Self::ClaimAmount,
        Self::CsectionCount,
        Self::InductionCount,
        Self::CsectionLagHours,
        Self::InductionLagHours,
        Self::NurseCount,
        Self::AdminCount,
        Self::ProviderCount,
    ];
}

/// Facility metrics entered on the current (`v2`) calculator.
///
/// All values are plain reals. Nothing here is bounded or clamped: slider
/// ranges are presentation hints only. Fields missing from a deserialized
/// body take their [`Default`] value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorInputs {
    /// Annual delivery volume.
    pub deliveries_per_year: f64,
    /// Percent of claims denied on first submission (0-100).
    pub denial_rate: f64,
    /// Average dollar amount billed per delivery.
    pub claim_amount: f64,
    /// Annual count of scheduled C-sections.
    pub csection_count: f64,
    /// Annual count of scheduled inductions.
    pub induction_count: f64,
    /// Average hours from admission to C-section start.
    pub csection_lag_hours: f64,
    /// Average hours from admission to induction start.
    pub induction_lag_hours: f64,
    /// Nurses scheduled per shift.
    pub nurse_count: f64,
    /// Administrative staff per shift.
    pub admin_count: f64,
    /// Providers per shift.
    pub provider_count: f64,
}

impl CalculatorInputs {
    /// The values a fresh calculator starts with.
    pub const DEFAULT: Self = Self {
        deliveries_per_year: 1000.0,
        denial_rate: 15.0,
        claim_amount: 10_000.0,
        csection_count: 250.0,
        induction_count: 350.0,
        csection_lag_hours: 3.5,
        induction_lag_hours: 3.0,
        nurse_count: 5.0,
        admin_count: 5.0,
        provider_count: 10.0,
    };

    /// Inputs with every field set to zero.
    pub const ZERO: Self = Self {
        deliveries_per_year: 0.0,
        denial_rate: 0.0,
        claim_amount: 0.0,
        csection_count: 0.0,
        induction_count: 0.0,
        csection_lag_hours: 0.0,
        induction_lag_hours: 0.0,
        nurse_count: 0.0,
        admin_count: 0.0,
        provider_count: 0.0,
    };

    /// Returns the current value of `field`.
    #[must_use]
    pub const fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::DeliveriesPerYear => self.deliveries_per_year,
            InputField::DenialRate => self.denial_rate,
            InputField::ClaimAmount => self.claim_amount,
            InputField::CsectionCount => self.csection_count,
            InputField::InductionCount => self.induction_count,
            InputField::CsectionLagHours => self.csection_lag_hours,
            InputField::InductionLagHours => self.induction_lag_hours,
            InputField::NurseCount => self.nurse_count,
            InputField::AdminCount => self.admin_count,
            InputField::ProviderCount => self.provider_count,
        }
    }

    /// Overwrites a single field, leaving the others untouched.
    pub const fn set(&mut self, field: InputField, value: f64) {
        let slot = match field {
            InputField::DeliveriesPerYear => &mut self.deliveries_per_year,
            InputField::DenialRate => &mut self.denial_rate,
            InputField::ClaimAmount => &mut self.claim_amount,
            InputField::CsectionCount => &mut self.csection_count,
            InputField::InductionCount => &mut self.induction_count,
            InputField::CsectionLagHours => &mut self.csection_lag_hours,
            InputField::InductionLagHours => &mut self.induction_lag_hours,
            InputField::NurseCount => &mut self.nurse_count,
            InputField::AdminCount => &mut self.admin_count,
            InputField::ProviderCount => &mut self.provider_count,
        };
        *slot = value;
    }
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Savings breakdown derived from one [`CalculatorInputs`] snapshot.
///
/// Always produced whole by the calculator; there is no way to update one
/// term without recomputing all of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResults {
    /// Dollars recovered from fewer first-pass denials.
    pub denial_savings: f64,
    /// Procedure lag hours across scheduled C-sections and inductions.
    pub room_utilization_hours: f64,
    /// Portion of [`Self::room_utilization_hours`] the product is expected
    /// to recover.
    pub room_utilization_optimized: f64,
    /// Nurse hours saved per shift.
    pub nurse_time_savings: f64,
    /// Administrative staff hours saved per shift.
    pub admin_time_savings: f64,
    /// Provider hours saved per shift.
    pub provider_time_savings: f64,
    /// Sum of the denial, room-hour and staff terms.
    pub total_savings: f64,
}

impl CalculationResults {
    /// The five terms that make up [`Self::total_savings`], in summation
    /// order.
    #[must_use]
    pub const fn total_terms(&self) -> [f64; 5] {
        [
            self.denial_savings,
            self.room_utilization_hours,
            self.nurse_time_savings,
            self.admin_time_savings,
            self.provider_time_savings,
        ]
    }
}

/// Calculator inputs tagged with the schema they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schemaVersion", rename_all = "lowercase")]
pub enum VersionedInputs {
    /// Original salary-based inputs.
    V1(LegacyInputs),
    /// Current inputs.
    V2(CalculatorInputs),
}

impl VersionedInputs {
    /// Default inputs for `version`.
    #[must_use]
    pub const fn defaults(version: SchemaVersion) -> Self {
        match version {
            SchemaVersion::V1 => Self::V1(LegacyInputs::DEFAULT),
            SchemaVersion::V2 => Self::V2(CalculatorInputs::DEFAULT),
        }
    }

    /// The schema these inputs belong to.
    #[must_use]
    pub const fn version(&self) -> SchemaVersion {
        match self {
            Self::V1(_) => SchemaVersion::V1,
            Self::V2(_) => SchemaVersion::V2,
        }
    }

    /// Overwrites the field named by the wire key `key`.
    ///
    /// # Errors
    ///
    /// Returns [`strum::ParseError`] if `key` is not a field of this
    /// schema.
    pub fn set_by_key(&mut self, key: &str, value: f64) -> Result<(), strum::ParseError> {
        match self {
            Self::V1(inputs) => inputs.set(key.parse()?, value),
            Self::V2(inputs) => inputs.set(key.parse()?, value),
        }
        Ok(())
    }

    /// Reads the field named by the wire key `key`.
    ///
    /// # Errors
    ///
    /// Returns [`strum::ParseError`] if `key` is not a field of this
    /// schema.
    pub fn get_by_key(&self, key: &str) -> Result<f64, strum::ParseError> {
        Ok(match self {
            Self::V1(inputs) => inputs.get(key.parse()?),
            Self::V2(inputs) => inputs.get(key.parse()?),
        })
    }
}

impl From<CalculatorInputs> for VersionedInputs {
    fn from(inputs: CalculatorInputs) -> Self {
        Self::V2(inputs)
    }
}

impl From<LegacyInputs> for VersionedInputs {
    fn from(inputs: LegacyInputs) -> Self {
        Self::V1(inputs)
    }
}

/// Results tagged with the schema that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schemaVersion", rename_all = "lowercase")]
pub enum VersionedResults {
    /// Results of the salary-based formula.
    V1(LegacyCalculationResults),
    /// Results of the current formula.
    V2(CalculationResults),
}

impl VersionedResults {
    /// The schema that produced these results.
    #[must_use]
    pub const fn version(&self) -> SchemaVersion {
        match self {
            Self::V1(_) => SchemaVersion::V1,
            Self::V2(_) => SchemaVersion::V2,
        }
    }

    /// Headline total regardless of schema.
    #[must_use]
    pub const fn total_savings(&self) -> f64 {
        match self {
            Self::V1(results) => results.total_savings,
            Self::V2(results) => results.total_savings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_match_wire_names() {
        assert_eq!(InputField::DeliveriesPerYear.as_ref(), "deliveriesPerYear");
        assert_eq!(InputField::CsectionLagHours.as_ref(), "csectionLagHours");
        assert_eq!(
            "inductionLagHours".parse::<InputField>().unwrap(),
            InputField::InductionLagHours
        );
        assert!("lagTimes".parse::<InputField>().is_err());
    }

    #[test]
    fn set_touches_only_one_field() {
        let mut inputs = CalculatorInputs::DEFAULT;
        inputs.set(InputField::NurseCount, 12.0);
        for field in InputField::ALL {
            let expected = if *field == InputField::NurseCount {
                12.0
            } else {
                CalculatorInputs::DEFAULT.get(*field)
            };
            assert!(
                (inputs.get(*field) - expected).abs() < f64::EPSILON,
                "{field} changed unexpectedly"
            );
        }
    }

    #[test]
    fn missing_json_fields_take_defaults() {
        let inputs: CalculatorInputs =
            serde_json::from_str(r#"{"deliveriesPerYear": 2000}"#).unwrap();
        assert!((inputs.deliveries_per_year - 2000.0).abs() < f64::EPSILON);
        assert!((inputs.claim_amount - 10_000.0).abs() < f64::EPSILON);
        assert!((inputs.csection_lag_hours - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn versioned_inputs_are_tagged() {
        let json = serde_json::to_value(VersionedInputs::defaults(SchemaVersion::V1)).unwrap();
        assert_eq!(json["schemaVersion"], "v1");
        assert_eq!(json["nurseSalary"], 400.0);

        let parsed: VersionedInputs =
            serde_json::from_str(r#"{"schemaVersion": "v2", "nurseCount": 7}"#).unwrap();
        assert_eq!(parsed.version(), SchemaVersion::V2);
        assert!((parsed.get_by_key("nurseCount").unwrap() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn set_by_key_rejects_fields_of_other_schema() {
        let mut inputs = VersionedInputs::defaults(SchemaVersion::V2);
        assert!(inputs.set_by_key("nurseSalary", 500.0).is_err());
        assert!(inputs.set_by_key("adminCount", 9.0).is_ok());
        assert!((inputs.get_by_key("adminCount").unwrap() - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn schema_version_parses_case_insensitively() {
        assert_eq!("V1".parse::<SchemaVersion>().unwrap(), SchemaVersion::V1);
        assert_eq!("v2".parse::<SchemaVersion>().unwrap(), SchemaVersion::V2);
        assert_eq!(SchemaVersion::default(), SchemaVersion::V2);
        assert!("v3".parse::<SchemaVersion>().is_err());
    }
}
