//! Builds calculator inputs from raw form values.
//!
//! A raw submission is a map from wire key to whatever the client sent.
//! Keys that are absent keep the schema default (the user never touched
//! that field), keys that are present are coerced with
//! [`RawNumber::coerce`] so unparseable text becomes `0.0`, and keys that do
//! not belong to the schema are skipped.

use std::collections::BTreeMap;

use birthmodel_calculator_models::{CalculatorInputs, RawNumber, SchemaVersion, VersionedInputs};

/// Raw field values keyed by wire name.
pub type RawInputs = BTreeMap<String, RawNumber>;

/// Builds inputs of schema `version` from raw field values.
#[must_use]
pub fn parse_inputs(version: SchemaVersion, raw: &RawInputs) -> VersionedInputs {
    let mut inputs = VersionedInputs::defaults(version);

    for (key, value) in raw {
        if inputs.set_by_key(key, value.coerce()).is_err() {
            log::debug!("Ignoring unknown {version} calculator field '{key}'");
        }
    }

    inputs
}

/// Builds current-schema inputs from raw field values.
#[must_use]
pub fn parse_current(raw: &RawInputs) -> CalculatorInputs {
    let mut inputs = CalculatorInputs::DEFAULT;

    for (key, value) in raw {
        match key.parse() {
            Ok(field) => inputs.set(field, value.coerce()),
            Err(_) => log::debug!("Ignoring unknown calculator field '{key}'"),
        }
    }

    inputs
}
