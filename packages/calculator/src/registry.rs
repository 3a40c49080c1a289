//! Compile-time registry of calculator field metadata.
//!
//! Each schema version's fields are described in a TOML file under
//! `fields/`: label, form group, tooltip, typical-range hint and slider
//! bounds. The files are embedded at compile time and exposed via
//! [`fields`] and [`groups`].
//!
//! The metadata is descriptive only. Slider bounds are presentation hints
//! and the calculator never enforces them.

use birthmodel_calculator_models::{FieldGroup, FieldSpec, SchemaVersion, VersionedInputs};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FieldFile {
    schema_version: SchemaVersion,
    fields: Vec<FieldSpec>,
}

// ── Compile-time embedded TOML files ────────────────────────────────

const FIELD_TOMLS: &[(SchemaVersion, &str)] = &[
    (SchemaVersion::V1, include_str!("../fields/v1.toml")),
    (SchemaVersion::V2, include_str!("../fields/v2.toml")),
];

/// Returns the field metadata of `version`, in form order, with each
/// field's default value filled in.
///
/// # Panics
///
/// Panics if the embedded TOML for `version` is missing or malformed, or
/// names a field the schema does not have (a compile-time guarantee since
/// the files are embedded, covered by tests).
#[must_use]
pub fn fields(version: SchemaVersion) -> Vec<FieldSpec> {
    let (_, toml_str) = FIELD_TOMLS
        .iter()
        .find(|(v, _)| *v == version)
        .unwrap_or_else(|| panic!("No field registry embedded for schema {version}"));

    let file: FieldFile = toml::de::from_str(toml_str)
        .unwrap_or_else(|e| panic!("Failed to parse field registry for schema {version}: {e}"));
    assert_eq!(
        file.schema_version, version,
        "Field registry for schema {version} declares schema {}",
        file.schema_version
    );

    let defaults = VersionedInputs::defaults(version);
    file.fields
        .into_iter()
        .map(|mut spec| {
            spec.default = defaults.get_by_key(&spec.key).unwrap_or_else(|_| {
                panic!("Field registry for schema {version} names unknown field '{}'", spec.key)
            });
            spec
        })
        .collect()
}

/// Returns the fields of `version` grouped by form section, preserving the
/// order in which groups first appear.
#[must_use]
pub fn groups(version: SchemaVersion) -> Vec<FieldGroup> {
    let mut groups: Vec<FieldGroup> = Vec::new();

    for spec in fields(version) {
        match groups.iter_mut().find(|g| g.title == spec.group) {
            Some(group) => group.fields.push(spec),
            None => groups.push(FieldGroup {
                title: spec.group.clone(),
                fields: vec![spec],
            }),
        }
    }

    groups
}

/// Looks up a single field of `version` by wire key.
#[must_use]
pub fn field(version: SchemaVersion, key: &str) -> Option<FieldSpec> {
    fields(version).into_iter().find(|spec| spec.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use birthmodel_calculator_models::{FieldUnit, InputField, LegacyInputField};
    use std::collections::BTreeSet;

    #[test]
    fn current_registry_covers_every_field_in_order() {
        let keys: Vec<String> = fields(SchemaVersion::V2).into_iter().map(|s| s.key).collect();
        let expected: Vec<String> = InputField::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn legacy_registry_covers_every_field_in_order() {
        let keys: Vec<String> = fields(SchemaVersion::V1).into_iter().map(|s| s.key).collect();
        let expected: Vec<String> = LegacyInputField::ALL
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn keys_are_unique_and_specs_complete() {
        for version in SchemaVersion::ALL {
            let mut seen = BTreeSet::new();
            for spec in fields(*version) {
                assert!(seen.insert(spec.key.clone()), "Duplicate key: {}", spec.key);
                assert!(!spec.label.is_empty(), "{} has empty label", spec.key);
                assert!(!spec.tooltip.is_empty(), "{} has empty tooltip", spec.key);
                assert!(spec.min <= spec.max, "{} has min > max", spec.key);
                assert!(spec.step > 0.0, "{} has non-positive step", spec.key);
            }
        }
    }

    #[test]
    fn defaults_come_from_schema() {
        let deliveries = field(SchemaVersion::V2, "deliveriesPerYear").unwrap();
        assert!((deliveries.default - 1000.0).abs() < f64::EPSILON);

        let claim = field(SchemaVersion::V2, "claimAmount").unwrap();
        assert!((claim.default - 10_000.0).abs() < f64::EPSILON);
        assert_eq!(claim.unit, FieldUnit::Dollars);

        let legacy_claim = field(SchemaVersion::V1, "claimAmount").unwrap();
        assert!((legacy_claim.default - 5000.0).abs() < f64::EPSILON);

        assert!(field(SchemaVersion::V2, "nurseSalary").is_none());
    }

    #[test]
    fn groups_preserve_form_order() {
        let titles: Vec<String> = groups(SchemaVersion::V2).into_iter().map(|g| g.title).collect();
        assert_eq!(
            titles,
            vec![
                "Facility Overview".to_string(),
                "Scheduled Procedures".to_string(),
                "Staff Information".to_string(),
            ]
        );

        let total: usize = groups(SchemaVersion::V1).iter().map(|g| g.fields.len()).sum();
        assert_eq!(total, LegacyInputField::ALL.len());
    }
}
