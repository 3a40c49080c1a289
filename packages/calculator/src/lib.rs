#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Savings projection formulas for the `BirthModel` ROI calculator.
//!
//! [`compute`] is the current formula. It is a total, pure function of its
//! [`CalculatorInputs`]: no input is rejected, clamped or floored, and the
//! same inputs always give bit-identical results. [`legacy::compute`] keeps
//! the original salary-based formula for `v1` inputs and
//! [`compute_versioned`] picks between the two.
//!
//! Field metadata (labels, tooltips, slider ranges) lives in [`registry`].
//! Turning raw form values into inputs lives in [`parse`].

pub mod legacy;
pub mod parse;
pub mod registry;

use birthmodel_calculator_models::{
    CalculationResults, CalculatorInputs, VersionedInputs, VersionedResults,
};

pub use parse::{RawInputs, parse_current, parse_inputs};

/// Share of first-pass denials the product is assumed to eliminate.
pub const DENIAL_REDUCTION: f64 = 0.94;

/// Share of procedure lag hours the product is assumed to recover.
pub const ROOM_UTILIZATION_EFFICACY: f64 = 0.45;

/// Nurse hours saved per shift, per nurse.
pub const NURSE_HOURS_SAVED: f64 = 3.0;

/// Administrative hours saved per shift, per staff member.
pub const ADMIN_HOURS_SAVED: f64 = 2.0;

/// Provider hours saved per shift, per provider.
pub const PROVIDER_HOURS_SAVED: f64 = 2.5;

/// Projects annual savings from facility metrics.
///
/// ```text
/// denialSavings            = deliveries * claimAmount * (denialRate / 100) * 0.94
/// roomUtilizationHours     = csections * csectionLag + inductions * inductionLag
/// roomUtilizationOptimized = roomUtilizationHours * 0.45
/// nurseTimeSavings         = 3   * nurseCount
/// adminTimeSavings         = 2   * adminCount
/// providerTimeSavings      = 2.5 * providerCount
/// totalSavings             = denial + roomHours + nurse + admin + provider
/// ```
///
/// `totalSavings` adds dollar and hour terms together and uses the raw
/// room hours rather than the optimized figure. That is the product's
/// published formula and is reproduced literally; a consistent unit model
/// has not been agreed.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub const fn compute(inputs: &CalculatorInputs) -> CalculationResults {
    let denial_savings = inputs.deliveries_per_year
        * inputs.claim_amount
        * (inputs.denial_rate / 100.0)
        * DENIAL_REDUCTION;
    let room_utilization_hours = inputs.csection_count * inputs.csection_lag_hours
        + inputs.induction_count * inputs.induction_lag_hours;
    let room_utilization_optimized = room_utilization_hours * ROOM_UTILIZATION_EFFICACY;
    let nurse_time_savings = NURSE_HOURS_SAVED * inputs.nurse_count;
    let admin_time_savings = ADMIN_HOURS_SAVED * inputs.admin_count;
    let provider_time_savings = PROVIDER_HOURS_SAVED * inputs.provider_count;
    let total_savings = denial_savings
        + room_utilization_hours
        + nurse_time_savings
        + admin_time_savings
        + provider_time_savings;

    CalculationResults {
        denial_savings,
        room_utilization_hours,
        room_utilization_optimized,
        nurse_time_savings,
        admin_time_savings,
        provider_time_savings,
        total_savings,
    }
}

/// Runs the formula matching the schema of `inputs`.
#[must_use]
pub const fn compute_versioned(inputs: &VersionedInputs) -> VersionedResults {
    match inputs {
        VersionedInputs::V1(legacy_inputs) => VersionedResults::V1(legacy::compute(legacy_inputs)),
        VersionedInputs::V2(current) => VersionedResults::V2(compute(current)),
    }
}
