//! The original (`v1`) salary-based savings formula.

use birthmodel_calculator_models::{LegacyCalculationResults, LegacyInputs};

use crate::DENIAL_REDUCTION;

/// Share of billed revenue recovered through room utilization.
pub const ROOM_UTILIZATION_GAIN: f64 = 0.15;

/// Working days per year used to annualize daily staff savings.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Nurse hours saved per 12-hour shift.
pub const NURSE_HOURS_SAVED: f64 = 3.0;

/// Administrative hours saved per day.
pub const ADMIN_HOURS_SAVED: f64 = 4.0;

/// Provider hours saved per day.
pub const PROVIDER_HOURS_SAVED: f64 = 5.0;

/// Projects annual dollar savings with the `v1` formula.
///
/// `lag_times` and `nurse_count` are not part of this formula. Nurse savings
/// scale with the salary alone.
#[must_use]
pub const fn compute(inputs: &LegacyInputs) -> LegacyCalculationResults {
    let denial_savings = inputs.deliveries_per_year
        * inputs.claim_amount
        * (inputs.denial_rate / 100.0)
        * DENIAL_REDUCTION;
    let room_utilization_savings =
        inputs.deliveries_per_year * inputs.claim_amount * ROOM_UTILIZATION_GAIN;
    let nurse_time_savings = NURSE_HOURS_SAVED * inputs.nurse_salary * DAYS_PER_YEAR;
    let admin_time_savings =
        ADMIN_HOURS_SAVED * inputs.admin_salary * inputs.admin_count * DAYS_PER_YEAR;
    let provider_time_savings =
        PROVIDER_HOURS_SAVED * inputs.provider_salary * inputs.provider_count * DAYS_PER_YEAR;
    let total_savings = denial_savings
        + room_utilization_savings
        + nurse_time_savings
        + admin_time_savings
        + provider_time_savings;

    LegacyCalculationResults {
        denial_savings,
        room_utilization_savings,
        nurse_time_savings,
        admin_time_savings,
        provider_time_savings,
        total_savings,
    }
}
