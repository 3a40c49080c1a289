//! The original (`v1`) calculator shape.
//!
//! Staff savings were priced in dollars from per-shift salaries and a single
//! lag-time field covered every procedure. Kept so that results produced by
//! the first calculator can still be reproduced.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A field of the `v1` input schema.
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
pub enum LegacyInputField {
    /// Annual delivery volume.
    DeliveriesPerYear,
    /// Percent of claims denied on first submission.
    DenialRate,
    /// Average amount billed per delivery.
    ClaimAmount,
    /// Average delay between room assignment and procedure start.
    LagTimes,
    /// Average compensation per 12-hour nurse shift.
    NurseSalary,
    /// Nurses involved in labor and delivery.
    NurseCount,
    /// Administrative staff involved in labor and delivery.
    AdminCount,
    /// Average daily salary for administrative staff.
    AdminSalary,
    /// Providers (physicians, midwives) in labor and delivery.
    ProviderCount,
    /// Average daily salary for providers.
    ProviderSalary,
}

impl LegacyInputField {
    /// Every field, in form order.
    pub const ALL: &[Self] = &[
        Self::DeliveriesPerYear,
        Self::DenialRate,
        Self::ClaimAmount,
        Self::LagTimes,
        Self::NurseSalary,
        Self::NurseCount,
        Self::AdminCount,
        Self::AdminSalary,
        Self::ProviderCount,
        Self::ProviderSalary,
    ];
}

/// Facility metrics entered on the `v1` calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyInputs {
    /// Annual delivery volume.
    pub deliveries_per_year: f64,
    /// Percent of claims denied on first submission (0-100).
    pub denial_rate: f64,
    /// Average amount billed per delivery.
    pub claim_amount: f64,
    /// Average delay in hours between room assignment and procedure start.
    /// Collected but not used by the `v1` formula.
    pub lag_times: f64,
    /// Average compensation per 12-hour nurse shift.
    pub nurse_salary: f64,
    /// Nurses involved in labor and delivery. Collected but not used by the
    /// `v1` formula.
    pub nurse_count: f64,
    /// Administrative staff involved in labor and delivery.
    pub admin_count: f64,
    /// Average daily salary for administrative staff.
    pub admin_salary: f64,
    /// Providers in labor and delivery.
    pub provider_count: f64,
    /// Average daily salary for providers.
    pub provider_salary: f64,
}

impl LegacyInputs {
    /// The values the `v1` calculator started with.
    pub const DEFAULT: Self = Self {
        deliveries_per_year: 1000.0,
        denial_rate: 15.0,
        claim_amount: 5000.0,
        lag_times: 4.0,
        nurse_salary: 400.0,
        nurse_count: 5.0,
        admin_count: 5.0,
        admin_salary: 300.0,
        provider_count: 10.0,
        provider_salary: 800.0,
    };

    /// Returns the current value of `field`.
    #[must_use]
    pub const fn get(&self, field: LegacyInputField) -> f64 {
        match field {
            LegacyInputField::DeliveriesPerYear => self.deliveries_per_year,
            LegacyInputField::DenialRate => self.denial_rate,
            LegacyInputField::ClaimAmount => self.claim_amount,
            LegacyInputField::LagTimes => self.lag_times,
            LegacyInputField::NurseSalary => self.nurse_salary,
            LegacyInputField::NurseCount => self.nurse_count,
            LegacyInputField::AdminCount => self.admin_count,
            LegacyInputField::AdminSalary => self.admin_salary,
            LegacyInputField::ProviderCount => self.provider_count,
            LegacyInputField::ProviderSalary => self.provider_salary,
        }
    }

    /// Overwrites a single field, leaving the others untouched.
    pub const fn set(&mut self, field: LegacyInputField, value: f64) {
        let slot = match field {
            LegacyInputField::DeliveriesPerYear => &mut self.deliveries_per_year,
            LegacyInputField::DenialRate => &mut self.denial_rate,
            LegacyInputField::ClaimAmount => &mut self.claim_amount,
            LegacyInputField::LagTimes => &mut self.lag_times,
            LegacyInputField::NurseSalary => &mut self.nurse_salary,
            LegacyInputField::NurseCount => &mut self.nurse_count,
            LegacyInputField::AdminCount => &mut self.admin_count,
            LegacyInputField::AdminSalary => &mut self.admin_salary,
            LegacyInputField::ProviderCount => &mut self.provider_count,
            LegacyInputField::ProviderSalary => &mut self.provider_salary,
        };
        *slot = value;
    }
}

impl Default for LegacyInputs {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Dollar savings breakdown produced by the `v1` formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCalculationResults {
    /// Dollars recovered from fewer first-pass denials.
    pub denial_savings: f64,
    /// Dollars recovered from better room utilization.
    pub room_utilization_savings: f64,
    /// Annual dollars of nurse time saved.
    pub nurse_time_savings: f64,
    /// Annual dollars of administrative staff time saved.
    pub admin_time_savings: f64,
    /// Annual dollars of provider time saved.
    pub provider_time_savings: f64,
    /// Sum of all five terms.
    pub total_savings: f64,
}
