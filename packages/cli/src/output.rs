//! Terminal rendering of results and field metadata.

use birthmodel_calculator::registry;
use birthmodel_calculator_models::{
    CalculationResults, FieldUnit, LegacyCalculationResults, SchemaVersion, VersionedResults,
    format_amount,
};

/// Prints a results breakdown, one line per term, then the total.
pub fn print_results(results: &VersionedResults) {
    match results {
        VersionedResults::V2(results) => print_current(results),
        VersionedResults::V1(results) => print_legacy(results),
    }
}

/// Prints a current-schema results breakdown.
pub fn print_current(results: &CalculationResults) {
    println!();
    line("Denial savings", &dollars(results.denial_savings));
    line(
        "Room utilization",
        &format!("{} hrs", format_amount(results.room_utilization_hours)),
    );
    line(
        "  optimized",
        &format!("{} hrs", format_amount(results.room_utilization_optimized)),
    );
    line(
        "Nurse time saved",
        &format!("{} hrs/shift", format_amount(results.nurse_time_savings)),
    );
    line(
        "Admin time saved",
        &format!("{} hrs/shift", format_amount(results.admin_time_savings)),
    );
    line(
        "Provider time saved",
        &format!("{} hrs/shift", format_amount(results.provider_time_savings)),
    );
    println!("{}", "-".repeat(44));
    line("Total projected savings", &dollars(results.total_savings));
    println!();
}

fn print_legacy(results: &LegacyCalculationResults) {
    println!();
    line("Denial savings", &dollars(results.denial_savings));
    line(
        "Room utilization savings",
        &dollars(results.room_utilization_savings),
    );
    line("Nurse time savings", &dollars(results.nurse_time_savings));
    line("Admin time savings", &dollars(results.admin_time_savings));
    line(
        "Provider time savings",
        &dollars(results.provider_time_savings),
    );
    println!("{}", "-".repeat(44));
    line("Total annual savings", &dollars(results.total_savings));
    println!();
}

/// Prints every field of `version`, grouped by form section.
pub fn print_fields(version: SchemaVersion) {
    for group in registry::groups(version) {
        println!("{}", group.title);
        for spec in &group.fields {
            println!(
                "  {:<20} {} (default {}{})",
                spec.key,
                spec.label,
                format_amount(spec.default),
                unit_suffix(spec.unit)
            );
            println!("  {:<20} {}", "", spec.tooltip);
            println!(
                "  {:<20} {}; range {} to {} by {}",
                "",
                spec.suggestion,
                format_amount(spec.min),
                format_amount(spec.max),
                format_amount(spec.step)
            );
        }
        println!();
    }
}

/// Short unit suffix shown after a value.
#[must_use]
pub const fn unit_suffix(unit: FieldUnit) -> &'static str {
    match unit {
        FieldUnit::Count => "",
        FieldUnit::Percent => "%",
        FieldUnit::Dollars => " USD",
        FieldUnit::Hours => " hrs",
    }
}

fn dollars(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format_amount(-value))
    } else {
        format!("${}", format_amount(value))
    }
}

fn line(label: &str, value: &str) {
    println!("{label:<28}{value:>16}");
}
