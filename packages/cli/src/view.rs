//! State of an interactive calculator session.
//!
//! The calculator core is a pure function of its inputs; everything the
//! session needs on top of that (which tooltip is open, whether the contact
//! form is showing, whether a submission is in flight) lives here.

use birthmodel_calculator::compute;
use birthmodel_calculator_models::{
    CalculationResults, CalculatorInputs, InputField, coerce_number,
};
use birthmodel_lead_models::{ContactField, ContactForm};

/// Interactive calculator state.
#[derive(Debug, Clone, Default)]
pub struct CalculatorView {
    inputs: CalculatorInputs,
    results: Option<CalculationResults>,
    active_tooltip: Option<InputField>,
    show_contact_form: bool,
    contact: ContactForm,
    submitting: bool,
    submitted: bool,
}

impl CalculatorView {
    /// A fresh session with the default inputs and no results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input values.
    #[must_use]
    pub const fn inputs(&self) -> &CalculatorInputs {
        &self.inputs
    }

    /// Results of the last calculation, if the inputs have not changed
    /// since.
    #[must_use]
    pub const fn results(&self) -> Option<&CalculationResults> {
        self.results.as_ref()
    }

    /// Field whose help text is shown, if any.
    #[must_use]
    pub const fn active_tooltip(&self) -> Option<InputField> {
        self.active_tooltip
    }

    /// Whether the contact form is shown.
    #[must_use]
    pub const fn is_contact_form_open(&self) -> bool {
        self.show_contact_form
    }

    /// Contact details entered so far.
    #[must_use]
    pub const fn contact(&self) -> &ContactForm {
        &self.contact
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the last submission was accepted.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Stores the typed value of `field` and returns the number it was read
    /// as. Invalidates any shown results.
    pub fn set_input(&mut self, field: InputField, raw: &str) -> f64 {
        let value = coerce_number(raw);
        self.inputs.set(field, value);
        self.results = None;
        self.submitted = false;
        value
    }

    /// Runs the calculator over the current inputs.
    pub fn calculate(&mut self) -> CalculationResults {
        let results = compute(&self.inputs);
        self.results = Some(results);
        results
    }

    /// Opens the tooltip of `field`, or closes it if it is already open.
    pub fn toggle_tooltip(&mut self, field: InputField) {
        self.active_tooltip = if self.active_tooltip == Some(field) {
            None
        } else {
            Some(field)
        };
    }

    /// Shows the contact form. Only possible once results are available.
    pub fn open_contact_form(&mut self) -> bool {
        if self.results.is_none() {
            return false;
        }
        self.show_contact_form = true;
        self.submitted = false;
        true
    }

    /// Hides the contact form, keeping what was typed so far.
    pub const fn close_contact_form(&mut self) {
        self.show_contact_form = false;
    }

    /// Stores the typed value of a contact field.
    pub fn set_contact(&mut self, field: ContactField, value: impl Into<String>) {
        self.contact.set(field, value);
    }

    /// Starts a submission and returns the contact details and results to
    /// send. Returns `None` while the form is closed, a submission is
    /// already in flight, results are missing or required fields are
    /// blank.
    pub fn begin_submit(&mut self) -> Option<(ContactForm, CalculationResults)> {
        if !self.show_contact_form || self.submitting || !self.contact.is_complete() {
            return None;
        }
        let results = self.results?;
        self.submitting = true;
        Some((self.contact.clone(), results))
    }

    /// Ends the in-flight submission. An accepted lead clears and closes
    /// the contact form; a rejected one leaves it open for another try.
    /// Results are kept either way.
    pub fn finish_submit(&mut self, accepted: bool) {
        self.submitting = false;
        if accepted {
            self.submitted = true;
            self.show_contact_form = false;
            self.contact = ContactForm::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_contact(view: &mut CalculatorView) {
        view.set_contact(ContactField::Name, "Jane Doe");
        view.set_contact(ContactField::Email, "jane@example.com");
        view.set_contact(ContactField::Phone, "555-0100");
        view.set_contact(ContactField::HospitalName, "Mercy Hospital");
        view.set_contact(ContactField::Location, "Denver, CO");
    }

    #[test]
    fn starts_with_defaults_and_no_results() {
        let view = CalculatorView::new();
        assert_eq!(*view.inputs(), CalculatorInputs::DEFAULT);
        assert!(view.results().is_none());
        assert!(!view.is_contact_form_open());
    }

    #[test]
    fn editing_clears_results() {
        let mut view = CalculatorView::new();
        view.calculate();
        assert!(view.results().is_some());

        let value = view.set_input(InputField::NurseCount, "8");
        assert!((value - 8.0).abs() < f64::EPSILON);
        assert!(view.results().is_none());

        let results = view.calculate();
        assert!((results.nurse_time_savings - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unparseable_input_reads_as_zero() {
        let mut view = CalculatorView::new();
        let value = view.set_input(InputField::DenialRate, "abc");
        assert!(value.abs() < f64::EPSILON);
        assert!(view.calculate().denial_savings.abs() < f64::EPSILON);
    }

    #[test]
    fn tooltip_toggles() {
        let mut view = CalculatorView::new();
        view.toggle_tooltip(InputField::ClaimAmount);
        assert_eq!(view.active_tooltip(), Some(InputField::ClaimAmount));
        view.toggle_tooltip(InputField::DenialRate);
        assert_eq!(view.active_tooltip(), Some(InputField::DenialRate));
        view.toggle_tooltip(InputField::DenialRate);
        assert_eq!(view.active_tooltip(), None);
    }

    #[test]
    fn contact_form_requires_results() {
        let mut view = CalculatorView::new();
        assert!(!view.open_contact_form());
        view.calculate();
        assert!(view.open_contact_form());
        assert!(view.is_contact_form_open());
    }

    #[test]
    fn submit_requires_complete_contact() {
        let mut view = CalculatorView::new();
        view.calculate();
        view.open_contact_form();
        assert!(view.begin_submit().is_none());

        fill_contact(&mut view);
        let (contact, results) = view.begin_submit().unwrap();
        assert_eq!(contact.hospital_name, "Mercy Hospital");
        assert!((results.total_savings - 1_411_975.0).abs() < 1e-6);
        assert!(view.is_submitting());
        assert!(view.begin_submit().is_none());
    }

    #[test]
    fn accepted_submission_resets_form() {
        let mut view = CalculatorView::new();
        view.calculate();
        view.open_contact_form();
        fill_contact(&mut view);
        view.begin_submit().unwrap();

        view.finish_submit(true);
        assert!(view.is_submitted());
        assert!(!view.is_submitting());
        assert!(!view.is_contact_form_open());
        assert_eq!(*view.contact(), ContactForm::default());
        assert!(view.results().is_some());
    }

    #[test]
    fn rejected_submission_keeps_form() {
        let mut view = CalculatorView::new();
        view.calculate();
        view.open_contact_form();
        fill_contact(&mut view);
        view.begin_submit().unwrap();

        view.finish_submit(false);
        assert!(!view.is_submitted());
        assert!(view.is_contact_form_open());
        assert_eq!(view.contact().name, "Jane Doe");
        assert!(view.results().is_some());
    }
}
