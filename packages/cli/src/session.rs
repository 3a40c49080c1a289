//! Interactive calculator session.
//!
//! Walks the user through editing fields, calculating a projection and
//! optionally requesting a detailed analysis, which submits a lead through
//! the sink configured by the `LEAD_SINK*` environment variables.

use birthmodel_calculator::registry;
use birthmodel_calculator_models::{FieldSpec, InputField, SchemaVersion, format_amount};
use birthmodel_lead::{SinkConfig, SubmissionSink, submit_lead};
use birthmodel_lead_models::ContactField;
use dialoguer::{Confirm, Input, Select};

use crate::output;
use crate::view::CalculatorView;

enum Action {
    EditField,
    FieldHelp,
    Calculate,
    RequestAnalysis,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::EditField,
        Self::FieldHelp,
        Self::Calculate,
        Self::RequestAnalysis,
        Self::Quit,
    ];

    const fn label(&self) -> &'static str {
        match self {
            Self::EditField => "Edit a field",
            Self::FieldHelp => "Explain a field",
            Self::Calculate => "Calculate savings",
            Self::RequestAnalysis => "Request detailed analysis",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the calculator session until the user quits.
///
/// # Errors
///
/// * If a prompt fails (e.g., the terminal is not interactive)
/// * If the lead sink configuration is invalid
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let sink = SinkConfig::from_env()?.build()?;
    let specs = registry::fields(SchemaVersion::V2);
    let mut view = CalculatorView::new();

    println!("BirthModel Savings Projection Calculator");
    println!();

    loop {
        let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(default_action(&view))
            .interact()?;

        match Action::ALL[idx] {
            Action::EditField => {
                let (field, spec) = pick_field(&specs, &view, "Field to edit")?;
                let current = editable(view.inputs().get(field));
                let raw: String = Input::new()
                    .with_prompt(format!("{} ({})", spec.label, spec.suggestion))
                    .default(current)
                    .interact_text()?;
                let value = view.set_input(field, &raw);
                log::debug!("Set {field} to {value}");
            }
            Action::FieldHelp => {
                let (field, spec) = pick_field(&specs, &view, "Field to explain")?;
                view.toggle_tooltip(field);
                if view.active_tooltip() == Some(field) {
                    println!();
                    println!("{}: {}", spec.label, spec.tooltip);
                    println!("{}", spec.suggestion);
                    println!();
                }
            }
            Action::Calculate => {
                let results = view.calculate();
                output::print_current(&results);
            }
            Action::RequestAnalysis => {
                if view.open_contact_form() {
                    request_analysis(&mut view, sink.as_ref()).await?;
                } else {
                    println!("Calculate your savings first.");
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

const fn default_action(view: &CalculatorView) -> usize {
    if view.is_submitted() {
        4
    } else if view.results().is_some() {
        3
    } else {
        0
    }
}

/// Prompts for contact details and submits them until the lead is accepted
/// or the user gives up.
async fn request_analysis(
    view: &mut CalculatorView,
    sink: &dyn SubmissionSink,
) -> Result<(), dialoguer::Error> {
    while view.is_contact_form_open() {
        prompt_contact(view)?;

        if !Confirm::new()
            .with_prompt("Submit your request?")
            .default(true)
            .interact()?
        {
            view.close_contact_form();
            break;
        }

        let Some((contact, results)) = view.begin_submit() else {
            if view.is_submitting() {
                println!("Your request is already being sent.");
                break;
            }
            let missing: Vec<&str> = view
                .contact()
                .missing_required_fields()
                .iter()
                .map(|field| field.label())
                .collect();
            println!("Please fill in: {}", missing.join(", "));
            continue;
        };

        match submit_lead(sink, contact, results).await {
            Ok(receipt) => {
                view.finish_submit(true);
                println!();
                println!("Thank you! We'll be in touch with a detailed analysis.");
                println!("Reference: {}", receipt.id);
                println!();
            }
            Err(e) => {
                view.finish_submit(false);
                log::error!("Failed to submit lead: {e}");
                println!("Your request could not be sent. Your results are unchanged.");
                if !Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?
                {
                    view.close_contact_form();
                }
            }
        }
    }

    Ok(())
}

/// Renders `value` as text that reads back to the same number.
fn editable(value: f64) -> String {
    if value.is_infinite() {
        if value.is_sign_negative() {
            "-Infinity".to_string()
        } else {
            "Infinity".to_string()
        }
    } else {
        value.to_string()
    }
}

fn pick_field<'a>(
    specs: &'a [FieldSpec],
    view: &CalculatorView,
    prompt: &str,
) -> Result<(InputField, &'a FieldSpec), Box<dyn std::error::Error>> {
    let labels: Vec<String> = specs
        .iter()
        .map(|spec| {
            let value = spec
                .key
                .parse::<InputField>()
                .map_or(spec.default, |field| view.inputs().get(field));
            format!("{:<36} {}", spec.label, format_amount(value))
        })
        .collect();

    let idx = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    let spec = &specs[idx];
    let field = spec.key.parse::<InputField>()?;
    Ok((field, spec))
}

fn prompt_contact(view: &mut CalculatorView) -> Result<(), dialoguer::Error> {
    println!();
    println!("Request Detailed Analysis");
    println!();

    for field in ContactField::ALL {
        let label = if field.is_required() {
            format!("{} *", field.label())
        } else {
            field.label().to_string()
        };
        let value: String = Input::new()
            .with_prompt(label)
            .with_initial_text(view.contact().get(*field))
            .allow_empty(!field.is_required())
            .interact_text()?;
        view.set_contact(*field, value);
    }

    Ok(())
}
