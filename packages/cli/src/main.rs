#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the `BirthModel` ROI calculator.
//!
//! Without a subcommand it lets users interactively pick between a
//! calculator session and the API server. Subcommands run the same
//! operations non-interactively for scripting.

mod output;
mod session;
mod view;

use birthmodel_calculator::{RawInputs, compute_versioned, parse_inputs};
use birthmodel_calculator_models::{RawNumber, SchemaVersion};
use birthmodel_server_models::CalculateResponse;
use clap::{Parser, Subcommand};
use dialoguer::Select;

#[derive(Parser)]
#[command(name = "birthmodel", about = "BirthModel savings projection toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a savings projection
    Calculate {
        /// Input schema (`v1` salary-based, `v2` current)
        #[arg(long, default_value = "v2")]
        schema: SchemaVersion,
        /// Field value as `key=value` (e.g., `denialRate=18`). Repeatable;
        /// unset fields keep their defaults
        #[arg(long = "set", value_name = "KEY=VALUE")]
        values: Vec<String>,
        /// Print the inputs and results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the fields of a schema with their defaults and ranges
    Fields {
        /// Input schema (`v1` salary-based, `v2` current)
        #[arg(long, default_value = "v2")]
        schema: SchemaVersion,
    },
    /// Start the API server
    Serve,
}

/// Top-level interactive selection.
enum Tool {
    Calculator,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[Self::Calculator, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Calculator => "Run the savings calculator",
            Self::Server => "Start server",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Calculate {
            schema,
            values,
            json,
        }) => calculate(schema, &values, json)?,
        Some(Commands::Fields { schema }) => output::print_fields(schema),
        Some(Commands::Serve) => serve(false).await?,
        None => interactive().await?,
    }

    Ok(())
}

async fn interactive() -> Result<(), Box<dyn std::error::Error>> {
    println!("BirthModel ROI Toolkit");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Calculator => session::run().await?,
        Tool::Server => serve(true).await?,
    }

    Ok(())
}

async fn serve(prompt: bool) -> Result<(), Box<dyn std::error::Error>> {
    // The server uses actix-web's runtime, so we need to run it
    // in a blocking task to avoid nesting tokio runtimes.
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(async move {
            if prompt {
                birthmodel_server::interactive::run().await
            } else {
                birthmodel_server::run_server().await
            }
        })
    })
    .await??;

    Ok(())
}

fn calculate(
    schema: SchemaVersion,
    values: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = parse_assignments(values)?;
    let inputs = parse_inputs(schema, &raw);
    let results = compute_versioned(&inputs);

    if json {
        let response = CalculateResponse { inputs, results };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        output::print_results(&results);
    }

    Ok(())
}

/// Parses `key=value` arguments into raw inputs. Values are kept as text
/// so they go through the same coercion as form input.
fn parse_assignments(values: &[String]) -> Result<RawInputs, String> {
    values
        .iter()
        .map(|assignment| {
            assignment
                .split_once('=')
                .map(|(key, value)| (key.trim().to_string(), RawNumber::from(value)))
                .ok_or_else(|| format!("Expected KEY=VALUE, got '{assignment}'"))
        })
        .collect()
}
