//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port and lead sink before starting
//! the server.

use birthmodel_lead::SinkKind;
use dialoguer::{Confirm, Input, Select};

const SINK_KINDS: &[SinkKind] = &[SinkKind::Log, SinkKind::KeyValue, SinkKind::Webhook];

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks the user for a bind address, port and lead sink, sets the
/// corresponding environment variables (`BIND_ADDR`, `PORT`, `LEAD_SINK`,
/// `LEAD_SINK_URL`), and delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("BirthModel ROI Server");
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default("127.0.0.1".to_string())
        .interact_text()
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port_str: String = Input::new()
        .with_prompt("Port")
        .default("8080".to_string())
        .interact_text()
        .unwrap_or_else(|_| "8080".to_string());

    let current = std::env::var("LEAD_SINK")
        .ok()
        .and_then(|raw| raw.trim().parse::<SinkKind>().ok())
        .unwrap_or_default();
    let labels: Vec<String> = SINK_KINDS.iter().map(ToString::to_string).collect();
    let sink_idx = Select::new()
        .with_prompt("Lead sink")
        .items(&labels)
        .default(SINK_KINDS.iter().position(|k| *k == current).unwrap_or(0))
        .interact()
        .unwrap_or(0);
    let sink = SINK_KINDS[sink_idx];

    let sink_url = if sink == SinkKind::Log {
        None
    } else {
        let url: String = Input::new()
            .with_prompt("Sink URL")
            .default(std::env::var("LEAD_SINK_URL").unwrap_or_default())
            .interact_text()
            .unwrap_or_default();
        Some(url)
    };

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", &port_str);
        std::env::set_var("LEAD_SINK", sink.as_ref());
        if let Some(url) = &sink_url {
            std::env::set_var("LEAD_SINK_URL", url);
        }
    }

    if !Confirm::new()
        .with_prompt(format!(
            "Start server on {bind_addr}:{port_str} with the {sink} sink?"
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
