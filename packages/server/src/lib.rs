#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the `BirthModel` ROI calculator.
//!
//! Serves the calculator and lead capture as a REST API under `/api`, and
//! the static calculator page from `SITE_DIR` when that directory exists.
//! Leads are handed to the [`SubmissionSink`] selected by the `LEAD_SINK*`
//! environment variables (see [`birthmodel_lead::config`]).

mod handlers;
pub mod interactive;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use birthmodel_lead::{SinkConfig, SubmissionSink};

/// Default directory the static calculator page is served from.
pub const DEFAULT_SITE_DIR: &str = "app/dist";

/// Shared application state.
pub struct AppState {
    /// Destination for submitted leads.
    pub sink: Arc<dyn SubmissionSink>,
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/calculator/fields", web::get().to(handlers::fields))
            .route("/calculator/calculate", web::post().to(handlers::calculate))
            .route("/leads", web::post().to(handlers::leads)),
    );
}

/// Starts the `BirthModel` API server.
///
/// Builds the lead sink from the environment and starts the Actix-Web HTTP
/// server on `BIND_ADDR:PORT` (default `127.0.0.1:8080`). This is a
/// regular async function; the caller provides the async runtime (e.g. via
/// `#[actix_web::main]`) and initializes logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the sink configuration is invalid,
/// or if the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    let sink_config = SinkConfig::from_env().map_err(std::io::Error::other)?;
    let sink = sink_config.build().map_err(std::io::Error::other)?;
    log::info!("Submitting leads via the {} sink", sink.name());

    let state = web::Data::new(AppState { sink });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let site_dir = std::env::var("SITE_DIR").unwrap_or_else(|_| DEFAULT_SITE_DIR.to_string());
    let serve_site = Path::new(&site_dir).is_dir();
    if serve_site {
        log::info!("Serving static site from {site_dir}");
    } else {
        log::warn!("Static site directory {site_dir} not found; serving the API only");
    }

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api);

        if serve_site {
            app.service(Files::new("/", &site_dir).index_file("index.html"))
        } else {
            app
        }
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use birthmodel_lead::sinks::MemorySink;
    use serde_json::{Value, json};

    fn state(sink: Arc<MemorySink>) -> web::Data<AppState> {
        web::Data::new(AppState { sink })
    }

    fn assert_close(actual: &Value, expected: f64) {
        let actual = actual.as_f64().unwrap();
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn contact() -> Value {
        json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "555-0100",
            "hospitalName": "Mercy Hospital",
            "location": "Denver, CO",
        })
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(MemorySink::new())))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn fields_default_to_current_schema() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(MemorySink::new())))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/calculator/fields")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["schemaVersion"], "v2");
        assert_eq!(body["groups"][0]["title"], "Facility Overview");
        assert_eq!(body["groups"][0]["fields"][0]["key"], "deliveriesPerYear");
        assert_close(&body["groups"][0]["fields"][0]["default"], 1000.0);

        let req = test::TestRequest::get()
            .uri("/api/calculator/fields?schemaVersion=v1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["schemaVersion"], "v1");
    }

    #[actix_web::test]
    async fn calculate_applies_defaults_and_coercion() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(MemorySink::new())))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/calculator/calculate")
            .set_json(json!({}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["results"]["schemaVersion"], "v2");
        assert_close(&body["results"]["denialSavings"], 1_410_000.0);
        assert_close(&body["results"]["totalSavings"], 1_411_975.0);

        let req = test::TestRequest::post()
            .uri("/api/calculator/calculate")
            .set_json(json!({ "inputs": { "denialRate": "", "nurseCount": "7" } }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_close(&body["inputs"]["denialRate"], 0.0);
        assert_close(&body["results"]["denialSavings"], 0.0);
        assert_close(&body["results"]["nurseTimeSavings"], 21.0);
    }

    #[actix_web::test]
    async fn calculate_reads_non_numeric_json_as_zero() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(MemorySink::new())))
                .configure(configure_api),
        )
        .await;

        for value in [json!(true), json!([1]), json!({ "a": 1 })] {
            let req = test::TestRequest::post()
                .uri("/api/calculator/calculate")
                .set_json(json!({ "inputs": { "nurseCount": value } }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_close(&body["inputs"]["nurseCount"], 0.0);
            assert_close(&body["results"]["nurseTimeSavings"], 0.0);
            assert_close(&body["results"]["adminTimeSavings"], 10.0);
        }
    }

    #[actix_web::test]
    async fn calculate_legacy_schema() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(MemorySink::new())))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/calculator/calculate")
            .set_json(json!({ "schemaVersion": "v1" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["results"]["schemaVersion"], "v1");
        assert_close(&body["results"]["totalSavings"], 18_683_000.0);
    }

    #[actix_web::test]
    async fn lead_is_recorded_in_sink() {
        let sink = Arc::new(MemorySink::new());
        let app = test::init_service(
            App::new()
                .app_data(state(sink.clone()))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/leads")
            .set_json(json!({ "contact": contact(), "inputs": { "nurseCount": 10 } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;

        let stored = sink.submissions();
        assert_eq!(stored.len(), 1);
        assert_eq!(body["id"], stored[0].id.as_str());
        assert_close(&body["results"]["nurseTimeSavings"], 30.0);
        assert!((stored[0].results.nurse_time_savings - 30.0).abs() < f64::EPSILON);
        assert_eq!(stored[0].contact.hospital_name, "Mercy Hospital");
    }

    #[actix_web::test]
    async fn lead_with_missing_fields_is_rejected() {
        let sink = Arc::new(MemorySink::new());
        let app = test::init_service(
            App::new()
                .app_data(state(sink.clone()))
                .configure(configure_api),
        )
        .await;

        let incomplete = json!({
            "name": "Jane Doe",
            "email": "  ",
            "phone": "555-0100",
            "hospitalName": "Mercy Hospital",
        });

        let req = test::TestRequest::post()
            .uri("/api/leads")
            .set_json(json!({ "contact": incomplete }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["missingFields"], json!(["email", "location"]));
        assert!(sink.submissions().is_empty());
    }

    #[actix_web::test]
    async fn sink_failure_keeps_results() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(MemorySink::rejecting())))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/leads")
            .set_json(json!({ "contact": contact() }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().is_some());
        assert_close(&body["results"]["totalSavings"], 1_411_975.0);
    }
}
