//! HTTP handler functions for the `BirthModel` API.

use actix_web::{HttpResponse, web};
use birthmodel_calculator::{compute, compute_versioned, parse_current, parse_inputs, registry};
use birthmodel_lead::{LeadError, submit_lead};
use birthmodel_server_models::{
    ApiError, ApiFields, ApiHealth, CalculateRequest, CalculateResponse, FieldsQueryParams,
    LeadAccepted, LeadRequest,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/calculator/fields`
///
/// Returns the field metadata of a schema, grouped by form section.
pub async fn fields(params: web::Query<FieldsQueryParams>) -> HttpResponse {
    let schema_version = params.schema_version.unwrap_or_default();

    HttpResponse::Ok().json(ApiFields {
        schema_version,
        groups: registry::groups(schema_version),
    })
}

/// `POST /api/calculator/calculate`
///
/// Computes a savings projection from raw field values.
pub async fn calculate(body: web::Json<CalculateRequest>) -> HttpResponse {
    let inputs = parse_inputs(body.schema_version, &body.inputs);
    let results = compute_versioned(&inputs);

    log::debug!(
        "Calculated {} projection: total savings {}",
        results.version(),
        results.total_savings()
    );

    HttpResponse::Ok().json(CalculateResponse { inputs, results })
}

/// `POST /api/leads`
///
/// Computes the projection for the submitted inputs and hands the lead to
/// the configured sink. The computed results are returned even when the
/// sink fails.
pub async fn leads(state: web::Data<AppState>, body: web::Json<LeadRequest>) -> HttpResponse {
    let LeadRequest { contact, inputs } = body.into_inner();
    let results = compute(&parse_current(&inputs));

    match submit_lead(state.sink.as_ref(), contact, results).await {
        Ok(receipt) => HttpResponse::Ok().json(LeadAccepted { receipt, results }),
        Err(LeadError::MissingFields { fields }) => {
            log::debug!("Rejected lead with {} missing fields", fields.len());
            HttpResponse::BadRequest().json(ApiError {
                missing_fields: fields,
                ..ApiError::new("Please fill in all required contact fields")
            })
        }
        Err(e) => {
            log::error!("Failed to submit lead: {e}");
            HttpResponse::BadGateway().json(ApiError {
                results: Some(results),
                ..ApiError::new("Failed to submit lead")
            })
        }
    }
}
