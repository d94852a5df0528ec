// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::Parser;
use serde::{Deserialize, Serialize};
use shipdesk_api::{
    ShipmentTransaction, SimulatedGateway, StandardValidator, SubmissionError, SubmissionResponse,
    submit_shipment,
};
use shipdesk_domain::{DomainError, LiveSimulation, fnv1a_64};
use shipdesk_scheduling::{AvailabilityRequest, AvailabilityResponse, generate_availability};
use tracing::{error, info};

/// Shipdesk Server - HTTP server for the Shipdesk scheduling portal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone of the origin facility (wall-clock for cutoff and
    /// lead-time decisions)
    #[arg(short, long, default_value = "America/New_York")]
    timezone: Tz,
}

/// Application state shared across handlers.
#[derive(Debug, Clone, Copy)]
struct AppState {
    /// Origin facility timezone.
    timezone: Tz,
}

/// Current wall-clock datetime at the origin facility.
fn local_now(timezone: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&timezone).naive_local()
}

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityQuery {
    /// Origin postal code.
    zip: String,
    /// Number of weeks to offer.
    #[serde(default = "default_weeks")]
    weeks: u32,
    /// Whether to include weekend days.
    #[serde(default)]
    include_weekends: bool,
    /// Whether to include federal holidays.
    #[serde(default)]
    include_holidays: bool,
}

fn default_weeks() -> u32 {
    4
}

/// Success envelope wrapping every response payload.
#[derive(Debug, Serialize)]
struct Envelope<T> {
    /// Success indicator.
    success: bool,
    /// The response payload.
    data: T,
}

/// Error payload carried by every failure response.
#[derive(Debug, Serialize)]
struct ErrorDetail {
    /// Machine-readable error code.
    code: String,
    /// Human-readable error message.
    message: String,
    /// Structured context (validation issues, alternative slots).
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

/// Error envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Success indicator, always false.
    success: bool,
    /// The error payload.
    error: ErrorDetail,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// Machine-readable error code.
    code: &'static str,
    /// The error message.
    message: String,
    /// Structured error context.
    details: Option<serde_json::Value>,
}

impl HttpError {
    fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_ERROR",
            message,
            details: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorBody> = Json(ErrorBody {
            success: false,
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
                details: self.details,
            },
        });
        (self.status, body).into_response()
    }
}

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::InvalidPostalCode(_) | DomainError::InvalidWeekCount { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                code: "INVALID_REQUEST",
                message: err.to_string(),
                details: None,
            },
            _ => {
                error!(error = %err, "Domain error");
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<SubmissionError> for HttpError {
    fn from(err: SubmissionError) -> Self {
        let code: &'static str = err.code();
        let message: String = err.to_string();
        match err {
            SubmissionError::Validation { errors } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                code,
                message,
                details: serde_json::to_value(errors).ok(),
            },
            SubmissionError::PaymentDeclined { .. } => Self {
                status: StatusCode::PAYMENT_REQUIRED,
                code,
                message,
                details: None,
            },
            SubmissionError::PickupUnavailable { alternatives, .. } => Self {
                status: StatusCode::CONFLICT,
                code,
                message,
                details: serde_json::to_value(alternatives).ok(),
            },
            SubmissionError::Internal { .. } => {
                error!(%message, "Internal submission failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    message,
                    details: None,
                }
            }
        }
    }
}

/// Stable cache validator for an availability payload.
///
/// The metadata timestamps are excluded from the hash so the tag holds
/// across regenerations within the validity window; the remaining
/// payload is a pure function of the query and the computed date range.
fn availability_etag(availability: &AvailabilityResponse) -> Result<String, HttpError> {
    let deterministic: String = serde_json::to_string(&(
        &availability.postal_code,
        &availability.service_area,
        &availability.available_dates,
        &availability.restrictions,
        &availability.weekend_options,
        &availability.holiday_options,
    ))
    .map_err(|err| HttpError::internal(format!("Failed to serialize availability: {err}")))?;
    Ok(format!("\"{:016x}\"", fnv1a_64(&deterministic)))
}

/// Handler for GET `/api/availability`.
///
/// Generates the pickup availability calendar for a postal code, with
/// `ETag`/`If-None-Match` handling and a cache lifetime matching the
/// payload's one-hour validity window.
async fn handle_availability(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Response, HttpError> {
    info!(
        zip = %query.zip,
        weeks = query.weeks,
        include_weekends = query.include_weekends,
        include_holidays = query.include_holidays,
        "Handling availability request"
    );

    let request: AvailabilityRequest = AvailabilityRequest {
        zip: query.zip,
        weeks: query.weeks,
        include_weekends: query.include_weekends,
        include_holidays: query.include_holidays,
    };
    let availability: AvailabilityResponse =
        generate_availability(&request, local_now(state.timezone))?;

    let etag: String = availability_etag(&availability)?;
    if headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        == Some(etag.as_str())
    {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    let body: String = serde_json::to_string(&Envelope {
        success: true,
        data: availability,
    })
    .map_err(|err| HttpError::internal(format!("Failed to serialize availability: {err}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, String::from("public, max-age=3600")),
            (header::CONTENT_TYPE, String::from("application/json")),
        ],
        body,
    )
        .into_response())
}

/// Handler for POST `/api/shipments`.
///
/// Runs the full submission pipeline: validation, payment
/// authorization, pickup confirmation, estimation, confirmation.
async fn handle_submit_shipment(
    AxumState(state): AxumState<AppState>,
    Json(transaction): Json<ShipmentTransaction>,
) -> Result<Json<Envelope<SubmissionResponse>>, HttpError> {
    info!(
        customer_reference = %transaction.customer_reference,
        pickup_date = %transaction.pickup.pickup_date,
        "Handling shipment submission"
    );

    let gateway: SimulatedGateway<LiveSimulation> = SimulatedGateway::new(LiveSimulation);
    let response: SubmissionResponse = submit_shipment(
        &transaction,
        &StandardValidator,
        &gateway,
        local_now(state.timezone),
        &LiveSimulation,
    )?;

    Ok(Json(Envelope {
        success: true,
        data: response,
    }))
}

/// Handler for GET `/healthz`.
async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/availability", get(handle_availability))
        .route("/api/shipments", post(handle_submit_shipment))
        .route("/healthz", get(handle_health))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(timezone = %args.timezone, "Initializing Shipdesk Server");

    let app_state: AppState = AppState {
        timezone: args.timezone,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
