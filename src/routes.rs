//! HTTP surface for the intake webhook.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::{Instrument, error, info_span, warn};
use uuid::Uuid;

use crate::error::Error;
use crate::pipeline::{BrandKitPipeline, WebhookResponse};

/// Hint returned to callers that probe the webhook with `GET`.
pub const USAGE_HINT: &str = "Use POST with JSON body.";

/// Shared state for webhook routes.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<BrandKitPipeline>,
}

/// Build the webhook router.
pub fn webhook_routes(pipeline: Arc<BrandKitPipeline>) -> Router {
    let state = AppState { pipeline };

    let webhook = get(usage).post(submit).fallback(method_not_allowed);

    Router::new()
        .route("/", webhook.clone())
        .route("/api/ghl-webhook", webhook)
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "brand-kit"
    }))
}

/// GET doubles as a health probe and never touches the generator.
async fn usage() -> impl IntoResponse {
    (StatusCode::OK, Json(WebhookResponse::usage(USAGE_HINT)))
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(WebhookResponse::failure("Method not allowed")),
    )
}

async fn submit(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Rejected webhook body");
            return (
                StatusCode::BAD_REQUEST,
                Json(WebhookResponse::failure(format!("Invalid JSON body: {e}"))),
            );
        }
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("webhook", %request_id);
    let pipeline = Arc::clone(&state.pipeline);

    // A panic inside the pipeline is the only unrecoverable failure.
    let task = tokio::spawn(async move { pipeline.process(&payload).await }.instrument(span));

    match task.await {
        Ok(outcome) => (StatusCode::OK, Json(WebhookResponse::success(outcome))),
        Err(e) => {
            let err = Error::Internal(e.to_string());
            error!(%request_id, error = %err, "Webhook processing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse::failure(err.to_string())),
            )
        }
    }
}

/// Empty bodies are treated as `{}`.
fn parse_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
}
