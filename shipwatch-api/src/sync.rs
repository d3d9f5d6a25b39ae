use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use shipwatch_sync::{SyncError, SyncStats};

use crate::error::AppError;
use crate::state::AppState;

/// GET /v1/sync/orders
/// Scheduled reconciliation run, authenticated by the cron bearer secret.
/// Per-order failures are already folded into the stats; only a run that
/// could not start comes back as a failing status.
pub async fn run_scheduled_sync(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let expected = format!("Bearer {}", state.sync_secret);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == expected)
        .unwrap_or(false);

    if !authorized {
        error!("scheduled sync rejected: bad or missing bearer token");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Unauthorized" })),
        );
    }

    match state.engine.run().await {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Order status sync completed",
                "stats": stats,
            })),
        ),
        Err(err) => {
            error!(error = %err, "order status sync task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Order status sync task failed",
                    "stats": SyncStats::default(),
                })),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualSyncRequest {
    #[serde(default)]
    pub order_id: String,
}

/// POST /v1/sync/manual
/// Force reconciliation of a single order
pub async fn manual_sync(
    State(state): State<AppState>,
    Json(req): Json<ManualSyncRequest>,
) -> Result<Json<Value>, AppError> {
    let order_id = req.order_id.trim();
    if order_id.is_empty() {
        return Err(AppError::BadRequest("orderId is required".to_string()));
    }

    match state.engine.sync_one(order_id).await {
        Ok(outcome) => Ok(Json(json!({
            "success": true,
            "message": "Manual sync completed",
            "data": outcome,
        }))),
        // A terminal order is not an error, just nothing left to sync
        Err(err @ SyncError::AlreadyFinal { .. }) => {
            Ok(Json(json!({ "success": false, "message": err.to_string() })))
        }
        Err(SyncError::OrderNotFound(id)) => {
            Err(AppError::NotFound(format!("Order {} not found", id)))
        }
        Err(err) => Err(AppError::InternalServerError(err.to_string())),
    }
}
