use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use shipwatch_core::classify::LogisticsStatus;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsQueryRequest {
    #[serde(default)]
    pub waybill_no: String,
    #[serde(default)]
    pub courier_code: String,
}

/// POST /v1/logistics/query
/// Single tracking query for the batch-query UI
pub async fn query_logistics(
    State(state): State<AppState>,
    Json(req): Json<LogisticsQueryRequest>,
) -> Result<Json<Value>, AppError> {
    let result = state
        .tracker
        .query(req.waybill_no.trim(), req.courier_code.trim())
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "waybillNo": req.waybill_no.trim(),
            "courierCode": req.courier_code.trim(),
            "status": result.status,
            "statusText": status_text(result.status),
            "statusTime": result.status_time,
        }
    })))
}

/// Display label for the query UI
fn status_text(status: LogisticsStatus) -> &'static str {
    match status {
        LogisticsStatus::Delivered => "已送达",
        LogisticsStatus::InTransit => "运输中",
        LogisticsStatus::DeliveryFailed => "配送失败",
        LogisticsStatus::Unknown => "状态未知",
    }
}
