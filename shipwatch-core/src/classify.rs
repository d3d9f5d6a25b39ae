use serde::{Deserialize, Serialize};

/// Logical status derived from a carrier's free-text last-status line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogisticsStatus {
    Delivered,
    InTransit,
    DeliveryFailed,
    Unknown,
}

const DELIVERED_TERMS: [&str; 2] = ["delivered", "签收"];
const FAILURE_TERMS: [&str; 4] = ["fail", "exception", "异常", "拒收"];
const TRANSIT_TERMS: [&str; 3] = ["transit", "运输", "派送"];

/// Classify a carrier status line by case-insensitive substring match.
///
/// First match wins, checked in priority order: delivered, failure, transit.
/// Failure is checked before transit on purpose, so a line carrying both an
/// exception term and a transit term resolves to `DeliveryFailed`.
pub fn classify_status(last_status: &str) -> LogisticsStatus {
    let status = last_status.to_lowercase();

    if DELIVERED_TERMS.iter().any(|term| status.contains(term)) {
        return LogisticsStatus::Delivered;
    }
    if FAILURE_TERMS.iter().any(|term| status.contains(term)) {
        return LogisticsStatus::DeliveryFailed;
    }
    if TRANSIT_TERMS.iter().any(|term| status.contains(term)) {
        return LogisticsStatus::InTransit;
    }

    LogisticsStatus::Unknown
}
