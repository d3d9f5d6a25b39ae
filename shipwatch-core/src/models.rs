use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::classify::LogisticsStatus;

/// Order status in the delivery lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    DeliveryFailed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::DeliveryFailed => "DELIVERY_FAILED",
        }
    }

    /// Terminal statuses are never advanced again by the sync engine
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::DeliveryFailed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "DELIVERY_FAILED" => Ok(OrderStatus::DeliveryFailed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Locally mirrored order record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub waybill_no: String,
    pub courier_code: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order as reported by the upstream order source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrder {
    pub order_id: String,
    pub waybill_no: String,
    pub courier_code: String,
    pub status: OrderStatus,
}

/// Append-only status change log entry, written exactly once per transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusTransition {
    pub order_id: String,
    pub old_status: OrderStatus,
    pub new_status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Per-order tracking failure ledger entry; incremented on repeat failures,
/// never removed by this service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticsFailRecord {
    pub order_id: String,
    pub waybill_no: String,
    pub courier_code: String,
    pub fail_count: i32,
    pub last_fail_time: DateTime<Utc>,
}

/// Transient result of a single tracking query; consumed immediately,
/// never persisted
#[derive(Debug, Clone)]
pub struct TrackingResult {
    pub status: LogisticsStatus,
    pub status_time: DateTime<Utc>,
    pub raw: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::DeliveryFailed.is_terminal());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::DeliveryFailed,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("NOT_A_STATUS".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_pending_order_wire_format() {
        let json = r#"{"orderId":"ORD-1","waybillNo":"SF100","courierCode":"SF","status":"SHIPPED"}"#;
        let order: PendingOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, "ORD-1");
        assert_eq!(order.status, OrderStatus::Shipped);
    }
}
