use async_trait::async_trait;

use crate::models::{Order, OrderStatus, PendingOrder};

/// Repository trait for the local order mirror, transition log and
/// tracking-failure ledger
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_order(
        &self,
        order_id: &str,
    ) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>>;

    /// Create the local mirror row if absent; returns true when a row was
    /// actually created
    async fn create_order_if_absent(
        &self,
        order: &PendingOrder,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// Guarded status transition: applies only while the stored status still
    /// equals `expected_old`, appending exactly one transition-log entry in
    /// the same transaction. Returns false on a guard mismatch, which callers
    /// treat as a silent no-op.
    async fn transition_status(
        &self,
        order_id: &str,
        expected_old: OrderStatus,
        new_status: OrderStatus,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// Upsert into the failure ledger: create with count 1 on first failure,
    /// increment and refresh the timestamp on repeats
    async fn record_tracking_failure(
        &self,
        order_id: &str,
        waybill_no: &str,
        courier_code: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Upstream order source; reports only orders in non-terminal statuses
/// (PENDING, SHIPPED)
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_pending(
        &self,
    ) -> Result<Vec<PendingOrder>, Box<dyn std::error::Error + Send + Sync>>;
}
