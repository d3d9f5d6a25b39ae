use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use shipwatch_core::classify::LogisticsStatus;
use shipwatch_core::models::{OrderStatus, PendingOrder};
use shipwatch_core::repository::{OrderRepository, OrderSource};
use shipwatch_core::tracking::{TrackingClient, TrackingError};

use crate::limiter::run_limited;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to fetch pending orders: {0}")]
    SourceUnavailable(String),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("order {order_id} is already in final status: {status}")]
    AlreadyFinal { order_id: String, status: OrderStatus },

    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error("storage error: {0}")]
    Store(String),
}

/// Aggregate counters for one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStats {
    pub total_orders: u64,
    pub success_count: u64,
    pub fail_count: u64,
    pub delivered_count: u64,
    pub failed_delivery_count: u64,
}

/// Result of a forced single-order reconciliation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualSyncOutcome {
    pub order_id: String,
    pub current_status: OrderStatus,
    pub logistics_status: LogisticsStatus,
    pub status_time: DateTime<Utc>,
}

/// Per-order outcome of a batch run; failure is a value here so the limiter
/// only ever sees infallible tasks
enum OrderOutcome {
    Delivered,
    FailedDelivery,
    Unchanged,
    Failed,
}

/// Scans pending orders, queries each one's carrier status through the
/// bounded limiter and commits guarded state transitions
pub struct SyncEngine {
    source: Arc<dyn OrderSource>,
    repo: Arc<dyn OrderRepository>,
    tracker: TrackingClient,
    concurrency_limit: usize,
}

impl SyncEngine {
    pub fn new(
        source: Arc<dyn OrderSource>,
        repo: Arc<dyn OrderRepository>,
        tracker: TrackingClient,
        concurrency_limit: usize,
    ) -> Self {
        Self {
            source,
            repo,
            tracker,
            concurrency_limit,
        }
    }

    /// One scheduled reconciliation run. A source failure is fatal and
    /// returns no partial stats; per-order failures are isolated and only
    /// counted.
    pub async fn run(&self) -> Result<SyncStats, SyncError> {
        info!("order status sync run started");

        let pending = self
            .source
            .fetch_pending()
            .await
            .map_err(|err| SyncError::SourceUnavailable(err.to_string()))?;

        let mut stats = SyncStats {
            total_orders: pending.len() as u64,
            ..SyncStats::default()
        };

        if pending.is_empty() {
            info!("no pending orders to sync");
            return Ok(stats);
        }

        let tasks: Vec<_> = pending
            .into_iter()
            .map(|order| self.reconcile_order(order))
            .collect();

        for outcome in run_limited(tasks, self.concurrency_limit).await {
            match outcome {
                OrderOutcome::Delivered => {
                    stats.delivered_count += 1;
                    stats.success_count += 1;
                }
                OrderOutcome::FailedDelivery => {
                    stats.failed_delivery_count += 1;
                    stats.success_count += 1;
                }
                OrderOutcome::Unchanged => stats.success_count += 1,
                OrderOutcome::Failed => stats.fail_count += 1,
            }
        }

        info!(stats = ?stats, "order status sync run finished");
        Ok(stats)
    }

    /// Force reconciliation of a single, locally known order
    pub async fn sync_one(&self, order_id: &str) -> Result<ManualSyncOutcome, SyncError> {
        let order = self
            .repo
            .find_order(order_id)
            .await
            .map_err(|err| SyncError::Store(err.to_string()))?
            .ok_or_else(|| SyncError::OrderNotFound(order_id.to_string()))?;

        if order.status.is_terminal() {
            return Err(SyncError::AlreadyFinal {
                order_id: order.order_id,
                status: order.status,
            });
        }

        let result = self
            .tracker
            .query(&order.waybill_no, &order.courier_code)
            .await?;

        let mut current_status = order.status;
        if let Some(new_status) = target_status(result.status) {
            let applied = self
                .repo
                .transition_status(&order.order_id, order.status, new_status)
                .await
                .map_err(|err| SyncError::Store(err.to_string()))?;
            if applied {
                current_status = new_status;
            }
        }

        Ok(ManualSyncOutcome {
            order_id: order.order_id,
            current_status,
            logistics_status: result.status,
            status_time: result.status_time,
        })
    }

    /// Infallible per-order task: every error is converted into a ledger
    /// increment and a failed outcome so one bad order never aborts the run
    async fn reconcile_order(&self, order: PendingOrder) -> OrderOutcome {
        match self.process_order(&order).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(order_id = %order.order_id, error = %err, "order reconciliation failed");
                if let Err(ledger_err) = self
                    .repo
                    .record_tracking_failure(&order.order_id, &order.waybill_no, &order.courier_code)
                    .await
                {
                    error!(order_id = %order.order_id, error = %ledger_err, "failed to record tracking failure");
                }
                OrderOutcome::Failed
            }
        }
    }

    async fn process_order(
        &self,
        order: &PendingOrder,
    ) -> Result<OrderOutcome, Box<dyn std::error::Error + Send + Sync>> {
        if self.repo.create_order_if_absent(order).await? {
            info!(order_id = %order.order_id, "created local order mirror");
        }

        let result = self
            .tracker
            .query(&order.waybill_no, &order.courier_code)
            .await?;

        let Some(new_status) = target_status(result.status) else {
            return Ok(OrderOutcome::Unchanged);
        };

        // Transition from the status observed at fetch time; a guard mismatch
        // means another writer got there first and is not an error.
        let applied = self
            .repo
            .transition_status(&order.order_id, order.status, new_status)
            .await?;

        if !applied {
            debug!(order_id = %order.order_id, "status already advanced by another writer");
            return Ok(OrderOutcome::Unchanged);
        }

        Ok(match new_status {
            OrderStatus::Delivered => OrderOutcome::Delivered,
            _ => OrderOutcome::FailedDelivery,
        })
    }
}

/// Only terminal logistics statuses translate into an order transition
fn target_status(status: LogisticsStatus) -> Option<OrderStatus> {
    match status {
        LogisticsStatus::Delivered => Some(OrderStatus::Delivered),
        LogisticsStatus::DeliveryFailed => Some(OrderStatus::DeliveryFailed),
        LogisticsStatus::InTransit | LogisticsStatus::Unknown => None,
    }
}
