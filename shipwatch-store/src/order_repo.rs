use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use shipwatch_core::models::{Order, OrderStatus, PendingOrder};
use shipwatch_core::repository::OrderRepository;

pub struct StoreOrderRepository {
    pool: PgPool,
}

impl StoreOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: String,
    waybill_no: String,
    courier_code: String,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
impl OrderRepository for StoreOrderRepository {
    async fn find_order(
        &self,
        order_id: &str,
    ) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT order_id, waybill_no, courier_code, status, created_at, updated_at \
             FROM orders WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Order {
                status: row.status.parse::<OrderStatus>()?,
                order_id: row.order_id,
                waybill_no: row.waybill_no,
                courier_code: row.courier_code,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })),
            None => Ok(None),
        }
    }

    async fn create_order_if_absent(
        &self,
        order: &PendingOrder,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            "INSERT INTO orders (order_id, waybill_no, courier_code, status) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (order_id) DO NOTHING",
        )
        .bind(&order.order_id)
        .bind(&order.waybill_no)
        .bind(&order.courier_code)
        .bind(order.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn transition_status(
        &self,
        order_id: &str,
        expected_old: OrderStatus,
        new_status: OrderStatus,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut tx = self.pool.begin().await?;

        // The status predicate is the optimistic concurrency guard: zero rows
        // affected means another writer already advanced the order.
        let updated = sqlx::query(
            "UPDATE orders SET status = $1, updated_at = NOW() \
             WHERE order_id = $2 AND status = $3",
        )
        .bind(new_status.as_str())
        .bind(order_id)
        .bind(expected_old.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO order_status_logs (order_id, old_status, new_status) \
             VALUES ($1, $2, $3)",
        )
        .bind(order_id)
        .bind(expected_old.as_str())
        .bind(new_status.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(order_id, old_status = %expected_old, new_status = %new_status, "order status updated");
        Ok(true)
    }

    async fn record_tracking_failure(
        &self,
        order_id: &str,
        waybill_no: &str,
        courier_code: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            "INSERT INTO logistics_fail_records (order_id, waybill_no, courier_code) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (order_id) DO UPDATE SET \
                 fail_count = logistics_fail_records.fail_count + 1, \
                 last_fail_time = NOW()",
        )
        .bind(order_id)
        .bind(waybill_no)
        .bind(courier_code)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
