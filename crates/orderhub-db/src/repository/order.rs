//! # Order Repository
//!
//! Read access to orders and their child records, plus the status state
//! machine update.
//!
//! Order *creation* lives in the checkout coordinator: an order and its
//! items, fees, redemptions, and payment must appear atomically, so those
//! inserts run inside the coordinator's transaction rather than here.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use orderhub_core::{Order, OrderFee, OrderItem, OrderStatus, OrderVoucherRedemption, Payment};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, status, total_cents, max_distance_km,
                   created_at, updated_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all line items of an order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, variant_id, store_id, quantity,
                   unit_price_cents, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets all fees applied to an order.
    pub async fn get_fees(&self, order_id: &str) -> DbResult<Vec<OrderFee>> {
        let fees = sqlx::query_as::<_, OrderFee>(
            r#"
            SELECT id, order_id, fee_code, amount_cents
            FROM order_fees
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(fees)
    }

    /// Gets all voucher redemptions recorded against an order.
    pub async fn get_redemptions(&self, order_id: &str) -> DbResult<Vec<OrderVoucherRedemption>> {
        let redemptions = sqlx::query_as::<_, OrderVoucherRedemption>(
            r#"
            SELECT id, order_id, voucher_id, discount_cents
            FROM order_vouchers
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(redemptions)
    }

    /// Gets all payments for an order.
    pub async fn get_payments(&self, order_id: &str) -> DbResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, order_id, is_online, method, status, transaction_id,
                   amount_cents, paid_at, created_at
            FROM payments
            WHERE order_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Moves an order from `from` to `to` if it is currently in `from`.
    ///
    /// The conditional WHERE makes the transition atomic: if a concurrent
    /// update already moved the order, rows_affected is 0 and the caller
    /// gets a NotFound. Transition *legality* is the caller's concern
    /// (see [`OrderStatus::can_transition_to`]).
    pub async fn transition_status(
        &self,
        order_id: &str,
        from: OrderStatus,
        to: OrderStatus,
    ) -> DbResult<()> {
        let now = Utc::now();

        debug!(order_id = %order_id, from = from.as_str(), to = to.as_str(), "Transitioning order status");

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                status = ?3,
                updated_at = ?4
            WHERE id = ?1 AND status = ?2
            "#,
        )
        .bind(order_id)
        .bind(from)
        .bind(to)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                format!("Order ({})", from.as_str()),
                order_id,
            ));
        }

        Ok(())
    }
}
