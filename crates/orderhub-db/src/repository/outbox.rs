//! # Notification Outbox Repository
//!
//! Manages the queue of order confirmations awaiting delivery.
//!
//! ## The Outbox Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Notification Outbox Flow                               │
//! │                                                                         │
//! │  place_order COMMITS the order transaction                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  enqueue(order_id, <confirmation JSON>)   ← AFTER commit               │
//! │       │                                                                 │
//! │       │  If this insert fails the order stands: the failure is         │
//! │       │  logged at WARN and the checkout still succeeds.               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            DELIVERY WORKER (separate process/task)              │   │
//! │  │                                                                 │   │
//! │  │  1. SELECT * FROM notification_outbox WHERE sent_at IS NULL    │   │
//! │  │                                                                 │   │
//! │  │  2. For each entry:                                            │   │
//! │  │     a. Deliver (email, webhook, ...)                           │   │
//! │  │     b. On success: mark_sent                                   │   │
//! │  │     c. On failure: mark_failed (attempts += 1, last_error)     │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  KEY GUARANTEE: a notification problem never unwinds a committed       │
//! │  order. Checkout's contract ends at the commit.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use orderhub_core::NotificationOutboxEntry;

/// Repository for notification outbox operations.
#[derive(Debug, Clone)]
pub struct NotificationOutboxRepository {
    pool: SqlitePool,
}

impl NotificationOutboxRepository {
    /// Creates a new NotificationOutboxRepository.
    pub fn new(pool: SqlitePool) -> Self {
        NotificationOutboxRepository { pool }
    }

    /// Queues an order confirmation for delivery.
    ///
    /// ## Arguments
    /// * `order_id` - The committed order's UUID
    /// * `payload` - JSON confirmation payload (totals, ETA, status)
    pub async fn enqueue(&self, order_id: &str, payload: &str) -> DbResult<NotificationOutboxEntry> {
        let entry = NotificationOutboxEntry {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            payload: payload.to_string(),
            attempts: 0,
            last_error: None,
            created_at: Utc::now(),
            attempted_at: None,
            sent_at: None,
        };

        debug!(order_id = %order_id, "Queuing order confirmation");

        sqlx::query(
            r#"
            INSERT INTO notification_outbox (
                id, order_id, payload,
                attempts, last_error, created_at, attempted_at, sent_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.order_id)
        .bind(&entry.payload)
        .bind(entry.attempts)
        .bind(&entry.last_error)
        .bind(entry.created_at)
        .bind(entry.attempted_at)
        .bind(entry.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Gets pending entries awaiting delivery, oldest first.
    pub async fn get_pending(&self, limit: u32) -> DbResult<Vec<NotificationOutboxEntry>> {
        let entries = sqlx::query_as::<_, NotificationOutboxEntry>(
            r#"
            SELECT id, order_id, payload, attempts, last_error,
                   created_at, attempted_at, sent_at
            FROM notification_outbox
            WHERE sent_at IS NULL
            ORDER BY created_at ASC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Marks an entry as successfully delivered.
    pub async fn mark_sent(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE notification_outbox SET
                sent_at = ?2,
                attempted_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records a delivery failure.
    pub async fn mark_failed(&self, id: &str, error: &str) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE notification_outbox SET
                attempts = attempts + 1,
                last_error = ?2,
                attempted_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(error)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts pending entries.
    pub async fn count_pending(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notification_outbox WHERE sent_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Deletes delivered entries older than `days_old` days.
    ///
    /// Returns the number of deleted entries.
    pub async fn cleanup_old_entries(&self, days_old: u32) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM notification_outbox
            WHERE sent_at IS NOT NULL
            AND sent_at < datetime('now', '-' || ?1 || ' days')
            "#,
        )
        .bind(days_old)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
