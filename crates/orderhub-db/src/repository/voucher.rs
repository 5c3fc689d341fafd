//! # Voucher Repository
//!
//! Database operations for vouchers and per-customer grants.
//!
//! ## Redemption Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Voucher Redemption                                  │
//! │                                                                         │
//! │  vouchers          The catalog: code, discount, validity window        │
//! │  user_vouchers     A grant: customer X may redeem voucher Y once       │
//! │  order_vouchers    The record: voucher Y reduced order Z by N          │
//! │                                                                         │
//! │  Redeeming = flipping the grant's `used` flag with a conditional       │
//! │  UPDATE. rows_affected == 0 means another checkout won the race.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use orderhub_core::{Voucher, VoucherGrant, VoucherKind};

/// Repository for voucher database operations.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    pool: SqlitePool,
}

impl VoucherRepository {
    /// Creates a new VoucherRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VoucherRepository { pool }
    }

    /// Creates a voucher.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        code: &str,
        description: Option<&str>,
        discount_amount_cents: Option<i64>,
        discount_percent_bps: Option<i64>,
        valid_from: Option<NaiveDate>,
        valid_to: Option<NaiveDate>,
        kind: VoucherKind,
    ) -> DbResult<Voucher> {
        let voucher = Voucher {
            id: Uuid::new_v4().to_string(),
            code: code.to_string(),
            description: description.map(str::to_string),
            discount_amount_cents,
            discount_percent_bps,
            valid_from,
            valid_to,
            kind,
        };

        debug!(id = %voucher.id, code = %voucher.code, "Creating voucher");

        sqlx::query(
            r#"
            INSERT INTO vouchers (
                id, code, description,
                discount_amount_cents, discount_percent_bps,
                valid_from, valid_to, kind
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&voucher.id)
        .bind(&voucher.code)
        .bind(&voucher.description)
        .bind(voucher.discount_amount_cents)
        .bind(voucher.discount_percent_bps)
        .bind(voucher.valid_from)
        .bind(voucher.valid_to)
        .bind(voucher.kind)
        .execute(&self.pool)
        .await?;

        Ok(voucher)
    }

    /// Finds a voucher by its public code.
    pub async fn find_by_code(&self, code: &str) -> DbResult<Option<Voucher>> {
        let voucher = sqlx::query_as::<_, Voucher>(
            r#"
            SELECT
                id, code, description,
                discount_amount_cents, discount_percent_bps,
                valid_from, valid_to, kind
            FROM vouchers
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(voucher)
    }

    /// Grants a voucher to a customer.
    pub async fn grant(&self, customer_id: &str, voucher_id: &str) -> DbResult<VoucherGrant> {
        let grant = VoucherGrant {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            voucher_id: voucher_id.to_string(),
            used: false,
            assigned_at: Utc::now(),
        };

        debug!(id = %grant.id, customer_id = %customer_id, voucher_id = %voucher_id, "Granting voucher");

        sqlx::query(
            r#"
            INSERT INTO user_vouchers (id, customer_id, voucher_id, used, assigned_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&grant.id)
        .bind(&grant.customer_id)
        .bind(&grant.voucher_id)
        .bind(grant.used)
        .bind(grant.assigned_at)
        .execute(&self.pool)
        .await?;

        Ok(grant)
    }

    /// Finds an unused grant of a voucher held by a customer.
    pub async fn find_unused_grant(
        &self,
        customer_id: &str,
        voucher_id: &str,
    ) -> DbResult<Option<VoucherGrant>> {
        let grant = sqlx::query_as::<_, VoucherGrant>(
            r#"
            SELECT id, customer_id, voucher_id, used, assigned_at
            FROM user_vouchers
            WHERE customer_id = ?1 AND voucher_id = ?2 AND used = 0
            ORDER BY assigned_at
            LIMIT 1
            "#,
        )
        .bind(customer_id)
        .bind(voucher_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(grant)
    }
}
