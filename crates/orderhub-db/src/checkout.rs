//! # Checkout Coordinator
//!
//! The full order placement flow: one request in, one committed order (or
//! one typed rejection) out.
//!
//! ## The Checkout Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      place_order Flow                                   │
//! │                                                                         │
//! │  CreateOrderRequest                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Validate input (line count, quantities, payment method)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   SINGLE TRANSACTION                            │   │
//! │  │                                                                 │   │
//! │  │  1. Look up the shipping address (scoped to the customer)      │   │
//! │  │  2. Resolve lines to variants by (product, color, size),       │   │
//! │  │     merging duplicates                                         │   │
//! │  │  3. Snapshot inventory for the requested variants              │   │
//! │  │  4. Run the allocation planner on the snapshot                 │   │
//! │  │  5. INSERT order header (pending, total 0)                     │   │
//! │  │  6. Per line: INSERT order_item + conditional stock decrement  │   │
//! │  │     (quantity >= ? in the WHERE; 0 rows → Conflict)            │   │
//! │  │  7. Shipping fee from the fee code + max store distance        │   │
//! │  │  8. Vouchers, in submitted order: validate window, consume     │   │
//! │  │     the grant (used = 0 → 1, conditional), record redemption   │   │
//! │  │  9. UPDATE order total, INSERT pending payment                 │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ← Any failure above rolls back everything                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Enqueue confirmation in the notification outbox (best effort:         │
//! │  a failure here is logged and the order stands)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PlacedOrder                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The planner works on a snapshot, so two concurrent checkouts may plan
//! the same stock. The conditional decrement in step 6 is the arbiter:
//! whoever executes first wins, the loser's UPDATE matches no row and the
//! whole transaction rolls back with [`CheckoutError::Conflict`], which is
//! safe to retry. Voucher grants are consumed the same way.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, Transaction};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use orderhub_core::{
    allocation::{self, RequestedItem, StoreStock},
    pricing, validation, AllocationError, Coordinate, Money, OrderStatus, PaymentStatus, UnmetItem,
    UserAddress, ValidationError, Voucher, VoucherGrant,
};

// =============================================================================
// Request / Response DTOs
// =============================================================================

/// One requested line, identified the way customers shop: a product in a
/// specific color and size. Resolution to a variant happens inside the
/// transaction via the unique (product, color, size) key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: String,
    pub color: String,
    pub size: String,
    pub quantity: i64,
}

/// An order placement request.
///
/// Up to two voucher codes; they apply in slot order (`voucher_code1`
/// first), and each percentage voucher is computed against the total left
/// by its predecessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub shipping_address_id: String,
    pub payment_method: String,
    /// Label for the shipping fee record; the amount comes from distance.
    pub shipping_fee_code: String,
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub voucher_code1: Option<String>,
    #[serde(default)]
    pub voucher_code2: Option<String>,
}

/// A successfully placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order_id: String,
    /// Final total in minor units: items + shipping fee − voucher discounts.
    pub total_cents: i64,
    /// Maximum distance to an allocated store, km, rounded to 3 decimals.
    pub max_distance_km: f64,
    pub status: OrderStatus,
}

// =============================================================================
// Error Taxonomy
// =============================================================================

/// Everything that can reject a checkout, and how callers should react.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Input failed basic validation; fix the request.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A line quantity is non-positive or exceeds the per-line cap.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// The shipping address doesn't exist or belongs to another customer.
    #[error("Address not found: {address_id}")]
    AddressNotFound { address_id: String },

    /// No variant exists for this (product, color, size) combination.
    #[error("Product variant not found: {product_id} ({color}, {size})")]
    VariantNotFound {
        product_id: String,
        color: String,
        size: String,
    },

    /// No combination of stores covers the request; lists the unmet lines.
    #[error("Insufficient inventory: {}", format_unmet(.unmet))]
    InsufficientInventory { unmet: Vec<UnmetItem> },

    /// The requested fee code is missing from the fee-type table.
    #[error("Unknown fee type: {code}")]
    UnknownFeeType { code: String },

    /// The voucher code doesn't exist or is outside its validity window.
    #[error("Voucher invalid: {code}")]
    VoucherInvalid { code: String },

    /// The customer holds no unused grant for this voucher.
    #[error("Voucher not redeemable: {code}")]
    VoucherNotRedeemable { code: String },

    /// Lost a race against a concurrent checkout; safe to retry.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The requested status change is not allowed by the state machine.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// The order doesn't exist.
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },

    /// Underlying database failure.
    #[error(transparent)]
    Db(DbError),
}

/// Database failures convert here rather than via derive so that lost
/// write-lock races (SQLITE_BUSY surfacing before the conditional UPDATE
/// gets to run) classify as retryable conflicts, not opaque failures.
impl From<DbError> for CheckoutError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Busy { message } => CheckoutError::Conflict { message },
            other => CheckoutError::Db(other),
        }
    }
}

impl CheckoutError {
    /// Whether retrying the same request may succeed.
    ///
    /// Only true for races lost against concurrent checkouts. Semantic
    /// rejections (bad input, missing stock, spent voucher) stay rejected.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckoutError::Conflict { .. })
    }
}

impl From<AllocationError> for CheckoutError {
    fn from(err: AllocationError) -> Self {
        let AllocationError::InsufficientInventory { unmet } = err;
        CheckoutError::InsufficientInventory { unmet }
    }
}

fn format_unmet(unmet: &[UnmetItem]) -> String {
    unmet
        .iter()
        .map(|u| u.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The confirmation payload queued in the notification outbox.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderConfirmation<'a> {
    order_id: &'a str,
    customer_id: &'a str,
    total_cents: i64,
    /// Estimated delivery time from the farthest allocated store.
    eta_days: i64,
    status: OrderStatus,
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Coordinates order placement and lifecycle updates.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    db: Database,
}

impl CheckoutService {
    /// Creates a new CheckoutService over a database handle.
    pub fn new(db: Database) -> Self {
        CheckoutService { db }
    }

    /// Places an order.
    ///
    /// All writes happen in one transaction: the order either commits whole
    /// (header, items, decremented stock, fee, redemptions, payment) or not
    /// at all. After commit, a confirmation is queued in the notification
    /// outbox; a failure there is logged and does not fail the checkout.
    pub async fn place_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<PlacedOrder, CheckoutError> {
        // Cheap rejections before any database work.
        validation::validate_id("customer_id", &request.customer_id)?;
        validation::validate_id("shipping_address_id", &request.shipping_address_id)?;
        validation::validate_id("shipping_fee_code", &request.shipping_fee_code)?;
        validation::validate_payment_method(&request.payment_method)?;
        validation::validate_line_count(request.items.len())?;
        for item in &request.items {
            validation::validate_quantity(item.quantity).map_err(|_| {
                CheckoutError::InvalidQuantity {
                    quantity: item.quantity,
                }
            })?;
        }

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        // 1. Shipping address, scoped to the customer.
        let address = fetch_address(&mut tx, &request.shipping_address_id, &request.customer_id)
            .await?
            .ok_or_else(|| CheckoutError::AddressNotFound {
                address_id: request.shipping_address_id.clone(),
            })?;
        let customer_location = address.location();

        // 2. Resolve lines to variants; duplicates merge by summing.
        let mut merged: BTreeMap<String, RequestedItem> = BTreeMap::new();
        for line in &request.items {
            let variant = fetch_variant(&mut tx, &line.product_id, &line.color, &line.size)
                .await?
                .ok_or_else(|| CheckoutError::VariantNotFound {
                    product_id: line.product_id.clone(),
                    color: line.color.clone(),
                    size: line.size.clone(),
                })?;

            merged
                .entry(variant.variant_id.clone())
                .and_modify(|item| item.quantity += line.quantity)
                .or_insert(RequestedItem {
                    variant_id: variant.variant_id,
                    product_name: variant.product_name,
                    color: line.color.clone(),
                    size: line.size.clone(),
                    quantity: line.quantity,
                    unit_price_cents: variant.price_cents,
                });
        }
        let requested: Vec<RequestedItem> = merged.into_values().collect();
        // Merged duplicates may breach the per-line cap together.
        for item in &requested {
            validation::validate_quantity(item.quantity).map_err(|_| {
                CheckoutError::InvalidQuantity {
                    quantity: item.quantity,
                }
            })?;
        }

        // 3. Inventory snapshot for the requested variants, grouped by store.
        let stores = fetch_stock_snapshot(&mut tx, &requested).await?;

        // 4. Plan the allocation. Planner failure rolls everything back.
        let allocation = allocation::plan(&requested, customer_location, &stores)?;
        // Fee tier and ETA come from the exact planner distance; only the
        // stored/reported value is rounded. An allocation a hair past a
        // tier boundary must not round its way into the cheaper tier.
        let exact_distance_km = allocation.max_distance_km;
        let max_distance_km = round_km(exact_distance_km);

        debug!(
            stores = allocation.assignments.len(),
            max_distance_km, "Allocation planned"
        );

        // 5. Order header: pending, total filled in at the end.
        let order_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, status, total_cents, max_distance_km,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, 0, ?4, ?5, ?5)
            "#,
        )
        .bind(&order_id)
        .bind(&request.customer_id)
        .bind(OrderStatus::Pending)
        .bind(max_distance_km)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        // 6. Line items + conditional stock decrements.
        let mut total = Money::zero();
        for assignment in &allocation.assignments {
            for variant_id in &assignment.variant_ids {
                let item = requested
                    .iter()
                    .find(|i| &i.variant_id == variant_id)
                    .ok_or_else(|| DbError::Internal("allocated unknown variant".to_string()))?;

                sqlx::query(
                    r#"
                    INSERT INTO order_items (
                        id, order_id, variant_id, store_id,
                        quantity, unit_price_cents, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                )
                .bind(Uuid::new_v4().to_string())
                .bind(&order_id)
                .bind(&item.variant_id)
                .bind(&assignment.store_id)
                .bind(item.quantity)
                .bind(item.unit_price_cents)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(DbError::from)?;

                // The arbiter against oversell: decrement only if enough
                // stock remains right now, not just in the snapshot.
                let result = sqlx::query(
                    r#"
                    UPDATE inventory SET quantity = quantity - ?3
                    WHERE store_id = ?1 AND variant_id = ?2 AND quantity >= ?3
                    "#,
                )
                .bind(&assignment.store_id)
                .bind(&item.variant_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await
                .map_err(DbError::from)?;

                if result.rows_affected() == 0 {
                    return Err(CheckoutError::Conflict {
                        message: format!(
                            "stock for variant {} at store {} claimed concurrently",
                            item.variant_id, assignment.store_id
                        ),
                    });
                }

                total += Money::from_cents(item.unit_price_cents).multiply_quantity(item.quantity);
            }
        }

        // 7. Shipping fee: the code labels the fee, distance prices it.
        let fee_exists: Option<String> =
            sqlx::query_scalar("SELECT code FROM fee_types WHERE code = ?1")
                .bind(&request.shipping_fee_code)
                .fetch_optional(&mut *tx)
                .await
                .map_err(DbError::from)?;
        if fee_exists.is_none() {
            return Err(CheckoutError::UnknownFeeType {
                code: request.shipping_fee_code.clone(),
            });
        }

        let fee = pricing::shipping_fee(exact_distance_km);
        sqlx::query(
            r#"
            INSERT INTO order_fees (id, order_id, fee_code, amount_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&order_id)
        .bind(&request.shipping_fee_code)
        .bind(fee.cents())
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;
        total += fee;

        // 8. Vouchers, in slot order.
        let today = Utc::now().date_naive();
        let codes = request
            .voucher_code1
            .iter()
            .chain(request.voucher_code2.iter());
        for code in codes {
            let voucher = fetch_voucher(&mut tx, code)
                .await?
                .ok_or_else(|| CheckoutError::VoucherInvalid { code: code.clone() })?;

            if !voucher.is_valid_on(today) {
                return Err(CheckoutError::VoucherInvalid { code: code.clone() });
            }

            let grant = fetch_unused_grant(&mut tx, &request.customer_id, &voucher.id)
                .await?
                .ok_or_else(|| CheckoutError::VoucherNotRedeemable { code: code.clone() })?;

            // Consume the grant; losing the race here means another
            // checkout spent it between our SELECT and now.
            let result = sqlx::query(
                r#"
                UPDATE user_vouchers SET used = 1
                WHERE id = ?1 AND used = 0
                "#,
            )
            .bind(&grant.id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

            if result.rows_affected() == 0 {
                return Err(CheckoutError::Conflict {
                    message: format!("voucher grant for {code} claimed concurrently"),
                });
            }

            let discount = pricing::voucher_discount(&voucher, total);
            sqlx::query(
                r#"
                INSERT INTO order_vouchers (id, order_id, voucher_id, discount_cents)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&order_id)
            .bind(&voucher.id)
            .bind(discount.cents())
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

            total -= discount;
        }

        // 9. Final total and the pending payment record.
        sqlx::query(
            r#"
            UPDATE orders SET total_cents = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&order_id)
        .bind(total.cents())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, order_id, is_online, method, status,
                transaction_id, amount_cents, paid_at, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6, NULL, ?7)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&order_id)
        .bind(true)
        .bind(&request.payment_method)
        .bind(PaymentStatus::Pending)
        .bind(total.cents())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        tx.commit().await.map_err(DbError::from)?;

        info!(
            order_id = %order_id,
            total_cents = total.cents(),
            max_distance_km,
            "Order placed"
        );

        // Post-commit: queue the confirmation. Best effort only.
        let confirmation = OrderConfirmation {
            order_id: &order_id,
            customer_id: &request.customer_id,
            total_cents: total.cents(),
            eta_days: pricing::delivery_eta_days(exact_distance_km),
            status: OrderStatus::Pending,
        };
        match serde_json::to_string(&confirmation) {
            Ok(payload) => {
                if let Err(e) = self
                    .db
                    .notification_outbox()
                    .enqueue(&order_id, &payload)
                    .await
                {
                    warn!(order_id = %order_id, error = %e, "Failed to queue order confirmation");
                }
            }
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "Failed to serialize order confirmation");
            }
        }

        Ok(PlacedOrder {
            order_id,
            total_cents: total.cents(),
            max_distance_km,
            status: OrderStatus::Pending,
        })
    }

    /// Moves an order to a new lifecycle status.
    ///
    /// Rejects transitions the state machine forbids. The underlying UPDATE
    /// is conditional on the current status, so two concurrent updates
    /// cannot both apply.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> Result<(), CheckoutError> {
        let order = self
            .db
            .orders()
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| CheckoutError::OrderNotFound {
                order_id: order_id.to_string(),
            })?;

        if !order.status.can_transition_to(new_status) {
            return Err(CheckoutError::InvalidStatusTransition {
                from: order.status,
                to: new_status,
            });
        }

        match self
            .db
            .orders()
            .transition_status(order_id, order.status, new_status)
            .await
        {
            Ok(()) => Ok(()),
            // The order moved between our read and the update.
            Err(DbError::NotFound { .. }) => Err(CheckoutError::Conflict {
                message: format!("order {order_id} status changed concurrently"),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// In-Transaction Queries
// =============================================================================
// These run on the checkout transaction's connection so everything the
// planner sees is consistent with what gets decremented.

async fn fetch_address(
    tx: &mut Transaction<'_, Sqlite>,
    address_id: &str,
    customer_id: &str,
) -> DbResult<Option<UserAddress>> {
    let address = sqlx::query_as::<_, UserAddress>(
        r#"
        SELECT id, customer_id, address_line, latitude, longitude
        FROM user_addresses
        WHERE id = ?1 AND customer_id = ?2
        "#,
    )
    .bind(address_id)
    .bind(customer_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(address)
}

#[derive(sqlx::FromRow)]
struct VariantRow {
    variant_id: String,
    product_name: String,
    price_cents: i64,
}

/// Resolves a (product, color, size) line to its unique variant.
async fn fetch_variant(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: &str,
    color: &str,
    size: &str,
) -> DbResult<Option<VariantRow>> {
    let row = sqlx::query_as::<_, VariantRow>(
        r#"
        SELECT v.id AS variant_id, p.name AS product_name, v.price_cents
        FROM product_variants v
        JOIN products p ON p.id = v.product_id
        WHERE v.product_id = ?1 AND v.color = ?2 AND v.size = ?3
        "#,
    )
    .bind(product_id)
    .bind(color)
    .bind(size)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row)
}

/// Builds per-store stock snapshots covering the requested variants.
async fn fetch_stock_snapshot(
    tx: &mut Transaction<'_, Sqlite>,
    requested: &[RequestedItem],
) -> DbResult<Vec<StoreStock>> {
    let mut by_store: BTreeMap<String, StoreStock> = BTreeMap::new();

    for item in requested {
        let rows = sqlx::query_as::<_, (String, f64, f64, i64)>(
            r#"
            SELECT s.id, s.latitude, s.longitude, i.quantity
            FROM inventory i
            JOIN stores s ON s.id = i.store_id
            WHERE i.variant_id = ?1 AND i.quantity > 0
            "#,
        )
        .bind(&item.variant_id)
        .fetch_all(&mut **tx)
        .await?;

        for (store_id, latitude, longitude, quantity) in rows {
            let entry = by_store
                .entry(store_id.clone())
                .or_insert_with(|| StoreStock {
                    store_id,
                    location: Coordinate::new(latitude, longitude),
                    available: BTreeMap::new(),
                });
            entry.available.insert(item.variant_id.clone(), quantity);
        }
    }

    Ok(by_store.into_values().collect())
}

async fn fetch_voucher(
    tx: &mut Transaction<'_, Sqlite>,
    code: &str,
) -> DbResult<Option<Voucher>> {
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
    .fetch_optional(&mut **tx)
    .await?;

    Ok(voucher)
}

async fn fetch_unused_grant(
    tx: &mut Transaction<'_, Sqlite>,
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
    .fetch_optional(&mut **tx)
    .await?;

    Ok(grant)
}

/// Rounds a distance to 3 decimal places for storage.
fn round_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(39.99949), 39.999);
        assert_eq!(round_km(39.9995), 40.0);
        assert_eq!(round_km(0.0), 0.0);
    }

    #[test]
    fn test_retryable_classification() {
        let conflict = CheckoutError::Conflict {
            message: "x".to_string(),
        };
        assert!(conflict.is_retryable());

        let semantic = CheckoutError::VoucherNotRedeemable {
            code: "SAVE10".to_string(),
        };
        assert!(!semantic.is_retryable());

        let missing = CheckoutError::InsufficientInventory { unmet: vec![] };
        assert!(!missing.is_retryable());
    }

    #[test]
    fn test_busy_database_surfaces_as_retryable_conflict() {
        let err = CheckoutError::from(DbError::Busy {
            message: "database is locked".to_string(),
        });
        assert!(matches!(err, CheckoutError::Conflict { .. }));
        assert!(err.is_retryable());

        // Other database failures stay opaque and non-retryable.
        let err = CheckoutError::from(DbError::QueryFailed("syntax error".to_string()));
        assert!(matches!(err, CheckoutError::Db(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_status_transition_error_message() {
        let err = CheckoutError::InvalidStatusTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Shipped,
        };
        assert_eq!(err.to_string(), "Invalid status transition: pending -> shipped");
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let json = r#"{
            "customerId": "c1",
            "shippingAddressId": "a1",
            "paymentMethod": "cod",
            "shippingFeeCode": "shipping",
            "items": [{"productId": "p1", "color": "black", "size": "M", "quantity": 2}],
            "voucherCode1": "SAVE10"
        }"#;
        let request: CreateOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.customer_id, "c1");
        assert_eq!(request.items[0].product_id, "p1");
        assert_eq!(request.voucher_code1.as_deref(), Some("SAVE10"));
        assert!(request.voucher_code2.is_none());
    }

    #[test]
    fn test_voucher_codes_optional() {
        let json = r#"{
            "customerId": "c1",
            "shippingAddressId": "a1",
            "paymentMethod": "cod",
            "shippingFeeCode": "shipping",
            "items": [{"productId": "p1", "color": "black", "size": "M", "quantity": 1}]
        }"#;
        let request: CreateOrderRequest = serde_json::from_str(json).unwrap();
        assert!(request.voucher_code1.is_none());
        assert!(request.voucher_code2.is_none());
    }
}
