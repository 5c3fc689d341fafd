//! # Domain Types
//!
//! Core domain types used throughout OrderHub.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductVariant  │   │      Order      │   │    Voucher      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  code (unique)  │       │
//! │  │  color / size   │   │  status         │   │  fixed or bps   │       │
//! │  │  price_cents    │   │  total_cents    │   │  [from, to]     │       │
//! │  └─────────────────┘   │  max_distance   │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Store       │   │   OrderStatus   │   │  VoucherGrant   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name       │   │  Pending        │   │  customer       │       │
//! │  │  lat / lon      │   │  Confirmed      │   │  voucher        │       │
//! │  └─────────────────┘   │  Shipped        │   │  used flag      │       │
//! │                        │  Delivered      │   └─────────────────┘       │
//! │                        │  Cancelled      │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business key where one exists: voucher `code`, fee type `code`,
//!   variant `(product, color, size)`

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::Coordinate;
use crate::money::Money;

// =============================================================================
// Customers & Addresses
// =============================================================================

/// A customer able to place orders and hold voucher grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A shipping address owned by a customer.
///
/// Coordinates arrive already resolved; geocoding is an external concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UserAddress {
    pub id: String,
    pub customer_id: String,
    pub address_line: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl UserAddress {
    /// Returns the address location as a coordinate.
    #[inline]
    pub fn location(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

// =============================================================================
// Stores & Inventory
// =============================================================================

/// A physical store holding sellable inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Store {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Store {
    /// Returns the store location as a coordinate.
    #[inline]
    pub fn location(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// On-hand quantity of one variant at one store.
///
/// Unique per (store, variant); never negative after a successful
/// allocation — the schema carries a CHECK and the coordinator only ever
/// decrements conditionally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryLevel {
    pub store_id: String,
    pub variant_id: String,
    pub quantity: i64,
}

// =============================================================================
// Products & Variants
// =============================================================================

/// A product; sellable units are its variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// A specific color/size instance of a product, carrying its own price.
///
/// Unique per (product, color, size), so an order line of
/// (product, color, size) resolves to exactly one variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductVariant {
    pub id: String,
    pub product_id: String,
    pub color: String,
    pub size: String,
    pub price_cents: i64,
}

impl ProductVariant {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Fee Types
// =============================================================================

/// A fee label. The shipping fee *amount* is computed from allocation
/// distance; the fee type only identifies what the fee is for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FeeType {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
///
/// ```text
/// pending ──► confirmed ──► shipped ──► delivered
///    │             │
///    └──────┬──────┘
///           ▼
///       cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order created, payment not yet settled.
    Pending,
    /// Payment confirmed, awaiting shipment.
    Confirmed,
    /// Handed to the carrier.
    Shipped,
    /// Delivered to the customer. Terminal.
    Delivered,
    /// Cancelled from pending or confirmed. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }

    /// Stable string form matching the database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Displays the database string form, so statuses interpolate directly
/// into error messages and logs.
impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Orders
// =============================================================================

/// An order header.
///
/// `max_distance_km` records the maximum allocation distance across the
/// fulfilling stores — the slowest leg determines the delivery ETA and the
/// shipping fee tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub max_distance_km: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A line item in an order. Immutable once created.
///
/// Uses the snapshot pattern: the unit price is frozen at order time, and
/// the fulfilling store is recorded so the allocation is auditable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub variant_id: String,
    /// Store the line is fulfilled from.
    pub store_id: String,
    pub quantity: i64,
    /// Unit price in minor units at order time (frozen).
    pub unit_price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Line total (quantity × frozen unit price).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

/// A fee applied to an order; one shipping fee per order in this flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderFee {
    pub id: String,
    pub order_id: String,
    pub fee_code: String,
    pub amount_cents: i64,
}

// =============================================================================
// Vouchers
// =============================================================================

/// Classification tag carried on a voucher.
///
/// Informational in the current flow: it is not enforced against the
/// fee/discount slot the voucher ends up reducing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum VoucherKind {
    Shipping,
    Discount,
}

/// A redeemable voucher.
///
/// The discount is either a fixed amount or a percentage of the running
/// total — the fixed amount takes priority when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Voucher {
    pub id: String,
    pub code: String,
    pub description: Option<String>,
    /// Fixed discount in minor units; takes priority over the percentage.
    pub discount_amount_cents: Option<i64>,
    /// Percentage discount in basis points (1000 = 10%).
    pub discount_percent_bps: Option<i64>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub kind: VoucherKind,
}

impl Voucher {
    /// Whether the voucher is valid on `date`.
    ///
    /// The window is inclusive on both ends, and a voucher missing either
    /// bound is never valid — matching the original redemption query,
    /// which required both bounds to bracket today's date.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        match (self.valid_from, self.valid_to) {
            (Some(from), Some(to)) => from <= date && date <= to,
            _ => false,
        }
    }
}

/// A customer's entitlement to redeem a specific voucher.
///
/// Consumed at most once: redemption flips `used` permanently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VoucherGrant {
    pub id: String,
    pub customer_id: String,
    pub voucher_id: String,
    pub used: bool,
    pub assigned_at: DateTime<Utc>,
}

/// A voucher redemption recorded against an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderVoucherRedemption {
    pub id: String,
    pub order_id: String,
    pub voucher_id: String,
    /// Discount actually applied, after capping at the running total.
    pub discount_cents: i64,
}

// =============================================================================
// Payments
// =============================================================================

/// Settlement status of a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// A payment record for an order.
///
/// Created in `pending` status by the checkout coordinator; settlement
/// against a gateway happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    pub is_online: bool,
    /// Payment method as supplied by the caller (free-form).
    pub method: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub amount_cents: i64,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Notification Outbox
// =============================================================================

/// An entry in the notification outbox queue.
///
/// Uses the outbox pattern: the coordinator enqueues a confirmation after
/// commit and a delivery worker drains the queue. Enqueue failures are
/// logged and never affect the committed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct NotificationOutboxEntry {
    pub id: String,
    pub order_id: String,
    /// The confirmation payload as JSON.
    pub payload: String,
    /// Number of delivery attempts.
    pub attempts: i64,
    /// Last error message if delivery failed.
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub attempted_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_transitions() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));

        // terminal states
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        // no skipping
        assert!(!Pending.can_transition_to(Shipped));
        assert!(!Shipped.can_transition_to(Cancelled));
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_status_display_matches_db_form() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(
            format!("{} -> {}", OrderStatus::Pending, OrderStatus::Shipped),
            "pending -> shipped"
        );
    }

    #[test]
    fn test_voucher_window_inclusive() {
        let voucher = Voucher {
            id: "v1".to_string(),
            code: "SAVE10".to_string(),
            description: None,
            discount_amount_cents: Some(10_000),
            discount_percent_bps: None,
            valid_from: NaiveDate::from_ymd_opt(2026, 1, 1),
            valid_to: NaiveDate::from_ymd_opt(2026, 1, 31),
            kind: VoucherKind::Discount,
        };

        let d = |day| NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
        assert!(voucher.is_valid_on(d(1)));
        assert!(voucher.is_valid_on(d(31)));
        assert!(!voucher.is_valid_on(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
        assert!(!voucher.is_valid_on(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    }

    #[test]
    fn test_voucher_missing_bound_never_valid() {
        let voucher = Voucher {
            id: "v1".to_string(),
            code: "OPEN".to_string(),
            description: None,
            discount_amount_cents: Some(1000),
            discount_percent_bps: None,
            valid_from: NaiveDate::from_ymd_opt(2026, 1, 1),
            valid_to: None,
            kind: VoucherKind::Shipping,
        };
        assert!(!voucher.is_valid_on(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            id: "i1".to_string(),
            order_id: "o1".to_string(),
            variant_id: "v1".to_string(),
            store_id: "s1".to_string(),
            quantity: 3,
            unit_price_cents: 25_000,
            created_at: Utc::now(),
        };
        assert_eq!(item.line_total().cents(), 75_000);
    }
}
