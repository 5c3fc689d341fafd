//! # Pricing Module
//!
//! Shipping fee tiers, voucher discount math, and delivery estimates.
//!
//! ## Fee Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │          Shipping Fee by Max Store Distance (inclusive bounds)          │
//! │                                                                         │
//! │    distance ≤  50 km   →   15 000                                       │
//! │    distance ≤ 200 km   →   20 000                                       │
//! │    distance ≤ 500 km   →   30 000                                       │
//! │    distance >  500 km  →   45 000                                       │
//! │                                                                         │
//! │  The tier is picked from the FARTHEST allocated store: the slowest      │
//! │  leg of a multi-store order prices the whole shipment.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Voucher Math
//! Discounts apply sequentially in the order the customer submitted the
//! codes: each percentage voucher is computed against the running total
//! left by its predecessors, so submission order changes the outcome and
//! the customer's ordering is honored literally.

use crate::money::Money;
use crate::types::Voucher;

// =============================================================================
// Shipping Fee
// =============================================================================

/// Fee tier boundaries in km, paired with the fee in minor units.
/// Bounds are inclusive: exactly 50.0 km is still the first tier.
const FEE_TIERS: [(f64, i64); 3] = [(50.0, 15_000), (200.0, 20_000), (500.0, 30_000)];

/// Fee beyond the last tier boundary.
const FEE_BEYOND_TIERS: i64 = 45_000;

/// Shipping fee for an order whose farthest allocated store is
/// `max_distance_km` away.
pub fn shipping_fee(max_distance_km: f64) -> Money {
    for (bound, fee) in FEE_TIERS {
        if max_distance_km <= bound {
            return Money::from_cents(fee);
        }
    }
    Money::from_cents(FEE_BEYOND_TIERS)
}

// =============================================================================
// Delivery Estimate
// =============================================================================

/// Estimated delivery time in days, from the farthest allocated store.
///
/// Short-haul orders (within 100 km) ship in 2 days, everything else in 3.
/// Feeds the order-placed notification payload.
pub fn delivery_eta_days(max_distance_km: f64) -> i64 {
    if max_distance_km <= 100.0 {
        2
    } else {
        3
    }
}

// =============================================================================
// Voucher Discounts
// =============================================================================

/// Discount a single voucher grants against a running total.
///
/// ## Rules
/// 1. A fixed amount (`discount_amount_cents`) takes priority when present
///    and positive; the percentage is ignored in that case.
/// 2. Otherwise the percentage (basis points) of the running total applies.
/// 3. The result is capped at the running total: a voucher never pushes an
///    order negative.
/// 4. A non-positive running total or a voucher with neither component
///    yields zero.
pub fn voucher_discount(voucher: &Voucher, running_total: Money) -> Money {
    if !running_total.is_positive() {
        return Money::zero();
    }

    let raw = match voucher.discount_amount_cents {
        Some(amount) if amount > 0 => Money::from_cents(amount),
        _ => match voucher.discount_percent_bps {
            Some(bps) if bps > 0 => running_total.percentage_of(bps),
            _ => Money::zero(),
        },
    };

    raw.min(running_total)
}

/// Applies vouchers sequentially and returns the total discount.
///
/// Each voucher sees the total left by the ones before it. The caller is
/// responsible for validity and redemption checks; this is pure math.
pub fn apply_vouchers(vouchers: &[Voucher], order_total: Money) -> Money {
    let mut running = order_total;
    let mut total_discount = Money::zero();
    for voucher in vouchers {
        let discount = voucher_discount(voucher, running);
        running -= discount;
        total_discount += discount;
    }
    total_discount
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VoucherKind;
    use chrono::NaiveDate;

    fn voucher(amount: Option<i64>, bps: Option<i64>) -> Voucher {
        Voucher {
            id: "v-test".to_string(),
            code: "TEST".to_string(),
            description: None,
            discount_amount_cents: amount,
            discount_percent_bps: bps,
            valid_from: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            valid_to: Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            kind: VoucherKind::Discount,
        }
    }

    #[test]
    fn test_fee_tier_boundaries() {
        assert_eq!(shipping_fee(0.0).cents(), 15_000);
        assert_eq!(shipping_fee(50.0).cents(), 15_000);
        assert_eq!(shipping_fee(50.001).cents(), 20_000);
        assert_eq!(shipping_fee(200.0).cents(), 20_000);
        assert_eq!(shipping_fee(200.001).cents(), 30_000);
        assert_eq!(shipping_fee(500.0).cents(), 30_000);
        assert_eq!(shipping_fee(500.001).cents(), 45_000);
        assert_eq!(shipping_fee(2000.0).cents(), 45_000);
    }

    #[test]
    fn test_delivery_eta() {
        assert_eq!(delivery_eta_days(8.0), 2);
        assert_eq!(delivery_eta_days(100.0), 2);
        assert_eq!(delivery_eta_days(100.001), 3);
        assert_eq!(delivery_eta_days(800.0), 3);
    }

    #[test]
    fn test_fixed_amount_wins_over_percent() {
        let v = voucher(Some(10_000), Some(1000));
        let d = voucher_discount(&v, Money::from_cents(100_000));
        assert_eq!(d.cents(), 10_000);
    }

    #[test]
    fn test_percent_of_running_total() {
        let v = voucher(None, Some(1000)); // 10%
        let d = voucher_discount(&v, Money::from_cents(90_000));
        assert_eq!(d.cents(), 9_000);
    }

    #[test]
    fn test_discount_capped_at_total() {
        let v = voucher(Some(50_000), None);
        let d = voucher_discount(&v, Money::from_cents(30_000));
        assert_eq!(d.cents(), 30_000);
    }

    #[test]
    fn test_zero_total_zero_discount() {
        let v = voucher(Some(10_000), None);
        assert!(voucher_discount(&v, Money::zero()).is_zero());
    }

    #[test]
    fn test_empty_voucher_zero_discount() {
        let v = voucher(None, None);
        assert!(voucher_discount(&v, Money::from_cents(50_000)).is_zero());
    }

    #[test]
    fn test_sequential_application_order_matters() {
        // 100 000 total: fixed 10 000 first, then 10% of the remaining
        // 90 000 = 9 000. Total discount 19 000.
        let fixed = voucher(Some(10_000), None);
        let percent = voucher(None, Some(1000));

        let d = apply_vouchers(&[fixed.clone(), percent.clone()], Money::from_cents(100_000));
        assert_eq!(d.cents(), 19_000);

        // Reversed: 10% of 100 000 = 10 000, then fixed 10 000. Total 20 000.
        let d = apply_vouchers(&[percent, fixed], Money::from_cents(100_000));
        assert_eq!(d.cents(), 20_000);
    }

    #[test]
    fn test_sequential_never_negative() {
        let big = voucher(Some(80_000), None);
        let d = apply_vouchers(&[big.clone(), big], Money::from_cents(100_000));
        assert_eq!(d.cents(), 100_000);
    }
}
