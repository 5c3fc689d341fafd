//! # Store Allocation Planner
//!
//! Decides which store(s) fulfill which order lines, minimizing the number
//! of shipments and favoring proximity.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Allocation Planning                                 │
//! │                                                                         │
//! │  1. COVERAGE SCAN                                                      │
//! │     For every store: which requested lines can it satisfy IN FULL      │
//! │     from its own stock? (A store either serves a line completely       │
//! │     or not at all — no splitting one line across stores.)              │
//! │     Stores covering nothing are dropped.                               │
//! │                                                                         │
//! │  2. SINGLE-STORE SHORT-CIRCUIT                                         │
//! │     If one store covers everything, ship everything from it.           │
//! │     Nearest such store wins; ties break on lowest store id.            │
//! │                                                                         │
//! │  3. GREEDY SET COVER                                                   │
//! │     Sort candidates by ascending distance (ties on store id),          │
//! │     repeatedly take the next-closest store and assign it every         │
//! │     still-uncovered line it fully covers, until nothing is left.       │
//! │                                                                         │
//! │  4. FAILURE                                                            │
//! │     Anything still uncovered → InsufficientInventory listing the       │
//! │     unmet lines. The order is rejected whole.                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Proximity-first greedy cover keeps shipping cost and time low without an
//! optimal-cover search (NP-hard in general); the single-store shortcut
//! handles the common case cheaply. The distance recorded for the order is
//! the **maximum** across allocated stores: the slowest leg determines the
//! delivery ETA and the shipping fee tier.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{AllocationError, UnmetItem};
use crate::geo::{distance_km, Coordinate};

// =============================================================================
// Planner Input
// =============================================================================

/// One resolved, merged order line: a variant and the full quantity the
/// customer wants. The planner treats lines as atomic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedItem {
    pub variant_id: String,
    /// Product attributes carried for error reporting.
    pub product_name: String,
    pub color: String,
    pub size: String,
    pub quantity: i64,
    /// Unit price in minor units at planning time (frozen onto line items).
    pub unit_price_cents: i64,
}

/// A store's stock snapshot for the requested variants.
///
/// Taken inside the checkout transaction, so planning and decrementing see
/// consistent quantities.
#[derive(Debug, Clone)]
pub struct StoreStock {
    pub store_id: String,
    pub location: Coordinate,
    /// variant id → quantity on hand. Missing entries mean zero.
    pub available: BTreeMap<String, i64>,
}

// =============================================================================
// Planner Output
// =============================================================================

/// One store's share of the allocation: which lines it fulfills, and how
/// far it is from the customer.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreAssignment {
    pub store_id: String,
    pub distance_km: f64,
    /// Lines fulfilled at this store, by variant id. Each line is covered
    /// whole; quantities live on the requested items.
    pub variant_ids: BTreeSet<String>,
}

/// The planner's result: a non-empty set of store assignments whose union
/// exactly equals the requested lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub assignments: Vec<StoreAssignment>,
    /// Maximum distance among allocated stores, in km.
    pub max_distance_km: f64,
}

// =============================================================================
// Planner
// =============================================================================

/// Internal: one store that can cover at least one requested line.
struct Candidate<'a> {
    store_id: &'a str,
    distance_km: f64,
    covered: BTreeSet<String>,
}

/// Plans which stores fulfill which lines.
///
/// `items` must already be merged per variant (one entry per variant id);
/// the checkout coordinator sums duplicate request lines before calling.
/// An empty request yields an empty allocation.
///
/// ## Errors
/// [`AllocationError::InsufficientInventory`] when no combination of
/// stores covers every line in full, listing the unmet lines.
pub fn plan(
    items: &[RequestedItem],
    customer: Coordinate,
    stores: &[StoreStock],
) -> Result<Allocation, AllocationError> {
    if items.is_empty() {
        return Ok(Allocation {
            assignments: Vec::new(),
            max_distance_km: 0.0,
        });
    }

    let all_variants: BTreeSet<String> = items.iter().map(|i| i.variant_id.clone()).collect();

    // 1. Coverage scan: per store, the lines it can serve in full.
    let mut candidates: Vec<Candidate<'_>> = Vec::new();
    for store in stores {
        let covered: BTreeSet<String> = items
            .iter()
            .filter(|item| {
                store
                    .available
                    .get(&item.variant_id)
                    .is_some_and(|&qty| qty >= item.quantity)
            })
            .map(|item| item.variant_id.clone())
            .collect();

        if !covered.is_empty() {
            candidates.push(Candidate {
                store_id: &store.store_id,
                distance_km: distance_km(customer, store.location),
                covered,
            });
        }
    }

    // 2. Single-store short-circuit: nearest full-cover store, ties on id.
    if let Some(full) = candidates
        .iter()
        .filter(|c| c.covered.is_superset(&all_variants))
        .min_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| a.store_id.cmp(b.store_id))
        })
    {
        return Ok(Allocation {
            max_distance_km: full.distance_km,
            assignments: vec![StoreAssignment {
                store_id: full.store_id.to_string(),
                distance_km: full.distance_km,
                variant_ids: all_variants,
            }],
        });
    }

    // 3. Greedy cover by ascending distance.
    candidates.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.store_id.cmp(b.store_id))
    });

    let mut uncovered = all_variants;
    let mut assignments: Vec<StoreAssignment> = Vec::new();

    for candidate in &candidates {
        let take: BTreeSet<String> = candidate.covered.intersection(&uncovered).cloned().collect();
        if take.is_empty() {
            continue;
        }

        for variant_id in &take {
            uncovered.remove(variant_id);
        }
        assignments.push(StoreAssignment {
            store_id: candidate.store_id.to_string(),
            distance_km: candidate.distance_km,
            variant_ids: take,
        });

        if uncovered.is_empty() {
            break;
        }
    }

    // 4. Anything left is unmeetable.
    if !uncovered.is_empty() {
        let unmet = items
            .iter()
            .filter(|item| uncovered.contains(&item.variant_id))
            .map(|item| UnmetItem {
                product_name: item.product_name.clone(),
                size: item.size.clone(),
                color: item.color.clone(),
            })
            .collect();
        return Err(AllocationError::InsufficientInventory { unmet });
    }

    let max_distance_km = assignments
        .iter()
        .map(|a| a.distance_km)
        .fold(0.0_f64, f64::max);

    Ok(Allocation {
        assignments,
        max_distance_km,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(variant_id: &str, qty: i64) -> RequestedItem {
        RequestedItem {
            variant_id: variant_id.to_string(),
            product_name: format!("product-{variant_id}"),
            color: "black".to_string(),
            size: "M".to_string(),
            quantity: qty,
            unit_price_cents: 10_000,
        }
    }

    fn store(id: &str, lat: f64, lon: f64, stock: &[(&str, i64)]) -> StoreStock {
        StoreStock {
            store_id: id.to_string(),
            location: Coordinate::new(lat, lon),
            available: stock
                .iter()
                .map(|(v, q)| (v.to_string(), *q))
                .collect(),
        }
    }

    const CUSTOMER: Coordinate = Coordinate::new(10.0, 106.0);

    #[test]
    fn test_single_store_covers_all() {
        let items = vec![item("v1", 2), item("v2", 1)];
        let stores = vec![
            store("far-full", 12.0, 106.0, &[("v1", 5), ("v2", 5)]),
            store("near-partial", 10.01, 106.0, &[("v1", 5)]),
        ];

        let allocation = plan(&items, CUSTOMER, &stores).unwrap();

        // One store can serve everything: never a multi-store allocation.
        assert_eq!(allocation.assignments.len(), 1);
        assert_eq!(allocation.assignments[0].store_id, "far-full");
        assert_eq!(allocation.assignments[0].variant_ids.len(), 2);
    }

    #[test]
    fn test_full_cover_tie_breaks_nearest_then_id() {
        let items = vec![item("v1", 1)];
        let stores = vec![
            store("b-store", 10.1, 106.0, &[("v1", 9)]),
            store("a-store", 10.1, 106.0, &[("v1", 9)]),
            store("far", 11.0, 106.0, &[("v1", 9)]),
        ];

        let allocation = plan(&items, CUSTOMER, &stores).unwrap();
        assert_eq!(allocation.assignments[0].store_id, "a-store");
    }

    #[test]
    fn test_greedy_prefers_closest() {
        // Neither store covers both lines; greedy takes the closest first.
        let items = vec![item("v1", 2), item("v2", 3)];
        let stores = vec![
            store("near", 10.05, 106.0, &[("v1", 2)]),
            store("far", 10.50, 106.0, &[("v2", 3)]),
        ];

        let allocation = plan(&items, CUSTOMER, &stores).unwrap();

        assert_eq!(allocation.assignments.len(), 2);
        assert_eq!(allocation.assignments[0].store_id, "near");
        assert!(allocation.assignments[0].variant_ids.contains("v1"));
        assert_eq!(allocation.assignments[1].store_id, "far");
        assert!(allocation.assignments[1].variant_ids.contains("v2"));
        assert!((allocation.max_distance_km - allocation.assignments[1].distance_km).abs() < 1e-9);
    }

    #[test]
    fn test_partial_line_coverage_not_permitted() {
        // Store holds 2 of the 3 requested units: it cannot serve the line.
        let items = vec![item("v1", 3)];
        let stores = vec![store("short", 10.01, 106.0, &[("v1", 2)])];

        let err = plan(&items, CUSTOMER, &stores).unwrap_err();
        let AllocationError::InsufficientInventory { unmet } = err;
        assert_eq!(unmet.len(), 1);
        assert_eq!(unmet[0].product_name, "product-v1");
    }

    #[test]
    fn test_union_equals_request_exactly() {
        let items = vec![item("v1", 1), item("v2", 2), item("v3", 4)];
        let stores = vec![
            store("s1", 10.02, 106.0, &[("v1", 1), ("v3", 4)]),
            store("s2", 10.10, 106.0, &[("v2", 2), ("v3", 4)]),
            store("s3", 10.90, 106.0, &[("v1", 1), ("v2", 2)]),
        ];

        let allocation = plan(&items, CUSTOMER, &stores).unwrap();

        let mut covered: BTreeSet<String> = BTreeSet::new();
        for assignment in &allocation.assignments {
            for v in &assignment.variant_ids {
                // no line assigned twice
                assert!(covered.insert(v.clone()), "variant {v} double-assigned");
            }
        }
        let requested: BTreeSet<String> =
            items.iter().map(|i| i.variant_id.clone()).collect();
        assert_eq!(covered, requested);

        // no store assigned a line it cannot fully satisfy
        for assignment in &allocation.assignments {
            let st = stores
                .iter()
                .find(|s| s.store_id == assignment.store_id)
                .unwrap();
            for v in &assignment.variant_ids {
                let need = items.iter().find(|i| &i.variant_id == v).unwrap().quantity;
                assert!(st.available[v] >= need);
            }
        }
    }

    #[test]
    fn test_insufficient_lists_all_unmet() {
        let items = vec![item("v1", 1), item("v2", 10), item("v3", 10)];
        let stores = vec![store("s1", 10.01, 106.0, &[("v1", 1), ("v2", 5)])];

        let err = plan(&items, CUSTOMER, &stores).unwrap_err();
        let AllocationError::InsufficientInventory { unmet } = err;
        assert_eq!(unmet.len(), 2);
    }

    #[test]
    fn test_no_stores_at_all() {
        let items = vec![item("v1", 1)];
        let err = plan(&items, CUSTOMER, &[]).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::InsufficientInventory { .. }
        ));
    }

    #[test]
    fn test_empty_request_empty_allocation() {
        let allocation = plan(&[], CUSTOMER, &[]).unwrap();
        assert!(allocation.assignments.is_empty());
        assert_eq!(allocation.max_distance_km, 0.0);
    }

    /// Scenario from the fulfillment playbook: 3 units of one variant,
    /// Store A (≈8 km) has 2, Store B (≈40 km) has 5. A cannot serve the
    /// line in full, so B takes it alone.
    #[test]
    fn test_closer_store_with_partial_stock_loses_the_line() {
        let items = vec![item("v1", 3)];
        // ~0.072° latitude ≈ 8 km; ~0.36° ≈ 40 km
        let stores = vec![
            store("store-a", 10.072, 106.0, &[("v1", 2)]),
            store("store-b", 10.36, 106.0, &[("v1", 5)]),
        ];

        let allocation = plan(&items, CUSTOMER, &stores).unwrap();
        assert_eq!(allocation.assignments.len(), 1);
        assert_eq!(allocation.assignments[0].store_id, "store-b");
        assert!(allocation.max_distance_km > 35.0 && allocation.max_distance_km < 45.0);
    }
}
