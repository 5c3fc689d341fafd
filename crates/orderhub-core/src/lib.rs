//! # orderhub-core: Pure Business Logic for OrderHub
//!
//! This crate is the **heart** of OrderHub. It contains all business logic
//! for multi-store order allocation as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrderHub Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (HTTP API, job runner, ...)              │   │
//! │  │        CreateOrderRequest ──► place_order ──► PlacedOrder       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ orderhub-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐ │   │
//! │  │   │   geo     │  │allocation │  │  pricing   │  │   money   │ │   │
//! │  │   │ haversine │  │  planner  │  │ fee tiers  │  │   Money   │ │   │
//! │  │   │ distance  │  │ set cover │  │  vouchers  │  │ bps math  │ │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 orderhub-db (Database Layer)                    │   │
//! │  │     SQLite repositories + the checkout transaction coordinator  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Store, ProductVariant, Order, Voucher, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`geo`] - Coordinates and great-circle distance
//! - [`allocation`] - The store allocation planner (greedy set cover)
//! - [`pricing`] - Shipping fee tiers and voucher discount math
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; the planner takes an
//!    explicit stock snapshot and a customer coordinate, nothing else
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are i64 minor units
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod error;
pub mod geo;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use orderhub_core::Money` instead of
// `use orderhub_core::money::Money`

pub use allocation::{plan, Allocation, RequestedItem, StoreAssignment, StoreStock};
pub use error::{AllocationError, UnmetItem, ValidationError};
pub use geo::{distance_km, Coordinate};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single order request.
///
/// ## Business Reason
/// Prevents runaway requests and keeps the planner's store×line scan cheap.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line in an order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
