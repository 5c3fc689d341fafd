//! # orderhub-db: Database Layer for OrderHub
//!
//! This crate provides database access for OrderHub, plus the checkout
//! transaction coordinator. It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrderHub Data Flow                               │
//! │                                                                         │
//! │  Caller (HTTP API, job runner, seed binary)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   orderhub-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │   Checkout   │  │   │
//! │  │   │   (pool.rs)   │    │ (repository/) │    │ (checkout.rs)│  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CustomerRepo  │◄───│ place_order  │  │   │
//! │  │   │ Migrations    │    │ StoreRepo     │    │ status moves │  │   │
//! │  │   │ WAL mode      │    │ VoucherRepo   │    │ outbox queue │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └────────────────────────────────┬────────────────────────────────┘   │
//! │                                   │ (pure planning & pricing)          │
//! │                                   ▼                                    │
//! │                            orderhub-core                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (customer, store, ...)
//! - [`checkout`] - The checkout transaction coordinator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orderhub_db::{CheckoutService, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/orderhub.db")).await?;
//! let checkout = CheckoutService::new(db);
//!
//! let placed = checkout.place_order(&request).await?;
//! println!("order {} total {}", placed.order_id, placed.total_cents);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{
    CheckoutError, CheckoutService, CreateOrderRequest, OrderItemRequest, PlacedOrder,
};
pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::customer::CustomerRepository;
pub use repository::order::OrderRepository;
pub use repository::outbox::NotificationOutboxRepository;
pub use repository::store::StoreRepository;
pub use repository::voucher::VoucherRepository;
