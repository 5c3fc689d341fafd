//! # Repository Module
//!
//! Repository implementations for database access.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Repository Pattern                                  │
//! │                                                                         │
//! │  Callers never write SQL. They use repositories:                       │
//! │                                                                         │
//! │  CheckoutService / seed binary / tests                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.stores().inventory_for_variant(id)  ← Clean API                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreRepository (this module)          ← SQL lives here               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! │                                                                         │
//! │  The one exception is the checkout coordinator, which runs its         │
//! │  writes inside a single transaction and owns that SQL directly.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod customer;
pub mod order;
pub mod outbox;
pub mod store;
pub mod voucher;
