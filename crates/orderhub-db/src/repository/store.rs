//! # Store Repository
//!
//! Database operations for stores and their inventory.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use orderhub_core::{InventoryLevel, Store};

/// Repository for store and inventory database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Creates a store.
    pub async fn create(&self, name: &str, latitude: f64, longitude: f64) -> DbResult<Store> {
        let store = Store {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            latitude,
            longitude,
        };

        debug!(id = %store.id, name = %store.name, "Creating store");

        sqlx::query(
            r#"
            INSERT INTO stores (id, name, latitude, longitude)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&store.id)
        .bind(&store.name)
        .bind(store.latitude)
        .bind(store.longitude)
        .execute(&self.pool)
        .await?;

        Ok(store)
    }

    /// Lists all stores.
    pub async fn list(&self) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(
            r#"
            SELECT id, name, latitude, longitude
            FROM stores
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    /// Sets the on-hand quantity for a (store, variant) pair.
    ///
    /// Upsert: creates the row or overwrites its quantity. Used by seeding
    /// and restocking, not by checkout — checkout only ever decrements
    /// conditionally, inside its own transaction.
    pub async fn set_inventory(
        &self,
        store_id: &str,
        variant_id: &str,
        quantity: i64,
    ) -> DbResult<()> {
        debug!(store_id = %store_id, variant_id = %variant_id, quantity, "Setting inventory");

        sqlx::query(
            r#"
            INSERT INTO inventory (store_id, variant_id, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (store_id, variant_id) DO UPDATE SET quantity = excluded.quantity
            "#,
        )
        .bind(store_id)
        .bind(variant_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets the on-hand quantity for a (store, variant) pair.
    ///
    /// Missing rows read as zero.
    pub async fn get_quantity(&self, store_id: &str, variant_id: &str) -> DbResult<i64> {
        let quantity: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT quantity
            FROM inventory
            WHERE store_id = ?1 AND variant_id = ?2
            "#,
        )
        .bind(store_id)
        .bind(variant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quantity.unwrap_or(0))
    }

    /// Lists inventory levels for a variant across all stores.
    pub async fn inventory_for_variant(&self, variant_id: &str) -> DbResult<Vec<InventoryLevel>> {
        let levels = sqlx::query_as::<_, InventoryLevel>(
            r#"
            SELECT store_id, variant_id, quantity
            FROM inventory
            WHERE variant_id = ?1
            ORDER BY store_id
            "#,
        )
        .bind(variant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(levels)
    }
}
