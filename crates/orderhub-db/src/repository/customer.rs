//! # Customer Repository
//!
//! Database operations for customers and their shipping addresses.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use orderhub_core::{Customer, UserAddress};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Creates a customer and returns it.
    pub async fn create(&self, full_name: &str, email: &str) -> DbResult<Customer> {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };

        debug!(id = %customer.id, email = %customer.email, "Creating customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, full_name, email, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.full_name)
        .bind(&customer.email)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, full_name, email, created_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Adds a shipping address for a customer.
    ///
    /// Coordinates arrive already resolved; no geocoding happens here.
    pub async fn add_address(
        &self,
        customer_id: &str,
        address_line: &str,
        latitude: f64,
        longitude: f64,
    ) -> DbResult<UserAddress> {
        let address = UserAddress {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            address_line: address_line.to_string(),
            latitude,
            longitude,
        };

        debug!(id = %address.id, customer_id = %customer_id, "Adding address");

        sqlx::query(
            r#"
            INSERT INTO user_addresses (id, customer_id, address_line, latitude, longitude)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&address.id)
        .bind(&address.customer_id)
        .bind(&address.address_line)
        .bind(address.latitude)
        .bind(address.longitude)
        .execute(&self.pool)
        .await?;

        Ok(address)
    }

    /// Gets an address by ID, scoped to its owning customer.
    ///
    /// The customer scope prevents ordering against someone else's address.
    pub async fn get_address(
        &self,
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
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    /// Lists all addresses for a customer.
    pub async fn list_addresses(&self, customer_id: &str) -> DbResult<Vec<UserAddress>> {
        let addresses = sqlx::query_as::<_, UserAddress>(
            r#"
            SELECT id, customer_id, address_line, latitude, longitude
            FROM user_addresses
            WHERE customer_id = ?1
            ORDER BY id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(addresses)
    }
}
