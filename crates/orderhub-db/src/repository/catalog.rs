//! # Catalog Repository
//!
//! Database operations for products, variants, and fee types.
//!
//! ## Variant Identity
//! A variant is the sellable unit: one (product, color, size) combination
//! with its own price. Order lines reference variants directly; the product
//! row only contributes the display name.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use orderhub_core::{FeeType, Product, ProductVariant};

/// A variant joined with its product's display attributes, as the
/// checkout flow needs it: price for the line, name for error messages
/// and notifications.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResolvedVariant {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub color: String,
    pub size: String,
    pub price_cents: i64,
}

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Creates a product.
    pub async fn create_product(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> DbResult<Product> {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
        };

        debug!(id = %product.id, name = %product.name, "Creating product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Creates a variant of a product.
    ///
    /// Fails with a unique violation if (product, color, size) already
    /// exists.
    pub async fn create_variant(
        &self,
        product_id: &str,
        color: &str,
        size: &str,
        price_cents: i64,
    ) -> DbResult<ProductVariant> {
        let variant = ProductVariant {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            color: color.to_string(),
            size: size.to_string(),
            price_cents,
        };

        debug!(id = %variant.id, product_id = %product_id, "Creating variant");

        sqlx::query(
            r#"
            INSERT INTO product_variants (id, product_id, color, size, price_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&variant.id)
        .bind(&variant.product_id)
        .bind(&variant.color)
        .bind(&variant.size)
        .bind(variant.price_cents)
        .execute(&self.pool)
        .await?;

        Ok(variant)
    }

    /// Resolves a variant by ID, joined with its product name.
    pub async fn resolve_variant(&self, variant_id: &str) -> DbResult<Option<ResolvedVariant>> {
        let variant = sqlx::query_as::<_, ResolvedVariant>(
            r#"
            SELECT
                v.id,
                v.product_id,
                p.name AS product_name,
                v.color,
                v.size,
                v.price_cents
            FROM product_variants v
            JOIN products p ON p.id = v.product_id
            WHERE v.id = ?1
            "#,
        )
        .bind(variant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(variant)
    }

    /// Lists all variants of a product.
    pub async fn list_variants(&self, product_id: &str) -> DbResult<Vec<ProductVariant>> {
        let variants = sqlx::query_as::<_, ProductVariant>(
            r#"
            SELECT id, product_id, color, size, price_cents
            FROM product_variants
            WHERE product_id = ?1
            ORDER BY color, size
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(variants)
    }

    /// Gets a fee type by code.
    pub async fn get_fee_type(&self, code: &str) -> DbResult<Option<FeeType>> {
        let fee_type = sqlx::query_as::<_, FeeType>(
            r#"
            SELECT code, name, description
            FROM fee_types
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(fee_type)
    }
}
