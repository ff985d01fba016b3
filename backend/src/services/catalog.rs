//! Catalog service for managing the product list

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::Product;
use crate::services::feed::{ChangeFeed, ChangeOp, EntityKind};

/// Catalog service for product CRUD and stock adjustments
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
    feed: ChangeFeed,
}

/// Input for creating a product
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, message = "Product name cannot be empty"))]
    pub name: String,
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
}

/// Input for adjusting stock (positive restocks, negative sells down)
#[derive(Debug, Deserialize)]
pub struct AdjustStockInput {
    pub change: i32,
}

/// Row for product queries
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: Decimal,
    stock: i32,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            stock: row.stock,
            created_at: row.created_at,
        }
    }
}

impl CatalogService {
    pub fn new(db: PgPool, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    /// Create a product
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        super::check_input(&input)?;
        shared::validation::validate_price(input.price).map_err(|msg| AppError::Validation {
            field: "price".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, price, stock)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, stock, created_at
            "#,
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.stock)
        .fetch_one(&self.db)
        .await?;

        let product = Product::from(row);
        self.feed
            .record(EntityKind::Product, ChangeOp::Inserted, product.id)
            .await?;
        Ok(product)
    }

    /// List products in catalog insertion order, which the billing rollup
    /// preserves in its output.
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, stock, created_at FROM products ORDER BY created_at ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a single product
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, stock, created_at FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(Product::from(row))
    }

    /// Adjust stock by a signed amount; the result may not go negative
    pub async fn adjust_stock(
        &self,
        product_id: Uuid,
        input: AdjustStockInput,
    ) -> AppResult<Product> {
        let current = self.get_product(product_id).await?;
        let new_stock = current.stock + input.change;
        shared::validation::validate_stock(new_stock).map_err(|msg| AppError::Validation {
            field: "stock".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products SET stock = $1
            WHERE id = $2
            RETURNING id, name, price, stock, created_at
            "#,
        )
        .bind(new_stock)
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        let product = Product::from(row);
        self.feed
            .record(EntityKind::Product, ChangeOp::Updated, product.id)
            .await?;
        Ok(product)
    }

    /// Delete a product. Existing orders keep their frozen totals and the
    /// now-dangling product reference; referential integrity is only
    /// enforced at order creation time.
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        self.feed
            .record(EntityKind::Product, ChangeOp::Deleted, product_id)
            .await?;
        Ok(())
    }
}
