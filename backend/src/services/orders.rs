//! Order service: creation, full edits and payment-status transitions

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Order, PaymentState};
use crate::services::feed::{ChangeFeed, ChangeOp, EntityKind};

/// Order service
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
    feed: ChangeFeed,
}

/// Input for creating an order
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderInput {
    pub customer_name: Option<String>,
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub paid_with_qr: bool,
    pub date: Option<DateTime<Utc>>,
}

/// Input for a full order edit. The total is recomputed from the product's
/// price at edit time; payment flags are untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderInput {
    pub customer_name: Option<String>,
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,
}

/// Input for the payment-status transition
#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub is_paid: bool,
    #[serde(default)]
    pub paid_with_qr: bool,
}

/// Row for order queries
#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    customer_name: String,
    product_id: Uuid,
    quantity: i32,
    total: Decimal,
    date: DateTime<Utc>,
    is_paid: bool,
    was_unpaid: bool,
    paid_with_qr: bool,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            customer_name: row.customer_name,
            product_id: row.product_id,
            quantity: row.quantity,
            total: row.total,
            date: row.date,
            is_paid: row.is_paid,
            was_unpaid: row.was_unpaid,
            paid_with_qr: row.paid_with_qr,
        }
    }
}

const ORDER_COLUMNS: &str =
    "id, customer_name, product_id, quantity, total, date, is_paid, was_unpaid, paid_with_qr";

impl OrderService {
    pub fn new(db: PgPool, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    /// Create an order. The product must exist at creation time; its current
    /// price is frozen into the order total.
    pub async fn create_order(&self, input: CreateOrderInput) -> AppResult<Order> {
        super::check_input(&input)?;

        let price: Decimal = sqlx::query_scalar("SELECT price FROM products WHERE id = $1")
            .bind(input.product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let customer_name = shared::validation::normalize_customer_name(input.customer_name.as_deref());
        let total = price * Decimal::from(input.quantity);
        let date = input.date.unwrap_or_else(Utc::now);
        // An order created paid was never unpaid; the ratchet starts set
        // only for orders that begin life unpaid.
        let was_unpaid = !input.is_paid;
        let paid_with_qr = input.is_paid && input.paid_with_qr;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO orders (customer_name, product_id, quantity, total, date, is_paid, was_unpaid, paid_with_qr)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&customer_name)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(total)
        .bind(date)
        .bind(input.is_paid)
        .bind(was_unpaid)
        .bind(paid_with_qr)
        .fetch_one(&self.db)
        .await?;

        let order = Order::from(row);
        self.feed
            .record(EntityKind::Order, ChangeOp::Inserted, order.id)
            .await?;
        Ok(order)
    }

    /// List all orders, newest first
    pub async fn list_orders(&self) -> AppResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY date DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Get a single order
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        Ok(Order::from(row))
    }

    /// Apply a full edit to an order
    pub async fn update_order(&self, order_id: Uuid, input: UpdateOrderInput) -> AppResult<Order> {
        super::check_input(&input)?;

        let mut order = self.get_order(order_id).await?;
        let price: Decimal = sqlx::query_scalar("SELECT price FROM products WHERE id = $1")
            .bind(input.product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let customer_name =
            shared::validation::normalize_customer_name(input.customer_name.as_deref());
        order.apply_edit(customer_name, input.product_id, input.quantity, price);

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            UPDATE orders
            SET customer_name = $1, product_id = $2, quantity = $3, total = $4
            WHERE id = $5
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&order.customer_name)
        .bind(order.product_id)
        .bind(order.quantity)
        .bind(order.total)
        .bind(order_id)
        .fetch_one(&self.db)
        .await?;

        let order = Order::from(row);
        self.feed
            .record(EntityKind::Order, ChangeOp::Updated, order.id)
            .await?;
        Ok(order)
    }

    /// Payment-status transition. Only unpaid-to-paid is exposed; there is
    /// no way back to unpaid. The `was_unpaid` ratchet is forced on every
    /// accepted transition, matching the reporting semantics.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        input: UpdateStatusInput,
    ) -> AppResult<Order> {
        let mut order = self.get_order(order_id).await?;

        let target = PaymentState::from_flags(input.is_paid, input.paid_with_qr);
        if !order.can_transition_to(target) {
            return Err(AppError::InvalidStateTransition(
                "Orders cannot be returned to unpaid".to_string(),
            ));
        }
        order.mark_paid(input.paid_with_qr);

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            UPDATE orders
            SET is_paid = $1, paid_with_qr = $2, was_unpaid = $3
            WHERE id = $4
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order.is_paid)
        .bind(order.paid_with_qr)
        .bind(order.was_unpaid)
        .bind(order_id)
        .fetch_one(&self.db)
        .await?;

        let order = Order::from(row);
        self.feed
            .record(EntityKind::Order, ChangeOp::Updated, order.id)
            .await?;
        Ok(order)
    }
}
