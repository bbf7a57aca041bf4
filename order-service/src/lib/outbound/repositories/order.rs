use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::NewOrder;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderFilter;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderScope;
use crate::domain::order::models::OrderStatus;
use crate::domain::order::models::Product;
use crate::domain::order::models::ProductId;
use crate::domain::order::ports::OrderRepository;
use crate::domain::user::models::UserId;

pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct OrderRow {
    order_id: Uuid,
    created_by: Uuid,
    phone: String,
    email: String,
    description: String,
    status: i16,
    created_at: DateTime<Utc>,
    product_id: Uuid,
    product_name: String,
    product_weight: f64,
    product_description: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = OrderError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::try_from(row.status)
            .map_err(|e| OrderError::DatabaseError(format!("Corrupt orders row: {}", e)))?;

        Ok(Order {
            id: OrderId(row.order_id),
            created_by: UserId(row.created_by),
            phone: row.phone,
            email: row.email,
            description: row.description,
            product: Product {
                id: ProductId(row.product_id),
                name: row.product_name,
                weight_kg: row.product_weight,
                description: row.product_description,
            },
            status,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(&self, order: NewOrder) -> Result<Order, OrderError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            WITH inserted AS (
                INSERT INTO orders (order_id, created_by, product_id, phone, email, description, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING order_id, created_by, product_id, phone, email, description, status, created_at
            )
            SELECT i.order_id, i.created_by, i.phone, i.email, i.description, i.status, i.created_at,
                   p.product_id, p.name AS product_name, p.weight AS product_weight,
                   p.description AS product_description
            FROM inserted i
            JOIN products p ON p.product_id = i.product_id
            "#,
        )
        .bind(order.id.0)
        .bind(order.created_by.0)
        .bind(order.product_id.0)
        .bind(&order.phone)
        .bind(&order.email)
        .bind(&order.description)
        .bind(order.status.code())
        .bind(order.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation()
                    && db_err.constraint() == Some("orders_product_id_fkey")
                {
                    return OrderError::ProductNotFound(order.product_id.to_string());
                }
            }
            OrderError::DatabaseError(e.to_string())
        })?;

        Order::try_from(row)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT o.order_id, o.created_by, o.phone, o.email, o.description, o.status, o.created_at,
                   p.product_id, p.name AS product_name, p.weight AS product_weight,
                   p.description AS product_description
            FROM orders o
            JOIN products p ON p.product_id = o.product_id
            WHERE o.order_id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        row.map(Order::try_from).transpose()
    }

    async fn find(
        &self,
        scope: &OrderScope,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, OrderError> {
        let created_by = match scope {
            OrderScope::All => None,
            OrderScope::CreatedBy(user_id) => Some(user_id.0),
        };

        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT o.order_id, o.created_by, o.phone, o.email, o.description, o.status, o.created_at,
                   p.product_id, p.name AS product_name, p.weight AS product_weight,
                   p.description AS product_description
            FROM orders o
            JOIN products p ON p.product_id = o.product_id
            WHERE o.status = $1
              AND ($2::uuid IS NULL OR o.created_by = $2)
              AND ($3::text IS NULL OR o.phone = $3)
              AND ($4::text IS NULL OR o.email = $4)
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(filter.status.code())
        .bind(created_by)
        .bind(filter.phone.as_deref())
        .bind(filter.email.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), OrderError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $1
            WHERE order_id = $2
            "#,
        )
        .bind(status.code())
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(OrderError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
