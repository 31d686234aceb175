use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::cart::models::CartLine;
use crate::item::models::Item;
use crate::item::models::ItemId;
use crate::order::errors::OrderError;
use crate::order::models::Order;
use crate::order::models::OrderId;
use crate::order::ports::OrderRepository;
use crate::user::models::UserId;

pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_line(row: &PgRow) -> Result<CartLine, OrderError> {
        let quantity: i64 = row
            .try_get("quantity")
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        Ok(CartLine {
            item: Item {
                id: ItemId(
                    row.try_get("item_id")
                        .map_err(|e| OrderError::DatabaseError(e.to_string()))?,
                ),
                name: row
                    .try_get("name")
                    .map_err(|e| OrderError::DatabaseError(e.to_string()))?,
                description: row
                    .try_get("description")
                    .map_err(|e| OrderError::DatabaseError(e.to_string()))?,
                price_cents: row
                    .try_get("price_cents")
                    .map_err(|e| OrderError::DatabaseError(e.to_string()))?,
            },
            quantity: u32::try_from(quantity)
                .map_err(|e| OrderError::DatabaseError(e.to_string()))?,
        })
    }

    async fn lines_for_order(&self, order_id: Uuid) -> Result<Vec<CartLine>, OrderError> {
        let rows = sqlx::query(
            r#"
            SELECT oi.item_id, oi.quantity, i.name, i.description, i.price_cents
            FROM order_items oi
            JOIN items i ON i.id = oi.item_id
            WHERE oi.order_id = $1
            ORDER BY oi.item_id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_line).collect()
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, OrderError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, total_cents, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order.id.0)
        .bind(order.user_id.0)
        .bind(order.total_cents)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        for line in &order.lines {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, item_id, quantity)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(order.id.0)
            .bind(line.item.id.0)
            .bind(i64::from(line.quantity))
            .execute(&mut *tx)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        Ok(order)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, total_cents, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            let order_id: Uuid = row
                .try_get("id")
                .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

            orders.push(Order {
                id: OrderId(order_id),
                user_id: *user_id,
                lines: self.lines_for_order(order_id).await?,
                total_cents: row
                    .try_get("total_cents")
                    .map_err(|e| OrderError::DatabaseError(e.to_string()))?,
                created_at: row
                    .try_get("created_at")
                    .map_err(|e| OrderError::DatabaseError(e.to_string()))?,
            });
        }

        Ok(orders)
    }
}
