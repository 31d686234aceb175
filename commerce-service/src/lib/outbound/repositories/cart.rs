use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::cart::errors::CartError;
use crate::cart::models::Cart;
use crate::cart::models::CartId;
use crate::cart::models::CartLine;
use crate::cart::ports::CartRepository;
use crate::item::models::Item;
use crate::item::models::ItemId;
use crate::user::models::UserId;

pub struct PostgresCartRepository {
    pool: PgPool,
}

impl PostgresCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_line(row: &PgRow) -> Result<CartLine, CartError> {
        let quantity: i64 = row
            .try_get("quantity")
            .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        Ok(CartLine {
            item: Item {
                id: ItemId(
                    row.try_get("item_id")
                        .map_err(|e| CartError::DatabaseError(e.to_string()))?,
                ),
                name: row
                    .try_get("name")
                    .map_err(|e| CartError::DatabaseError(e.to_string()))?,
                description: row
                    .try_get("description")
                    .map_err(|e| CartError::DatabaseError(e.to_string()))?,
                price_cents: row
                    .try_get("price_cents")
                    .map_err(|e| CartError::DatabaseError(e.to_string()))?,
            },
            quantity: u32::try_from(quantity)
                .map_err(|e| CartError::DatabaseError(e.to_string()))?,
        })
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, CartError> {
        let cart_row = sqlx::query("SELECT id FROM carts WHERE user_id = $1")
            .bind(user_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        let cart_id: Uuid = match cart_row {
            Some(row) => row
                .try_get("id")
                .map_err(|e| CartError::DatabaseError(e.to_string()))?,
            None => return Ok(None),
        };

        let line_rows = sqlx::query(
            r#"
            SELECT ci.item_id, ci.quantity, i.name, i.description, i.price_cents
            FROM cart_items ci
            JOIN items i ON i.id = ci.item_id
            WHERE ci.cart_id = $1
            ORDER BY ci.item_id
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        let lines = line_rows
            .iter()
            .map(Self::row_to_line)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Cart {
            id: CartId(cart_id),
            user_id: *user_id,
            lines,
        }))
    }

    async fn save(&self, cart: Cart) -> Result<Cart, CartError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        // One cart per user; a concurrent insert keeps the stored id
        sqlx::query(
            r#"
            INSERT INTO carts (id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(cart.id.0)
        .bind(cart.user_id.0)
        .execute(&mut *tx)
        .await
        .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        let stored_id: Uuid = sqlx::query("SELECT id FROM carts WHERE user_id = $1")
            .bind(cart.user_id.0)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| CartError::DatabaseError(e.to_string()))?
            .try_get("id")
            .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(stored_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        for line in &cart.lines {
            sqlx::query(
                r#"
                INSERT INTO cart_items (cart_id, item_id, quantity)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(stored_id)
            .bind(line.item.id.0)
            .bind(i64::from(line.quantity))
            .execute(&mut *tx)
            .await
            .map_err(|e| CartError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        Ok(Cart {
            id: CartId(stored_id),
            ..cart
        })
    }
}
