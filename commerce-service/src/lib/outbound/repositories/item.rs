use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::item::errors::ItemError;
use crate::item::models::Item;
use crate::item::models::ItemId;
use crate::item::ports::ItemRepository;

pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &PgRow) -> Result<Item, ItemError> {
        Ok(Item {
            id: ItemId(
                row.try_get("id")
                    .map_err(|e| ItemError::DatabaseError(e.to_string()))?,
            ),
            name: row
                .try_get("name")
                .map_err(|e| ItemError::DatabaseError(e.to_string()))?,
            description: row
                .try_get("description")
                .map_err(|e| ItemError::DatabaseError(e.to_string()))?,
            price_cents: row
                .try_get("price_cents")
                .map_err(|e| ItemError::DatabaseError(e.to_string()))?,
        })
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn list_all(&self) -> Result<Vec<Item>, ItemError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price_cents
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price_cents
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>, ItemError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price_cents
            FROM items
            WHERE name = $1
            ORDER BY id
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_item).collect()
    }
}
