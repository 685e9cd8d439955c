use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::PgStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// Names arrive already normalized; the store does not touch casing.
#[async_trait]
pub trait CategoryRepo: Send + Sync {
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>>;
    async fn get_category(&self, id: i32) -> anyhow::Result<Option<Category>>;
    async fn create_category(&self, name: &str) -> anyhow::Result<Category>;
    /// `None` when no category has `id`.
    async fn edit_category(&self, id: i32, name: &str) -> anyhow::Result<Option<Category>>;
    async fn delete_category(&self, id: i32) -> anyhow::Result<u64>;
}

#[async_trait]
impl CategoryRepo for PgStore {
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(r#"SELECT id, name FROM category ORDER BY id"#)
            .fetch_all(&self.pool)
            .await
            .context("list categories")?;
        Ok(rows)
    }

    async fn get_category(&self, id: i32) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(r#"SELECT id, name FROM category WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("get category")?;
        Ok(row)
    }

    async fn create_category(&self, name: &str) -> anyhow::Result<Category> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO category (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .context("create category")?;
        Ok(row)
    }

    async fn edit_category(&self, id: i32, name: &str) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            UPDATE category
               SET name = $1
             WHERE id = $2
            RETURNING id, name
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("edit category")?;
        Ok(row)
    }

    async fn delete_category(&self, id: i32) -> anyhow::Result<u64> {
        let done = sqlx::query(r#"DELETE FROM category WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete category")?;
        Ok(done.rows_affected())
    }
}
