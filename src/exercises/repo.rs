use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::PgStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
}

#[async_trait]
pub trait ExerciseRepo: Send + Sync {
    async fn list_exercises(&self) -> anyhow::Result<Vec<Exercise>>;
    async fn get_exercise(&self, id: i32) -> anyhow::Result<Option<Exercise>>;
    /// Fails when `category_id` does not reference a category.
    async fn create_exercise(&self, name: &str, category_id: i32) -> anyhow::Result<Exercise>;
    async fn edit_exercise(
        &self,
        id: i32,
        name: &str,
        category_id: i32,
    ) -> anyhow::Result<Option<Exercise>>;
    async fn delete_exercise(&self, id: i32) -> anyhow::Result<u64>;
}

#[async_trait]
impl ExerciseRepo for PgStore {
    async fn list_exercises(&self) -> anyhow::Result<Vec<Exercise>> {
        let rows = sqlx::query_as::<_, Exercise>(
            r#"SELECT id, name, category_id FROM exercise ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .context("list exercises")?;
        Ok(rows)
    }

    async fn get_exercise(&self, id: i32) -> anyhow::Result<Option<Exercise>> {
        let row = sqlx::query_as::<_, Exercise>(
            r#"SELECT id, name, category_id FROM exercise WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("get exercise")?;
        Ok(row)
    }

    async fn create_exercise(&self, name: &str, category_id: i32) -> anyhow::Result<Exercise> {
        let row = sqlx::query_as::<_, Exercise>(
            r#"
            INSERT INTO exercise (name, category_id)
            VALUES ($1, $2)
            RETURNING id, name, category_id
            "#,
        )
        .bind(name)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .context("create exercise")?;
        Ok(row)
    }

    async fn edit_exercise(
        &self,
        id: i32,
        name: &str,
        category_id: i32,
    ) -> anyhow::Result<Option<Exercise>> {
        let row = sqlx::query_as::<_, Exercise>(
            r#"
            UPDATE exercise
               SET name = $1, category_id = $2
             WHERE id = $3
            RETURNING id, name, category_id
            "#,
        )
        .bind(name)
        .bind(category_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("edit exercise")?;
        Ok(row)
    }

    async fn delete_exercise(&self, id: i32) -> anyhow::Result<u64> {
        let done = sqlx::query(r#"DELETE FROM exercise WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete exercise")?;
        Ok(done.rows_affected())
    }
}
