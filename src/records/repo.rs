use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

use crate::db::PgStore;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// One logged set. Always owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Record {
    pub id: i32,
    pub weight: i32,
    pub reps: i32,
    pub rpe: i32,
    #[serde(with = "iso_date")]
    pub date_performed: Date,
    pub exercise_id: i32,
    pub user_id: i32,
}

/// Body of `POST /record/add`. The owner comes from the token, never the body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecord {
    pub weight: i32,
    pub reps: i32,
    pub rpe: i32,
    #[serde(with = "iso_date")]
    pub date_performed: Date,
    pub exercise_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordEdit {
    pub id: i32,
    pub weight: i32,
    pub reps: i32,
    pub rpe: i32,
}

pub const EDIT_REQUIRED: &[&str] = &["id", "weight", "reps", "rpe"];

/// Every method is scoped by `user_id`; rows of other users are invisible.
#[async_trait]
pub trait RecordRepo: Send + Sync {
    async fn list_records(&self, user_id: i32) -> anyhow::Result<Vec<Record>>;
    async fn get_record(&self, user_id: i32, id: i32) -> anyhow::Result<Option<Record>>;
    async fn create_record(&self, user_id: i32, new: &NewRecord) -> anyhow::Result<Record>;
    async fn edit_record(&self, user_id: i32, edit: &RecordEdit) -> anyhow::Result<Option<Record>>;
    async fn delete_record(&self, user_id: i32, id: i32) -> anyhow::Result<u64>;
}

#[async_trait]
impl RecordRepo for PgStore {
    async fn list_records(&self, user_id: i32) -> anyhow::Result<Vec<Record>> {
        let rows = sqlx::query_as::<_, Record>(
            r#"
            SELECT id, weight, reps, rpe, date_performed, exercise_id, user_id
              FROM user_entry
             WHERE user_id = $1
             ORDER BY date_performed DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("list records")?;
        Ok(rows)
    }

    async fn get_record(&self, user_id: i32, id: i32) -> anyhow::Result<Option<Record>> {
        let row = sqlx::query_as::<_, Record>(
            r#"
            SELECT id, weight, reps, rpe, date_performed, exercise_id, user_id
              FROM user_entry
             WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("get record")?;
        Ok(row)
    }

    async fn create_record(&self, user_id: i32, new: &NewRecord) -> anyhow::Result<Record> {
        let row = sqlx::query_as::<_, Record>(
            r#"
            INSERT INTO user_entry (weight, reps, rpe, date_performed, exercise_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, weight, reps, rpe, date_performed, exercise_id, user_id
            "#,
        )
        .bind(new.weight)
        .bind(new.reps)
        .bind(new.rpe)
        .bind(new.date_performed)
        .bind(new.exercise_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .context("create record")?;
        Ok(row)
    }

    async fn edit_record(&self, user_id: i32, edit: &RecordEdit) -> anyhow::Result<Option<Record>> {
        let row = sqlx::query_as::<_, Record>(
            r#"
            UPDATE user_entry
               SET weight = $1, reps = $2, rpe = $3
             WHERE id = $4 AND user_id = $5
            RETURNING id, weight, reps, rpe, date_performed, exercise_id, user_id
            "#,
        )
        .bind(edit.weight)
        .bind(edit.reps)
        .bind(edit.rpe)
        .bind(edit.id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("edit record")?;
        Ok(row)
    }

    async fn delete_record(&self, user_id: i32, id: i32) -> anyhow::Result<u64> {
        let done = sqlx::query(r#"DELETE FROM user_entry WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("delete record")?;
        Ok(done.rows_affected())
    }
}
