use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use strive_core::error::AppError;
use strive_core::models::{Habit, HabitInput};
use strive_core::traits::HabitStore;

/// Repository for habits in PostgreSQL. Every query is scoped by `owner_id`.
#[derive(Clone)]
pub struct HabitRepository {
    pool: Pool<Postgres>,
}

impl HabitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct HabitRow {
    id: i64,
    owner_id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HabitRow> for Habit {
    fn from(row: HabitRow) -> Self {
        Habit {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl HabitStore for HabitRepository {
    async fn create_habit(&self, owner_id: i64, input: &HabitInput) -> Result<Habit, AppError> {
        let row = sqlx::query_as::<_, HabitRow>(
            r#"
            INSERT INTO habits (owner_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn get_habit(&self, id: i64, owner_id: i64) -> Result<Option<Habit>, AppError> {
        let row = sqlx::query_as::<_, HabitRow>(
            r#"SELECT * FROM habits WHERE id = $1 AND owner_id = $2"#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list_habits(&self, owner_id: i64) -> Result<Vec<Habit>, AppError> {
        let rows = sqlx::query_as::<_, HabitRow>(
            r#"SELECT * FROM habits WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_habit(
        &self,
        id: i64,
        owner_id: i64,
        input: &HabitInput,
    ) -> Result<Option<Habit>, AppError> {
        let row = sqlx::query_as::<_, HabitRow>(
            r#"
            UPDATE habits
            SET name = $3, description = $4, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn delete_habit(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM habits WHERE id = $1 AND owner_id = $2"#)
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
