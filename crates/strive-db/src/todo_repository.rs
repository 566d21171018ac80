use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Pool, Postgres};
use strive_core::error::AppError;
use strive_core::models::{Todo, TodoFilter, TodoInput};
use strive_core::traits::TodoStore;

/// Repository for to-dos in PostgreSQL. Every query is scoped by `owner_id`.
#[derive(Clone)]
pub struct TodoRepository {
    pool: Pool<Postgres>,
}

impl TodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    owner_id: i64,
    name: String,
    category: String,
    description: String,
    deadline: Option<NaiveDate>,
    priority: i16,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            category: row.category,
            description: row.description,
            deadline: row.deadline,
            priority: row.priority,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TodoStore for TodoRepository {
    async fn create_todo(&self, owner_id: i64, input: &TodoInput) -> Result<Todo, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (owner_id, name, category, description, deadline, priority, completed)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.deadline)
        .bind(input.priority)
        .bind(input.completed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn get_todo(&self, id: i64, owner_id: i64) -> Result<Option<Todo>, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"SELECT * FROM todos WHERE id = $1 AND owner_id = $2"#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list_todos(&self, owner_id: i64, filter: &TodoFilter) -> Result<Vec<Todo>, AppError> {
        // NULL filter parameters match every row.
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT * FROM todos
            WHERE owner_id = $1
              AND ($2::boolean IS NULL OR completed = $2)
              AND ($3::varchar IS NULL OR category = $3)
            ORDER BY completed ASC, deadline ASC NULLS LAST, priority ASC, id ASC
            "#,
        )
        .bind(owner_id)
        .bind(filter.completed)
        .bind(filter.category.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_todo(
        &self,
        id: i64,
        owner_id: i64,
        input: &TodoInput,
    ) -> Result<Option<Todo>, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET name = $3, category = $4, description = $5, deadline = $6, priority = $7,
                completed = $8, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.deadline)
        .bind(input.priority)
        .bind(input.completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn delete_todo(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM todos WHERE id = $1 AND owner_id = $2"#)
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
