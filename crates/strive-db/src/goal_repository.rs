use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Pool, Postgres};
use strive_core::error::AppError;
use strive_core::models::{Goal, GoalInput};
use strive_core::traits::GoalStore;

/// Goal columns plus owner username and participant count.
const GOAL_SELECT: &str = r#"
    SELECT g.id, g.owner_id, u.username AS owner, g.name, g.description, g.end_date,
           g.location, g.is_public, g.created_at, g.updated_at,
           (SELECT COUNT(*) FROM goal_participants gp WHERE gp.goal_id = g.id) AS participant_count
    FROM goals g
    JOIN users u ON u.id = g.owner_id
"#;

/// Repository for goals and goal participation in PostgreSQL.
#[derive(Clone)]
pub struct GoalRepository {
    pool: Pool<Postgres>,
}

impl GoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by_id(&self, id: i64) -> Result<Option<Goal>, AppError> {
        let row = sqlx::query_as::<_, GoalRow>(&format!("{GOAL_SELECT} WHERE g.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn fetch_all_for_user(&self, filter: &str, user_id: i64) -> Result<Vec<Goal>, AppError> {
        let rows = sqlx::query_as::<_, GoalRow>(&format!(
            "{GOAL_SELECT} WHERE {filter} ORDER BY g.created_at DESC, g.id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct GoalRow {
    id: i64,
    owner_id: i64,
    owner: String,
    name: String,
    description: String,
    end_date: Option<NaiveDate>,
    location: String,
    is_public: bool,
    participant_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Goal {
            id: row.id,
            owner_id: row.owner_id,
            owner: row.owner,
            name: row.name,
            description: row.description,
            end_date: row.end_date,
            location: row.location,
            is_public: row.is_public,
            participant_count: row.participant_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl GoalStore for GoalRepository {
    async fn create_goal(&self, owner_id: i64, input: &GoalInput) -> Result<Goal, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO goals (owner_id, name, description, end_date, location, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.end_date)
        .bind(&input.location)
        .bind(input.is_public)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.fetch_one_by_id(id)
            .await?
            .ok_or_else(|| AppError::DatabaseError(format!("Goal {id} vanished after insert")))
    }

    async fn get_goal(&self, id: i64) -> Result<Option<Goal>, AppError> {
        self.fetch_one_by_id(id).await
    }

    async fn list_visible_goals(&self, user_id: i64) -> Result<Vec<Goal>, AppError> {
        self.fetch_all_for_user(
            r#"g.owner_id = $1
               OR g.is_public
               OR EXISTS (SELECT 1 FROM goal_participants gp WHERE gp.goal_id = g.id AND gp.user_id = $1)"#,
            user_id,
        )
        .await
    }

    async fn list_owned_goals(&self, owner_id: i64) -> Result<Vec<Goal>, AppError> {
        self.fetch_all_for_user("g.owner_id = $1", owner_id).await
    }

    async fn list_joined_goals(&self, user_id: i64) -> Result<Vec<Goal>, AppError> {
        self.fetch_all_for_user(
            "EXISTS (SELECT 1 FROM goal_participants gp WHERE gp.goal_id = g.id AND gp.user_id = $1)",
            user_id,
        )
        .await
    }

    async fn update_goal(&self, id: i64, input: &GoalInput) -> Result<Option<Goal>, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE goals
            SET name = $2, description = $3, end_date = $4, location = $5, is_public = $6,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.end_date)
        .bind(&input.location)
        .bind(input.is_public)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_one_by_id(id).await
    }

    async fn delete_goal(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM goals WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_participant(&self, goal_id: i64, user_id: i64) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"SELECT EXISTS (SELECT 1 FROM goal_participants WHERE goal_id = $1 AND user_id = $2)"#,
        )
        .bind(goal_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(exists)
    }

    async fn add_participant(&self, goal_id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO goal_participants (goal_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (goal_id, user_id) DO NOTHING
            "#,
        )
        .bind(goal_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_participant(&self, goal_id: i64, user_id: i64) -> Result<bool, AppError> {
        let result =
            sqlx::query(r#"DELETE FROM goal_participants WHERE goal_id = $1 AND user_id = $2"#)
                .bind(goal_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
