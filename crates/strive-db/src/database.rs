use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use strive_core::AppError;

use crate::config::DatabaseConfig;
use crate::goal_repository::GoalRepository;
use crate::habit_repository::HabitRepository;
use crate::todo_repository::TodoRepository;
use crate::user_repository::UserRepository;

/// Central database facade: owns the connection pool, runs migrations,
/// and vends repository instances.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {e}")))?;

        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn goal_repo(&self) -> GoalRepository {
        GoalRepository::new(self.pool.clone())
    }

    pub fn todo_repo(&self) -> TodoRepository {
        TodoRepository::new(self.pool.clone())
    }

    pub fn habit_repo(&self) -> HabitRepository {
        HabitRepository::new(self.pool.clone())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
