use crate::error::AppError;
use crate::models::{Habit, HabitInput, HabitPatch};
use crate::traits::HabitStore;
use crate::validation::validate_habit;

/// Habit CRUD, scoped to the owner.
#[derive(Clone)]
pub struct HabitService<S: HabitStore> {
    store: S,
}

impl<S: HabitStore> HabitService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner_id: i64) -> Result<Vec<Habit>, AppError> {
        self.store.list_habits(owner_id).await
    }

    pub async fn create(&self, owner_id: i64, input: HabitInput) -> Result<Habit, AppError> {
        let input = validate_habit(input)?;
        let habit = self.store.create_habit(owner_id, &input).await?;
        tracing::info!(habit_id = habit.id, owner_id, "Habit created");
        Ok(habit)
    }

    pub async fn get(&self, owner_id: i64, id: i64) -> Result<Habit, AppError> {
        self.store
            .get_habit(id, owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Habit"))
    }

    pub async fn update(
        &self,
        owner_id: i64,
        id: i64,
        input: HabitInput,
    ) -> Result<Habit, AppError> {
        let input = validate_habit(input)?;
        self.store
            .update_habit(id, owner_id, &input)
            .await?
            .ok_or_else(|| AppError::not_found("Habit"))
    }

    pub async fn patch(&self, owner_id: i64, id: i64, patch: HabitPatch) -> Result<Habit, AppError> {
        let current = self.get(owner_id, id).await?;
        self.update(owner_id, id, patch.apply(&current)).await
    }

    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        if !self.store.delete_habit(id, owner_id).await? {
            return Err(AppError::not_found("Habit"));
        }
        Ok(())
    }
}
