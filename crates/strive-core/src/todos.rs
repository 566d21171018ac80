use crate::error::AppError;
use crate::models::{Todo, TodoFilter, TodoInput, TodoPatch};
use crate::traits::TodoStore;
use crate::validation::validate_todo;

/// To-do CRUD. Another user's to-do is reported as missing.
#[derive(Clone)]
pub struct TodoService<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner_id: i64, filter: &TodoFilter) -> Result<Vec<Todo>, AppError> {
        self.store.list_todos(owner_id, filter).await
    }

    pub async fn create(&self, owner_id: i64, input: TodoInput) -> Result<Todo, AppError> {
        let input = validate_todo(input)?;
        let todo = self.store.create_todo(owner_id, &input).await?;
        tracing::info!(todo_id = todo.id, owner_id, "Todo created");
        Ok(todo)
    }

    pub async fn get(&self, owner_id: i64, id: i64) -> Result<Todo, AppError> {
        self.store
            .get_todo(id, owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Todo"))
    }

    pub async fn update(&self, owner_id: i64, id: i64, input: TodoInput) -> Result<Todo, AppError> {
        let input = validate_todo(input)?;
        self.store
            .update_todo(id, owner_id, &input)
            .await?
            .ok_or_else(|| AppError::not_found("Todo"))
    }

    pub async fn patch(&self, owner_id: i64, id: i64, patch: TodoPatch) -> Result<Todo, AppError> {
        let current = self.get(owner_id, id).await?;
        self.update(owner_id, id, patch.apply(&current)).await
    }

    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        if !self.store.delete_todo(id, owner_id).await? {
            return Err(AppError::not_found("Todo"));
        }
        Ok(())
    }
}
