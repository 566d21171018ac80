use std::future::Future;

use crate::error::AppError;
use crate::models::{
    Goal, GoalInput, Habit, HabitInput, NewUser, Todo, TodoFilter, TodoInput, User,
};

/// Persists and looks up user accounts.
pub trait UserStore: Send + Sync + Clone {
    /// Insert a new user. Fails with [`AppError::Conflict`] if the username is taken.
    fn create_user(&self, user: &NewUser) -> impl Future<Output = Result<User, AppError>> + Send;

    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    /// Record a successful login.
    fn touch_last_login(&self, id: i64) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Persists goals and the user ↔ goal participation association.
///
/// Lookups by id are unscoped; visibility and ownership rules live in
/// [`crate::goals::GoalService`].
pub trait GoalStore: Send + Sync + Clone {
    fn create_goal(
        &self,
        owner_id: i64,
        input: &GoalInput,
    ) -> impl Future<Output = Result<Goal, AppError>> + Send;

    fn get_goal(&self, id: i64) -> impl Future<Output = Result<Option<Goal>, AppError>> + Send;

    /// Goals owned by, public to, or joined by `user_id`, newest first.
    fn list_visible_goals(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Vec<Goal>, AppError>> + Send;

    fn list_owned_goals(
        &self,
        owner_id: i64,
    ) -> impl Future<Output = Result<Vec<Goal>, AppError>> + Send;

    fn list_joined_goals(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Vec<Goal>, AppError>> + Send;

    fn update_goal(
        &self,
        id: i64,
        input: &GoalInput,
    ) -> impl Future<Output = Result<Option<Goal>, AppError>> + Send;

    /// Returns `false` if no goal with this id existed.
    fn delete_goal(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn is_participant(
        &self,
        goal_id: i64,
        user_id: i64,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// Returns `false` if the user had already joined.
    fn add_participant(
        &self,
        goal_id: i64,
        user_id: i64,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// Returns `false` if the user had not joined.
    fn remove_participant(
        &self,
        goal_id: i64,
        user_id: i64,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Persists to-dos. Every operation is scoped to the owner.
pub trait TodoStore: Send + Sync + Clone {
    fn create_todo(
        &self,
        owner_id: i64,
        input: &TodoInput,
    ) -> impl Future<Output = Result<Todo, AppError>> + Send;

    fn get_todo(
        &self,
        id: i64,
        owner_id: i64,
    ) -> impl Future<Output = Result<Option<Todo>, AppError>> + Send;

    /// Incomplete first, then by deadline (nulls last), priority, and id.
    fn list_todos(
        &self,
        owner_id: i64,
        filter: &TodoFilter,
    ) -> impl Future<Output = Result<Vec<Todo>, AppError>> + Send;

    fn update_todo(
        &self,
        id: i64,
        owner_id: i64,
        input: &TodoInput,
    ) -> impl Future<Output = Result<Option<Todo>, AppError>> + Send;

    fn delete_todo(
        &self,
        id: i64,
        owner_id: i64,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Persists habits. Every operation is scoped to the owner.
pub trait HabitStore: Send + Sync + Clone {
    fn create_habit(
        &self,
        owner_id: i64,
        input: &HabitInput,
    ) -> impl Future<Output = Result<Habit, AppError>> + Send;

    fn get_habit(
        &self,
        id: i64,
        owner_id: i64,
    ) -> impl Future<Output = Result<Option<Habit>, AppError>> + Send;

    /// Newest first.
    fn list_habits(&self, owner_id: i64)
    -> impl Future<Output = Result<Vec<Habit>, AppError>> + Send;

    fn update_habit(
        &self,
        id: i64,
        owner_id: i64,
        input: &HabitInput,
    ) -> impl Future<Output = Result<Option<Habit>, AppError>> + Send;

    fn delete_habit(
        &self,
        id: i64,
        owner_id: i64,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;
}
