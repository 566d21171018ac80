use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{Goal, Habit, Todo, TodoFilter};
use crate::traits::{GoalStore, HabitStore, TodoStore, UserStore};

/// Everything the signed-in user owns or has joined.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub username: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
    pub goals: Vec<Goal>,
    pub joined_goals: Vec<Goal>,
    pub todos: Vec<Todo>,
    pub habits: Vec<Habit>,
    pub stats: DashboardStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub goals: usize,
    pub joined_goals: usize,
    pub todos_total: usize,
    pub todos_completed: usize,
    pub habits: usize,
}

/// Assembles a user's dashboard from the individual stores.
pub struct DashboardService<U, G, T, H> {
    users: U,
    goals: G,
    todos: T,
    habits: H,
}

impl<U, G, T, H> DashboardService<U, G, T, H>
where
    U: UserStore,
    G: GoalStore,
    T: TodoStore,
    H: HabitStore,
{
    pub fn new(users: U, goals: G, todos: T, habits: H) -> Self {
        Self {
            users,
            goals,
            todos,
            habits,
        }
    }

    pub async fn load(&self, user_id: i64) -> Result<Dashboard, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let goals = self.goals.list_owned_goals(user_id).await?;
        let joined_goals = self.goals.list_joined_goals(user_id).await?;
        let todos = self.todos.list_todos(user_id, &TodoFilter::default()).await?;
        let habits = self.habits.list_habits(user_id).await?;

        let stats = DashboardStats {
            goals: goals.len(),
            joined_goals: joined_goals.len(),
            todos_total: todos.len(),
            todos_completed: todos.iter().filter(|t| t.completed).count(),
            habits: habits.len(),
        };

        Ok(Dashboard {
            username: user.username,
            email: user.email,
            date_joined: user.date_joined,
            goals,
            joined_goals,
            todos,
            habits,
            stats,
        })
    }
}
