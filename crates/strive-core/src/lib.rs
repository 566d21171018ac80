pub mod accounts;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod goals;
pub mod habits;
pub mod models;
pub mod todos;
pub mod traits;
pub mod validation;

#[cfg(test)]
mod testutil;

pub use accounts::{AccountService, Registration};
pub use auth::{AuthConfig, TokenKind, TokenPair, TokenService};
pub use dashboard::{Dashboard, DashboardService};
pub use error::AppError;
pub use goals::GoalService;
pub use habits::HabitService;
pub use models::{AuthUser, Goal, Habit, Todo, User};
pub use todos::TodoService;
pub use traits::{GoalStore, HabitStore, TodoStore, UserStore};
