pub mod config;
pub mod database;
pub mod goal_repository;
pub mod habit_repository;
pub mod todo_repository;
pub mod user_repository;

pub use config::DatabaseConfig;
pub use database::Database;
pub use goal_repository::GoalRepository;
pub use habit_repository::HabitRepository;
pub use todo_repository::TodoRepository;
pub use user_repository::UserRepository;
