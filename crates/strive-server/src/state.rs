use strive_core::{
    AccountService, DashboardService, GoalService, HabitService, TodoService, TokenService,
};
use strive_db::{Database, GoalRepository, HabitRepository, TodoRepository, UserRepository};

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenService) -> Self {
        Self { db, tokens }
    }

    pub fn accounts(&self) -> AccountService<UserRepository> {
        AccountService::new(self.db.user_repo(), self.tokens.clone())
    }

    pub fn goals(&self) -> GoalService<GoalRepository> {
        GoalService::new(self.db.goal_repo())
    }

    pub fn todos(&self) -> TodoService<TodoRepository> {
        TodoService::new(self.db.todo_repo())
    }

    pub fn habits(&self) -> HabitService<HabitRepository> {
        HabitService::new(self.db.habit_repo())
    }

    pub fn dashboard(
        &self,
    ) -> DashboardService<UserRepository, GoalRepository, TodoRepository, HabitRepository> {
        DashboardService::new(
            self.db.user_repo(),
            self.db.goal_repo(),
            self.db.todo_repo(),
            self.db.habit_repo(),
        )
    }
}
