use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use strive_core::dashboard::DashboardStats;
use strive_core::models::{
    GoalInput, GoalPatch, HabitInput, HabitPatch, PRIORITY_MEDIUM, TodoFilter, TodoInput,
    TodoPatch,
};
use strive_core::{Dashboard, Goal, Habit, Todo, TokenPair, User};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: pair.access,
            refresh: pair.refresh,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            date_joined: user.date_joined,
        }
    }
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GoalRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// ISO date (`YYYY-MM-DD`); `null` for open-ended goals
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub is_public: bool,
}

impl From<GoalRequest> for GoalInput {
    fn from(req: GoalRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            end_date: req.end_date,
            location: req.location,
            is_public: req.is_public,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct GoalPatchRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<Option<NaiveDate>>,
    pub location: Option<String>,
    pub is_public: Option<bool>,
}

impl From<GoalPatchRequest> for GoalPatch {
    fn from(req: GoalPatchRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            end_date: req.end_date,
            location: req.location,
            is_public: req.is_public,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct GoalResponse {
    pub id: i64,
    pub owner_id: i64,
    pub owner: String,
    pub name: String,
    pub description: String,
    pub end_date: Option<NaiveDate>,
    pub location: String,
    pub is_public: bool,
    pub participant_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Goal> for GoalResponse {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id,
            owner_id: goal.owner_id,
            owner: goal.owner,
            name: goal.name,
            description: goal.description,
            end_date: goal.end_date,
            location: goal.location,
            is_public: goal.is_public,
            participant_count: goal.participant_count,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}

/// Body of the join/remove endpoints.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GoalMembershipRequest {
    /// Goal ID
    pub goal: Option<i64>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: &str) -> Self {
        Self {
            detail: detail.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

fn default_priority() -> i16 {
    PRIORITY_MEDIUM
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TodoRequest {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// 1 = high, 2 = medium, 3 = low
    #[serde(default = "default_priority")]
    pub priority: i16,
    #[serde(default)]
    pub completed: bool,
}

impl From<TodoRequest> for TodoInput {
    fn from(req: TodoRequest) -> Self {
        Self {
            name: req.name,
            category: req.category,
            description: req.description,
            deadline: req.deadline,
            priority: req.priority,
            completed: req.completed,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct TodoPatchRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, format = Date)]
    pub deadline: Option<Option<NaiveDate>>,
    pub priority: Option<i16>,
    pub completed: Option<bool>,
}

impl From<TodoPatchRequest> for TodoPatch {
    fn from(req: TodoPatchRequest) -> Self {
        Self {
            name: req.name,
            category: req.category,
            description: req.description,
            deadline: req.deadline,
            priority: req.priority,
            completed: req.completed,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TodoListQuery {
    pub completed: Option<bool>,
    pub category: Option<String>,
}

impl From<TodoListQuery> for TodoFilter {
    fn from(query: TodoListQuery) -> Self {
        Self {
            completed: query.completed,
            category: query.category,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TodoResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
    pub priority: i16,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            name: todo.name,
            category: todo.category,
            description: todo.description,
            deadline: todo.deadline,
            priority: todo.priority,
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Habits
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct HabitRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<HabitRequest> for HabitInput {
    fn from(req: HabitRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct HabitPatchRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<HabitPatchRequest> for HabitPatch {
    fn from(req: HabitPatchRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HabitResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Habit> for HabitResponse {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id,
            name: habit.name,
            description: habit.description,
            created_at: habit.created_at,
            updated_at: habit.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DashboardResponse {
    pub username: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
    pub goals: Vec<GoalResponse>,
    pub joined_goals: Vec<GoalResponse>,
    pub todos: Vec<TodoResponse>,
    pub habits: Vec<HabitResponse>,
    pub stats: DashboardStatsResponse,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DashboardStatsResponse {
    pub goals: usize,
    pub joined_goals: usize,
    pub todos_total: usize,
    pub todos_completed: usize,
    pub habits: usize,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            goals: stats.goals,
            joined_goals: stats.joined_goals,
            todos_total: stats.todos_total,
            todos_completed: stats.todos_completed,
            habits: stats.habits,
        }
    }
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            username: dashboard.username,
            email: dashboard.email,
            date_joined: dashboard.date_joined,
            goals: dashboard.goals.into_iter().map(GoalResponse::from).collect(),
            joined_goals: dashboard
                .joined_goals
                .into_iter()
                .map(GoalResponse::from)
                .collect(),
            todos: dashboard.todos.into_iter().map(TodoResponse::from).collect(),
            habits: dashboard
                .habits
                .into_iter()
                .map(HabitResponse::from)
                .collect(),
            stats: dashboard.stats.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}
