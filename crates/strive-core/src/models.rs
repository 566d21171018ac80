use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Lowest-urgency priority value. Priorities are ordinal: 1 is the most urgent.
pub const PRIORITY_LOW: i16 = 3;
pub const PRIORITY_MEDIUM: i16 = 2;
pub const PRIORITY_HIGH: i16 = 1;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// DTO for inserting a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        AuthUser {
            id: user.id,
            username: user.username,
        }
    }
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

/// A goal, owned by one user and joinable by others.
#[derive(Debug, Clone, Serialize)]
pub struct Goal {
    pub id: i64,
    pub owner_id: i64,
    /// Username of the owner.
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

/// Editable goal fields, used for create and full update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalInput {
    pub name: String,
    pub description: String,
    pub end_date: Option<NaiveDate>,
    pub location: String,
    pub is_public: bool,
}

/// Partial goal update. `end_date: Some(None)` clears the date.
#[derive(Debug, Clone, Default)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub end_date: Option<Option<NaiveDate>>,
    pub location: Option<String>,
    pub is_public: Option<bool>,
}

impl GoalPatch {
    /// Merge the patch over the current state of a goal.
    pub fn apply(self, current: &Goal) -> GoalInput {
        GoalInput {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            end_date: self.end_date.unwrap_or(current.end_date),
            location: self.location.unwrap_or_else(|| current.location.clone()),
            is_public: self.is_public.unwrap_or(current.is_public),
        }
    }
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
    pub priority: i16,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoInput {
    pub name: String,
    pub category: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
    pub priority: i16,
    pub completed: bool,
}

impl Default for TodoInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            description: String::new(),
            deadline: None,
            priority: PRIORITY_MEDIUM,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<Option<NaiveDate>>,
    pub priority: Option<i16>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn apply(self, current: &Todo) -> TodoInput {
        TodoInput {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            category: self.category.unwrap_or_else(|| current.category.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            deadline: self.deadline.unwrap_or(current.deadline),
            priority: self.priority.unwrap_or(current.priority),
            completed: self.completed.unwrap_or(current.completed),
        }
    }
}

/// Optional filters for listing to-dos.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    pub category: Option<String>,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        self.completed.is_none_or(|c| todo.completed == c)
            && self.category.as_deref().is_none_or(|c| todo.category == c)
    }
}

// ---------------------------------------------------------------------------
// Habits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Habit {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitInput {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl HabitPatch {
    pub fn apply(self, current: &Habit) -> HabitInput {
        HabitInput {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
        }
    }
}
