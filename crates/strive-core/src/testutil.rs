//! Test utilities: an in-memory implementation of every store trait.
//!
//! State lives behind `Arc<Mutex<_>>` so clones share it, the same way
//! repositories cloned from one pool see the same database.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::error::AppError;
use crate::models::{
    Goal, GoalInput, Habit, HabitInput, NewUser, Todo, TodoFilter, TodoInput, User,
};
use crate::traits::{GoalStore, HabitStore, TodoStore, UserStore};

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    users: BTreeMap<i64, User>,
    goals: BTreeMap<i64, Goal>,
    /// (goal_id, user_id)
    participants: BTreeSet<(i64, i64)>,
    todos: BTreeMap<i64, Todo>,
    habits: BTreeMap<i64, Habit>,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Fill in the derived columns a SQL join would produce.
    fn hydrate(&self, goal: &Goal) -> Goal {
        let mut goal = goal.clone();
        goal.owner = self
            .users
            .get(&goal.owner_id)
            .map(|u| u.username.clone())
            .unwrap_or_default();
        goal.participant_count = self
            .participants
            .iter()
            .filter(|(goal_id, _)| *goal_id == goal.id)
            .count() as i64;
        goal
    }

    fn newest_first<'a>(&self, goals: impl Iterator<Item = &'a Goal>) -> Vec<Goal> {
        let mut out: Vec<Goal> = goals.map(|g| self.hydrate(g)).collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        out
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an active user directly, bypassing registration.
    pub fn seed_user(&self, username: &str, password_hash: &str) -> User {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let user = User {
            id,
            username: username.to_string(),
            email: String::new(),
            password_hash: password_hash.to_string(),
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        };
        state.users.insert(id, user.clone());
        user
    }

    pub fn deactivate(&self, user_id: i64) {
        if let Some(user) = self.state.lock().unwrap().users.get_mut(&user_id) {
            user.is_active = false;
        }
    }

    pub fn goal_count(&self) -> usize {
        self.state.lock().unwrap().goals.len()
    }
}

impl UserStore for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(
                "A user with that username already exists.".into(),
            ));
        }
        let id = state.next_id();
        let created = User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        };
        state.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn touch_last_login(&self, id: i64) -> Result<(), AppError> {
        if let Some(user) = self.state.lock().unwrap().users.get_mut(&id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }
}

impl GoalStore for MemoryStore {
    async fn create_goal(&self, owner_id: i64, input: &GoalInput) -> Result<Goal, AppError> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = Utc::now();
        let goal = Goal {
            id,
            owner_id,
            owner: String::new(),
            name: input.name.clone(),
            description: input.description.clone(),
            end_date: input.end_date,
            location: input.location.clone(),
            is_public: input.is_public,
            participant_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.goals.insert(id, goal.clone());
        Ok(state.hydrate(&goal))
    }

    async fn get_goal(&self, id: i64) -> Result<Option<Goal>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.goals.get(&id).map(|g| state.hydrate(g)))
    }

    async fn list_visible_goals(&self, user_id: i64) -> Result<Vec<Goal>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.newest_first(state.goals.values().filter(|g| {
            g.owner_id == user_id || g.is_public || state.participants.contains(&(g.id, user_id))
        })))
    }

    async fn list_owned_goals(&self, owner_id: i64) -> Result<Vec<Goal>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.newest_first(state.goals.values().filter(|g| g.owner_id == owner_id)))
    }

    async fn list_joined_goals(&self, user_id: i64) -> Result<Vec<Goal>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.newest_first(
            state
                .goals
                .values()
                .filter(|g| state.participants.contains(&(g.id, user_id))),
        ))
    }

    async fn update_goal(&self, id: i64, input: &GoalInput) -> Result<Option<Goal>, AppError> {
        let mut state = self.state.lock().unwrap();
        let Some(goal) = state.goals.get_mut(&id) else {
            return Ok(None);
        };
        goal.name = input.name.clone();
        goal.description = input.description.clone();
        goal.end_date = input.end_date;
        goal.location = input.location.clone();
        goal.is_public = input.is_public;
        goal.updated_at = Utc::now();
        let goal = goal.clone();
        Ok(Some(state.hydrate(&goal)))
    }

    async fn delete_goal(&self, id: i64) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        state.participants.retain(|(goal_id, _)| *goal_id != id);
        Ok(state.goals.remove(&id).is_some())
    }

    async fn is_participant(&self, goal_id: i64, user_id: i64) -> Result<bool, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.participants.contains(&(goal_id, user_id)))
    }

    async fn add_participant(&self, goal_id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.participants.insert((goal_id, user_id)))
    }

    async fn remove_participant(&self, goal_id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.participants.remove(&(goal_id, user_id)))
    }
}

impl TodoStore for MemoryStore {
    async fn create_todo(&self, owner_id: i64, input: &TodoInput) -> Result<Todo, AppError> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = Utc::now();
        let todo = Todo {
            id,
            owner_id,
            name: input.name.clone(),
            category: input.category.clone(),
            description: input.description.clone(),
            deadline: input.deadline,
            priority: input.priority,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };
        state.todos.insert(id, todo.clone());
        Ok(todo)
    }

    async fn get_todo(&self, id: i64, owner_id: i64) -> Result<Option<Todo>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .todos
            .get(&id)
            .filter(|t| t.owner_id == owner_id)
            .cloned())
    }

    async fn list_todos(&self, owner_id: i64, filter: &TodoFilter) -> Result<Vec<Todo>, AppError> {
        let state = self.state.lock().unwrap();
        let mut todos: Vec<Todo> = state
            .todos
            .values()
            .filter(|t| t.owner_id == owner_id && filter.matches(t))
            .cloned()
            .collect();
        todos.sort_by_key(|t| (t.completed, t.deadline.is_none(), t.deadline, t.priority, t.id));
        Ok(todos)
    }

    async fn update_todo(
        &self,
        id: i64,
        owner_id: i64,
        input: &TodoInput,
    ) -> Result<Option<Todo>, AppError> {
        let mut state = self.state.lock().unwrap();
        let Some(todo) = state.todos.get_mut(&id).filter(|t| t.owner_id == owner_id) else {
            return Ok(None);
        };
        todo.name = input.name.clone();
        todo.category = input.category.clone();
        todo.description = input.description.clone();
        todo.deadline = input.deadline;
        todo.priority = input.priority;
        todo.completed = input.completed;
        todo.updated_at = Utc::now();
        Ok(Some(todo.clone()))
    }

    async fn delete_todo(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.todos.get(&id).is_some_and(|t| t.owner_id == owner_id) {
            state.todos.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

impl HabitStore for MemoryStore {
    async fn create_habit(&self, owner_id: i64, input: &HabitInput) -> Result<Habit, AppError> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = Utc::now();
        let habit = Habit {
            id,
            owner_id,
            name: input.name.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.habits.insert(id, habit.clone());
        Ok(habit)
    }

    async fn get_habit(&self, id: i64, owner_id: i64) -> Result<Option<Habit>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .habits
            .get(&id)
            .filter(|h| h.owner_id == owner_id)
            .cloned())
    }

    async fn list_habits(&self, owner_id: i64) -> Result<Vec<Habit>, AppError> {
        let state = self.state.lock().unwrap();
        let mut habits: Vec<Habit> = state
            .habits
            .values()
            .filter(|h| h.owner_id == owner_id)
            .cloned()
            .collect();
        habits.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(habits)
    }

    async fn update_habit(
        &self,
        id: i64,
        owner_id: i64,
        input: &HabitInput,
    ) -> Result<Option<Habit>, AppError> {
        let mut state = self.state.lock().unwrap();
        let Some(habit) = state.habits.get_mut(&id).filter(|h| h.owner_id == owner_id) else {
            return Ok(None);
        };
        habit.name = input.name.clone();
        habit.description = input.description.clone();
        habit.updated_at = Utc::now();
        Ok(Some(habit.clone()))
    }

    async fn delete_habit(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.habits.get(&id).is_some_and(|h| h.owner_id == owner_id) {
            state.habits.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}
