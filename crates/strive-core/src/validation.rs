//! Input validation for accounts, goals, to-dos, and habits.
//!
//! Each `validate_*` function takes ownership of an input, trims its text
//! fields, and returns it if every field is within bounds.

use crate::error::AppError;
use crate::models::{GoalInput, HabitInput, PRIORITY_HIGH, PRIORITY_LOW, TodoInput};

pub const NAME_MAX_LEN: usize = 100;
pub const LOCATION_MAX_LEN: usize = 100;
pub const CATEGORY_MAX_LEN: usize = 50;
pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PASSWORD_MIN_LEN: usize = 8;

fn required(field: &str, value: String, max_len: usize) -> Result<String, AppError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field}: This field may not be blank.")));
    }
    bounded(field, value, max_len)
}

fn bounded(field: &str, value: String, max_len: usize) -> Result<String, AppError> {
    let value = value.trim().to_string();
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{field}: Ensure this field has no more than {max_len} characters."
        )));
    }
    Ok(value)
}

pub fn validate_goal(input: GoalInput) -> Result<GoalInput, AppError> {
    Ok(GoalInput {
        name: required("name", input.name, NAME_MAX_LEN)?,
        description: input.description.trim().to_string(),
        end_date: input.end_date,
        location: bounded("location", input.location, LOCATION_MAX_LEN)?,
        is_public: input.is_public,
    })
}

pub fn validate_todo(input: TodoInput) -> Result<TodoInput, AppError> {
    if !(PRIORITY_HIGH..=PRIORITY_LOW).contains(&input.priority) {
        return Err(AppError::Validation(format!(
            "priority: Ensure this value is between {PRIORITY_HIGH} and {PRIORITY_LOW}."
        )));
    }

    Ok(TodoInput {
        name: required("name", input.name, NAME_MAX_LEN)?,
        category: bounded("category", input.category, CATEGORY_MAX_LEN)?,
        description: input.description.trim().to_string(),
        deadline: input.deadline,
        priority: input.priority,
        completed: input.completed,
    })
}

pub fn validate_habit(input: HabitInput) -> Result<HabitInput, AppError> {
    Ok(HabitInput {
        name: required("name", input.name, NAME_MAX_LEN)?,
        description: input.description.trim().to_string(),
    })
}

/// Usernames may contain letters, digits and `@ . + - _`.
pub fn validate_username(username: &str) -> Result<String, AppError> {
    let username = required("username", username.to_string(), USERNAME_MAX_LEN)?;
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !valid {
        return Err(AppError::Validation(
            "username: Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .into(),
        ));
    }
    Ok(username)
}

pub fn validate_email(email: &str) -> Result<String, AppError> {
    let email = bounded("email", email.to_string(), EMAIL_MAX_LEN)?;
    if email.is_empty() {
        return Ok(email);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::Validation(
            "email: Enter a valid email address.".into(),
        )),
    }
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AppError::Validation(format!(
            "password: This password is too short. It must contain at least {PASSWORD_MIN_LEN} characters."
        )));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "password: This password is entirely numeric.".into(),
        ));
    }
    Ok(())
}
