use crate::error::AppError;
use crate::models::{Goal, GoalInput, GoalPatch};
use crate::traits::GoalStore;
use crate::validation::validate_goal;

pub const FORBIDDEN: &str = "You do not have permission to perform this action.";
pub const GOAL_JOINED: &str = "Goal successfully added to user.";
pub const GOAL_REMOVED: &str = "Goal successfully removed from user.";
pub const GOAL_NOT_JOINED: &str = "Goal is not associated with user.";

/// Goal CRUD plus participation, enforcing visibility and ownership.
///
/// A goal is visible to a user who owns it, joined it, or when it is public.
/// Only the owner may modify or delete it.
#[derive(Clone)]
pub struct GoalService<S: GoalStore> {
    store: S,
}

impl<S: GoalStore> GoalService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<Goal>, AppError> {
        self.store.list_visible_goals(user_id).await
    }

    pub async fn create(&self, owner_id: i64, input: GoalInput) -> Result<Goal, AppError> {
        let input = validate_goal(input)?;
        let goal = self.store.create_goal(owner_id, &input).await?;
        tracing::info!(goal_id = goal.id, owner_id, "Goal created");
        Ok(goal)
    }

    pub async fn get(&self, user_id: i64, id: i64) -> Result<Goal, AppError> {
        let goal = self
            .store
            .get_goal(id)
            .await?
            .ok_or_else(|| AppError::not_found("Goal"))?;
        if !self.is_visible(&goal, user_id).await? {
            return Err(AppError::not_found("Goal"));
        }
        Ok(goal)
    }

    pub async fn update(&self, user_id: i64, id: i64, input: GoalInput) -> Result<Goal, AppError> {
        self.get_owned(user_id, id).await?;
        let input = validate_goal(input)?;
        self.store
            .update_goal(id, &input)
            .await?
            .ok_or_else(|| AppError::not_found("Goal"))
    }

    pub async fn patch(&self, user_id: i64, id: i64, patch: GoalPatch) -> Result<Goal, AppError> {
        let current = self.get_owned(user_id, id).await?;
        let input = validate_goal(patch.apply(&current))?;
        self.store
            .update_goal(id, &input)
            .await?
            .ok_or_else(|| AppError::not_found("Goal"))
    }

    pub async fn delete(&self, user_id: i64, id: i64) -> Result<(), AppError> {
        self.get_owned(user_id, id).await?;
        if !self.store.delete_goal(id).await? {
            return Err(AppError::not_found("Goal"));
        }
        tracing::info!(goal_id = id, user_id, "Goal deleted");
        Ok(())
    }

    /// Associate the user with a goal they own or that is public.
    ///
    /// Joining twice is a no-op that still succeeds.
    pub async fn join(&self, user_id: i64, goal_id: i64) -> Result<(), AppError> {
        let goal = self
            .store
            .get_goal(goal_id)
            .await?
            .filter(|g| g.is_public || g.owner_id == user_id)
            .ok_or_else(|| AppError::not_found("Goal"))?;

        if self.store.add_participant(goal.id, user_id).await? {
            tracing::info!(goal_id, user_id, "User joined goal");
        } else {
            tracing::debug!(goal_id, user_id, "User already joined goal");
        }
        Ok(())
    }

    pub async fn remove(&self, user_id: i64, goal_id: i64) -> Result<(), AppError> {
        // Invisible goals are indistinguishable from missing ones.
        self.get(user_id, goal_id).await?;
        if !self.store.remove_participant(goal_id, user_id).await? {
            return Err(AppError::NotFound(GOAL_NOT_JOINED.into()));
        }
        tracing::info!(goal_id, user_id, "User left goal");
        Ok(())
    }

    async fn is_visible(&self, goal: &Goal, user_id: i64) -> Result<bool, AppError> {
        if goal.owner_id == user_id || goal.is_public {
            return Ok(true);
        }
        self.store.is_participant(goal.id, user_id).await
    }

    /// Visible but not owned is 403; invisible is 404.
    async fn get_owned(&self, user_id: i64, id: i64) -> Result<Goal, AppError> {
        let goal = self.get(user_id, id).await?;
        if goal.owner_id != user_id {
            return Err(AppError::Forbidden(FORBIDDEN.into()));
        }
        Ok(goal)
    }
}
