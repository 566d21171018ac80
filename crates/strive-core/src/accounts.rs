use crate::auth::{INVALID_REFRESH, TokenKind, TokenPair, TokenService, hash_password, verify_password};
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::traits::UserStore;
use crate::validation::{validate_email, validate_password, validate_username};

pub const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

/// Registration request.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Registration, login, and token refresh.
#[derive(Clone)]
pub struct AccountService<U: UserStore> {
    users: U,
    tokens: TokenService,
}

impl<U: UserStore> AccountService<U> {
    pub fn new(users: U, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        let username = validate_username(&registration.username)?;
        let email = validate_email(&registration.email)?;
        validate_password(&registration.password)?;

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AppError::Conflict(
                "A user with that username already exists.".into(),
            ));
        }

        let password = registration.password;
        let password_hash = off_runtime(move || hash_password(&password)).await??;

        let user = self
            .users
            .create_user(&NewUser {
                username,
                email,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Exchange credentials for an access/refresh pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        let candidate = self
            .users
            .find_by_username(username)
            .await?
            .filter(|user| user.is_active);

        let verified = match &candidate {
            Some(user) => {
                let password = password.to_string();
                let password_hash = user.password_hash.clone();
                off_runtime(move || verify_password(&password, &password_hash)).await?
            }
            None => false,
        };

        let user = match candidate {
            Some(user) if verified => user,
            _ => {
                tracing::warn!(username, "Login failed");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
            }
        };

        let pair = self.tokens.issue_pair(&user)?;
        self.users.touch_last_login(user.id).await?;
        tracing::info!(user_id = user.id, "Login succeeded");
        Ok(pair)
    }

    /// Issue a new access token for a valid refresh token held by an active user.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let claims = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|_| AppError::Unauthorized(INVALID_REFRESH.into()))?;

        match self.users.find_by_id(claims.user_id).await? {
            Some(user) if user.is_active => self.tokens.issue_access(&user),
            _ => Err(AppError::Unauthorized(INVALID_REFRESH.into())),
        }
    }

    /// Mint a pair for an existing active user without a password check.
    pub async fn issue_for(&self, username: &str) -> Result<TokenPair, AppError> {
        match self.users.find_by_username(username).await? {
            Some(user) if user.is_active => self.tokens.issue_pair(&user),
            Some(_) => Err(AppError::Forbidden(format!("User '{username}' is inactive"))),
            None => Err(AppError::not_found("User")),
        }
    }
}

/// Run CPU-bound argon2 work on the blocking pool so it does not stall request handling.
async fn off_runtime<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Generic(format!("Password hashing task failed: {e}")))
}
