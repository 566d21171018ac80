//! JWT access/refresh tokens and password hashing.

use std::fmt;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

pub const MIN_SECRET_LEN: usize = 32;
pub const DEFAULT_ACCESS_TTL_SECS: i64 = 5 * 60;
pub const DEFAULT_REFRESH_TTL_SECS: i64 = 24 * 60 * 60;

pub const INVALID_TOKEN: &str = "Given token not valid for any token type";
pub const INVALID_REFRESH: &str = "Token is invalid or expired";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Token signing configuration.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_ttl: TimeDelta,
    pub refresh_ttl: TimeDelta,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl AuthConfig {
    /// Build a config with default lifetimes.
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self, AppError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AppError::ConfigError(format!(
                "JWT secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }

        Ok(Self {
            jwt_secret,
            access_ttl: TimeDelta::seconds(DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl: TimeDelta::seconds(DEFAULT_REFRESH_TTL_SECS),
        })
    }

    /// Read configuration from environment variables.
    ///
    /// - `STRIVE_JWT_SECRET` (required, at least 32 bytes)
    /// - `STRIVE_ACCESS_TOKEN_TTL_SECS` (optional, defaults to 300)
    /// - `STRIVE_REFRESH_TOKEN_TTL_SECS` (optional, defaults to 86400)
    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var("STRIVE_JWT_SECRET").map_err(|_| {
            AppError::ConfigError("STRIVE_JWT_SECRET not set. Required to sign tokens.".into())
        })?;

        let mut config = Self::new(secret)?;
        if let Some(secs) = ttl_from_env("STRIVE_ACCESS_TOKEN_TTL_SECS")? {
            config.access_ttl = secs;
        }
        if let Some(secs) = ttl_from_env("STRIVE_REFRESH_TOKEN_TTL_SECS")? {
            config.refresh_ttl = secs;
        }
        Ok(config)
    }
}

fn ttl_from_env(var: &str) -> Result<Option<TimeDelta>, AppError> {
    match std::env::var(var) {
        Err(_) => Ok(None),
        Ok(raw) => {
            let secs: i64 = raw.parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid {var} '{raw}': must be a positive integer"))
            })?;
            if secs <= 0 {
                return Err(AppError::ConfigError(format!("{var} must be at least 1")));
            }
            Ok(Some(TimeDelta::seconds(secs)))
        }
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenKind,
    pub user_id: i64,
    pub username: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Signs and verifies HS256 tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: TimeDelta,
    refresh_ttl: TimeDelta,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        Ok(TokenPair {
            access: self.issue_at(user.id, &user.username, TokenKind::Access, now)?,
            refresh: self.issue_at(user.id, &user.username, TokenKind::Refresh, now)?,
        })
    }

    pub fn issue_access(&self, user: &User) -> Result<String, AppError> {
        self.issue_at(user.id, &user.username, TokenKind::Access, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            token_type: kind,
            user_id,
            username: username.to_string(),
            jti: Uuid::new_v4().simple().to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Generic(format!("Failed to encode token: {e}")))
    }

    /// Verify signature, expiry, and token type.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AppError::Unauthorized(INVALID_TOKEN.into())
            })?;

        if data.claims.token_type != expected {
            return Err(AppError::Unauthorized(INVALID_TOKEN.into()));
        }
        Ok(data.claims)
    }
}

// ---------------------------------------------------------------------------
// Passwords
// ---------------------------------------------------------------------------

/// Hash a password into an argon2 PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Generic(format!("Failed to hash password: {e}")))
}

/// Check a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            false
        }
    }
}
