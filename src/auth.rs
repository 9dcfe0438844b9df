//! Signup, login, and bearer-token session issuance.
//!
//! Tokens are HMAC-SHA256 signed, 30-day expiry.
//! Format: `v1:{user_id}:{expires_unix}:{hmac_hex}`, signed over everything
//! before the final `:`. Passwords are stored as `{salt_hex}${digest_hex}`
//! with a per-user random salt.

use crate::db::models::User;
use crate::error::{Result, TaskPulseError};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

type HmacSha256 = Hmac<Sha256>;

pub const TOKEN_TTL_DAYS: i64 = 30;
const TOKEN_VERSION: &str = "v1";
const MIN_PASSWORD_LEN: usize = 6;

// ─── Passwords ────────────────────────────────────────────────────────────────

pub fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::random();
    hash_with_salt(&salt, password)
}

fn hash_with_salt(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    format!("{}${}", hex::encode(salt), hex::encode(hasher.finalize()))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, _)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    hash_with_salt(&salt, password) == stored
}

// ─── Tokens ───────────────────────────────────────────────────────────────────

fn sign(payload: &str, secret: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|_| TaskPulseError::Auth("Invalid token secret".to_string()))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Issue a signed bearer token for `user_id`, expiring 30 days after `now`.
pub fn issue_token(user_id: i64, now: DateTime<Utc>, secret: &[u8]) -> Result<String> {
    let expires = (now + Duration::days(TOKEN_TTL_DAYS)).timestamp();
    let payload = format!("{TOKEN_VERSION}:{user_id}:{expires}");
    let sig = sign(&payload, secret)?;
    Ok(format!("{payload}:{sig}"))
}

/// Verify a token's signature and expiry; returns the encoded user id.
pub fn verify_token(token: &str, now: DateTime<Utc>, secret: &[u8]) -> Result<i64> {
    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() != 4 || parts[0] != TOKEN_VERSION {
        return Err(TaskPulseError::Auth("Malformed token".to_string()));
    }

    let payload = format!("{}:{}:{}", parts[0], parts[1], parts[2]);
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|_| TaskPulseError::Auth("Invalid token secret".to_string()))?;
    mac.update(payload.as_bytes());
    let sig = hex::decode(parts[3])
        .map_err(|_| TaskPulseError::Auth("Malformed token signature".to_string()))?;
    mac.verify_slice(&sig)
        .map_err(|_| TaskPulseError::Auth("Invalid token signature".to_string()))?;

    let expires = parts[2]
        .parse::<i64>()
        .map_err(|_| TaskPulseError::Auth("Malformed token expiry".to_string()))?;
    if expires <= now.timestamp() {
        return Err(TaskPulseError::Auth("Token expired".to_string()));
    }

    parts[1]
        .parse::<i64>()
        .map_err(|_| TaskPulseError::Auth("Malformed token subject".to_string()))
}

// ─── Manager ──────────────────────────────────────────────────────────────────

pub struct AuthManager<'a> {
    pool: &'a SqlitePool,
    secret: &'a [u8],
}

impl<'a> AuthManager<'a> {
    pub fn new(pool: &'a SqlitePool, secret: &'a [u8]) -> Self {
        Self { pool, secret }
    }

    /// Register a new user and issue a session token.
    pub async fn signup(&self, email: &str, password: &str) -> Result<(String, User)> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TaskPulseError::Validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&email)
        .bind(hash_password(password))
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await;

        let result = match result {
            Ok(r) => r,
            Err(e) if is_unique_violation(&e) => {
                return Err(TaskPulseError::Validation("User already exists".to_string()));
            },
            Err(e) => return Err(e.into()),
        };

        let user = self.get_user(result.last_insert_rowid()).await?;
        let token = issue_token(user.id, now, self.secret)?;
        tracing::info!(user_id = user.id, "user signed up");
        Ok((token, user))
    }

    /// Validate credentials and issue a session token.
    ///
    /// Unknown email and wrong password produce the same error, so the
    /// response does not leak which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
        let email = normalize_email(email)?;
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(&email)
        .fetch_optional(self.pool)
        .await?;

        let user = match user {
            Some(u) if verify_password(password, &u.password_hash) => u,
            _ => return Err(TaskPulseError::Auth("Invalid credentials".to_string())),
        };

        let token = issue_token(user.id, Utc::now(), self.secret)?;
        tracing::debug!(user_id = user.id, "user logged in");
        Ok((token, user))
    }

    /// Resolve a bearer token to its user.
    pub async fn authenticate(&self, token: &str, now: DateTime<Utc>) -> Result<User> {
        let user_id = verify_token(token, now, self.secret)?;

        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| TaskPulseError::Auth("User not found".to_string()))
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| TaskPulseError::Auth("User not found".to_string()))
    }
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    // Shape check only; deliverability is not this layer's problem
    let valid = email.len() >= 3
        && email.matches('@').count() == 1
        && !email.starts_with('@')
        && !email.ends_with('@');
    if !valid {
        return Err(TaskPulseError::Validation(
            "Please enter a valid email".to_string(),
        ));
    }
    Ok(email)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(
        e.as_database_error().map(|d| d.kind()),
        Some(sqlx::error::ErrorKind::UniqueViolation)
    )
}
