//! Authentication service for user registration, login and token issuance

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::User;
use shared::validation::validate_username;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Input for registering a new user
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub surname: String,
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Input for logging in
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Response after a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

/// User row from the database
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    surname: String,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Register a new user account
    pub async fn register(&self, input: RegisterInput) -> AppResult<User> {
        input.validate().map_err(|e| AppError::Validation {
            field: "register".to_string(),
            message: e.to_string(),
            message_es: "Datos de registro inválidos".to_string(),
        })?;

        let username = input.username.trim().to_lowercase();
        let email = input.email.trim().to_lowercase();

        validate_username(&username).map_err(|msg| AppError::Validation {
            field: "username".to_string(),
            message: msg.to_string(),
            message_es: "Nombre de usuario inválido".to_string(),
        })?;

        // Reject duplicates before hashing
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE username = $1 OR email = $2",
        )
        .bind(&username)
        .bind(&email)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("username/email".to_string()));
        }

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))?;

        let user = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, surname, username, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, surname, username, email, password_hash, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.surname)
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(username = %user.username, "user registered");

        Ok(user.into())
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let username = input.username.trim().to_lowercase();

        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, surname, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(&username)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(&input.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.issue_token(&user)?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
            user: user.into(),
        })
    }

    fn issue_token(&self, user: &UserRow) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            name: user.name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("token signing failed: {}", e)))
    }
}

impl From<UserRow> for User {
    fn from(user: UserRow) -> Self {
        User {
            id: user.id,
            name: user.name,
            surname: user.surname,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
