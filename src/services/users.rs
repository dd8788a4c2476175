//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by email and password, returning a JWT token and the user
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users_get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Create JWT token for a user
    pub fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users_list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let hash = self.hash_password(&data.password)?;
        self.repository.users_create(data, &hash).await
    }

    pub async fn update(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let hash = match data.password.as_deref() {
            Some(password) => Some(self.hash_password(password)?),
            None => None,
        };
        self.repository.users_update(id, data, hash.as_deref()).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users_delete(id).await
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let stored = match user.password.as_deref() {
            Some(hash) => hash,
            None => return Ok(false),
        };
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AppError::Internal(format!("Invalid stored password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
