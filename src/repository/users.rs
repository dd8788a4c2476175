//! User domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::user::{CreateUser, UpdateUser, User},
};

const USER_SELECT: &str = r#"
    SELECT u.*, ut.type_name AS type_name
    FROM users u
    JOIN user_types ut ON u.user_type_id = ut.id
"#;

impl Repository {
    /// List all users
    pub async fn users_list(&self) -> AppResult<Vec<User>> {
        let q = format!("{} ORDER BY u.last_name, u.first_name", USER_SELECT);
        let rows = sqlx::query_as::<_, User>(&q).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get user by ID
    pub async fn users_get_by_id(&self, id: i32) -> AppResult<User> {
        let q = format!("{} WHERE u.id = $1", USER_SELECT);
        sqlx::query_as::<_, User>(&q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchUser, format!("User {} not found", id)))
    }

    /// Get user by email (for authentication)
    pub async fn users_get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let q = format!("{} WHERE u.email = $1", USER_SELECT);
        let user = sqlx::query_as::<_, User>(&q)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Create user with an already-hashed password
    pub async fn users_create(&self, data: &CreateUser, password_hash: &str) -> AppResult<User> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO users (first_name, last_name, email, phone, password, user_type_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(password_hash)
        .bind(data.user_type_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Email {} already exists", data.email))
            }
            other => AppError::Database(other),
        })?;

        self.users_get_by_id(id).await
    }

    /// Update user (only the provided fields; password already hashed)
    pub async fn users_update(
        &self,
        id: i32,
        data: &UpdateUser,
        password_hash: Option<&str>,
    ) -> AppResult<User> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.first_name, "first_name");
        add_field!(data.last_name, "last_name");
        add_field!(data.email, "email");
        add_field!(data.phone, "phone");
        add_field!(password_hash, "password");
        add_field!(data.user_type_id, "user_type_id");

        if sets.is_empty() {
            return self.users_get_by_id(id).await;
        }

        let query = format!("UPDATE users SET {} WHERE id = ${}", sets.join(", "), idx);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.first_name);
        bind_field!(data.last_name);
        bind_field!(data.email);
        bind_field!(data.phone);
        bind_field!(password_hash);
        bind_field!(data.user_type_id);

        let result = builder.bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                ErrorCode::NoSuchUser,
                format!("User {} not found", id),
            ));
        }

        self.users_get_by_id(id).await
    }

    /// Delete user
    pub async fn users_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                ErrorCode::NoSuchUser,
                format!("User {} not found", id),
            ));
        }
        Ok(())
    }
}
