//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use users_core::{User, UsersError, UsersResult};

const SELECT_BY_USERNAME: &str = r#"
    SELECT id, username, email, first_name, last_name, role, created_at, updated_at
    FROM users
    WHERE username = ?
"#;

/// MySQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct MySqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    role: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: Some(row.id),
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            role: row.role,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_username(&self, username: &str) -> UsersResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = sqlx::query_as::<_, UserRow>(SELECT_BY_USERNAME)
            .bind(username)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(User::from))
    }

    async fn save(&self, user: &User) -> UsersResult<User> {
        debug!("Saving user: {}", user.username);

        // The username is the natural key; the surrogate id is never rewritten
        sqlx::query(
            r#"
            INSERT INTO users (username, email, first_name, last_name, role)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                email = VALUES(email),
                first_name = VALUES(first_name),
                last_name = VALUES(last_name),
                role = VALUES(role)
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.role)
        .execute(self.pool.inner())
        .await?;

        let row = sqlx::query_as::<_, UserRow>(SELECT_BY_USERNAME)
            .bind(&user.username)
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::from).ok_or_else(|| {
            UsersError::Database(format!("User '{}' missing after save", user.username))
        })
    }

    async fn delete_by_username(&self, username: &str) -> UsersResult<bool> {
        debug!("Deleting user: {}", username);

        let result = sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
