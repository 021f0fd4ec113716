use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String, // stored verbatim, not exposed in JSON
    pub age: i32,
}

impl User {
    /// Insert a new user row; the id is assigned by the database.
    pub async fn insert(
        db: &PgPool,
        username: &str,
        password: &str,
        age: i32,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password, age)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(username)
        .bind(password)
        .bind(age)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Find a user by exact username/password match. Usernames are not
    /// unique-constrained, so the first matching row wins.
    pub async fn find_by_credentials(
        db: &PgPool,
        username: &str,
        password: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, age
            FROM users
            WHERE username = $1 AND password = $2
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}
