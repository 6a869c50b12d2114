use sqlx::types::Json;
use sqlx::PgPool;

use crate::users::repo_types::User;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, favorites, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by id.
    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, favorites, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password and an empty favorites list.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, favorites)
            VALUES ($1, $2, $3, '[]'::jsonb)
            RETURNING id, username, email, password_hash, favorites, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Overwrite the favorites list for a user.
    pub async fn set_favorites(db: &PgPool, id: i64, favorites: &[String]) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET favorites = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Json(favorites))
        .execute(db)
        .await?;
        Ok(())
    }
}
