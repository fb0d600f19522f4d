/// Post model and database operations
///
/// Posts are the service's content items: short bodies owned by a user.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE posts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     body VARCHAR(140) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A published post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID (UUID v4)
    pub id: Uuid,

    /// The author's user ID
    pub user_id: Uuid,

    /// Post body, at most 140 characters
    pub body: String,

    /// When the post was created
    pub created_at: DateTime<Utc>,

    /// When the post was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new post
#[derive(Debug, Clone)]
pub struct CreatePost {
    /// Author user ID (resolved by the authorization gate, not taken
    /// from the request body)
    pub user_id: Uuid,

    /// Post body, already validated and cleaned
    pub body: String,
}

/// Listing order for posts, by creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    #[default]
    Asc,

    /// Newest first
    Desc,
}

impl Post {
    /// Inserts a new post
    pub async fn create(pool: &PgPool, data: CreatePost) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, body)
            VALUES ($1, $2)
            RETURNING id, user_id, body, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.body)
        .fetch_one(pool)
        .await
    }

    /// Lists posts, optionally restricted to one author
    pub async fn list(
        pool: &PgPool,
        author_id: Option<Uuid>,
        order: SortOrder,
    ) -> Result<Vec<Self>, sqlx::Error> {
        // ORDER BY cannot be a bind parameter; both strings are fixed
        let query = match order {
            SortOrder::Asc => {
                r#"
                SELECT id, user_id, body, created_at, updated_at
                FROM posts
                WHERE ($1::uuid IS NULL OR user_id = $1)
                ORDER BY created_at ASC
                "#
            }
            SortOrder::Desc => {
                r#"
                SELECT id, user_id, body, created_at, updated_at
                FROM posts
                WHERE ($1::uuid IS NULL OR user_id = $1)
                ORDER BY created_at DESC
                "#
            }
        };

        sqlx::query_as::<_, Post>(query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Finds a post by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, body, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a post by ID
    ///
    /// Returns whether a row was removed. Ownership is the caller's
    /// check; this method deletes unconditionally.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
