use super::{from_timestamp, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use rnf_core::{TokenPurpose, UserToken};

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "user_tokens";

/// One live token per user and purpose; issuing a new one replaces the old.
pub struct UserTokenRepository {
    pool: SqlitePool,
}

impl UserTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, token: &UserToken) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO user_tokens (user_id, purpose, token, expires_at)
              VALUES (?, ?, ?, ?)
              ON CONFLICT (user_id, purpose)
              DO UPDATE SET token = excluded.token, expires_at = excluded.expires_at
              "#,
        )
        .bind(token.user_id.to_string())
        .bind(token.purpose.as_str())
        .bind(&token.token)
        .bind(token.expires_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
    ) -> DbErrorResult<Option<UserToken>> {
        let row = sqlx::query(
            r#"
              SELECT user_id, purpose, token, expires_at
              FROM user_tokens
              WHERE user_id = ? AND purpose = ?
              "#,
        )
        .bind(user_id.to_string())
        .bind(purpose.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_token).transpose()
    }

    /// Remove and return the token in one statement, so it can be used once.
    pub async fn take(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
    ) -> DbErrorResult<Option<UserToken>> {
        Self::take_in(&self.pool, user_id, purpose).await
    }

    /// `take` against any executor, so it can join a transaction.
    pub async fn take_in<'e, E>(
        executor: E,
        user_id: Uuid,
        purpose: TokenPurpose,
    ) -> DbErrorResult<Option<UserToken>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
              DELETE FROM user_tokens
              WHERE user_id = ? AND purpose = ?
              RETURNING user_id, purpose, token, expires_at
              "#,
        )
        .bind(user_id.to_string())
        .bind(purpose.as_str())
        .fetch_optional(executor)
        .await?;

        row.map(map_token).transpose()
    }
}

fn map_token(row: SqliteRow) -> DbErrorResult<UserToken> {
    let user_id: String = row.try_get("user_id")?;
    let purpose: String = row.try_get("purpose")?;

    Ok(UserToken {
        user_id: parse_uuid(TABLE, &user_id)?,
        purpose: purpose
            .parse()
            .map_err(|e: rnf_core::CoreError| DbError::corrupt_row(TABLE, e.to_string()))?,
        token: row.try_get("token")?,
        expires_at: from_timestamp(TABLE, row.try_get("expires_at")?)?,
    })
}
