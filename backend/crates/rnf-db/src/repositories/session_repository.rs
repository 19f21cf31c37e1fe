use super::{from_timestamp, parse_uuid};
use crate::Result as DbErrorResult;

use rnf_core::Session;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "sessions";

pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, session: &Session) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO sessions (
                  token, user_id, security_stamp, created_at, expires_at, validated_at
              ) VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(&session.token)
        .bind(session.user_id.to_string())
        .bind(&session.security_stamp)
        .bind(session.created_at.timestamp())
        .bind(session.expires_at.timestamp())
        .bind(session.validated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find(&self, token: &str) -> DbErrorResult<Option<Session>> {
        let row = sqlx::query(
            r#"
              SELECT token, user_id, security_stamp, created_at, expires_at, validated_at
              FROM sessions
              WHERE token = ?
              "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_session).transpose()
    }

    /// Record a successful revalidation.
    pub async fn mark_validated(&self, token: &str, validated_at: DateTime<Utc>) -> DbErrorResult<()> {
        sqlx::query("UPDATE sessions SET validated_at = ? WHERE token = ?")
            .bind(validated_at.timestamp())
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, token: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_for_user(&self, user_id: Uuid) -> DbErrorResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_expired(&self, now: DateTime<Utc>) -> DbErrorResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now.timestamp())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_session(row: SqliteRow) -> DbErrorResult<Session> {
    let user_id: String = row.try_get("user_id")?;

    Ok(Session {
        token: row.try_get("token")?,
        user_id: parse_uuid(TABLE, &user_id)?,
        security_stamp: row.try_get("security_stamp")?,
        created_at: from_timestamp(TABLE, row.try_get("created_at")?)?,
        expires_at: from_timestamp(TABLE, row.try_get("expires_at")?)?,
        validated_at: from_timestamp(TABLE, row.try_get("validated_at")?)?,
    })
}
