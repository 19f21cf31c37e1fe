use super::{from_timestamp, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use rnf_core::ApplicationUser;

use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "users";

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A second user with the same normalized email is rejected.
    pub async fn create(&self, user: &ApplicationUser) -> DbErrorResult<()> {
        let result = sqlx::query(
            r#"
              INSERT INTO users (
                  id, email, normalized_email, password_hash,
                  email_confirmed, security_stamp, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.normalized_email)
        .bind(&user.password_hash)
        .bind(user.email_confirmed)
        .bind(&user.security_stamp)
        .bind(user.created_at.timestamp())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DbError::DuplicateEmail {
                    email: user.email.clone(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<ApplicationUser>> {
        let row = sqlx::query(
            r#"
              SELECT id, email, normalized_email, password_hash,
                     email_confirmed, security_stamp, created_at
              FROM users
              WHERE id = ?
              "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_user).transpose()
    }

    pub async fn find_by_normalized_email(
        &self,
        normalized_email: &str,
    ) -> DbErrorResult<Option<ApplicationUser>> {
        let row = sqlx::query(
            r#"
              SELECT id, email, normalized_email, password_hash,
                     email_confirmed, security_stamp, created_at
              FROM users
              WHERE normalized_email = ?
              "#,
        )
        .bind(normalized_email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_user).transpose()
    }

    /// Mark the email confirmed. Returns false when the user does not exist.
    pub async fn confirm_email(&self, id: Uuid) -> DbErrorResult<bool> {
        Self::confirm_email_in(&self.pool, id).await
    }

    /// `confirm_email` against any executor, so it can join a transaction.
    pub async fn confirm_email_in<'e, E>(executor: E, id: Uuid) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("UPDATE users SET email_confirmed = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replace the password hash and security stamp in one statement.
    pub async fn update_credentials(
        &self,
        id: Uuid,
        password_hash: &str,
        security_stamp: &str,
    ) -> DbErrorResult<bool> {
        let result =
            sqlx::query("UPDATE users SET password_hash = ?, security_stamp = ? WHERE id = ?")
                .bind(password_hash)
                .bind(security_stamp)
                .bind(id.to_string())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_user(row: SqliteRow) -> DbErrorResult<ApplicationUser> {
    let id: String = row.try_get("id")?;

    Ok(ApplicationUser {
        id: parse_uuid(TABLE, &id)?,
        email: row.try_get("email")?,
        normalized_email: row.try_get("normalized_email")?,
        password_hash: row.try_get("password_hash")?,
        email_confirmed: row.try_get("email_confirmed")?,
        security_stamp: row.try_get("security_stamp")?,
        created_at: from_timestamp(TABLE, row.try_get("created_at")?)?,
    })
}
