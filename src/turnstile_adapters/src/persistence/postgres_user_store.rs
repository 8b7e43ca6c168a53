use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres, Row, postgres::PgRow};
use turnstile_core::{
    Email, FullName, HashedPassword, ImageUrl, LoginIdentifier, ProfileUpdate, UserAccount,
    UserId, UserStore, UserStoreError, Username,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: sqlx::PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: UserAccount) -> Result<(), UserStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO users (
                    id, username, email, full_name, password_hash,
                    avatar, cover_image, refresh_token, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.username.as_ref())
        .bind(user.email.as_ref())
        .bind(user.full_name.as_ref())
        .bind(user.password_hash.as_ref().expose_secret().as_str())
        .bind(user.avatar.as_ref().map(|url| url.as_ref()))
        .bind(user.cover_image.as_ref().map(|url| url.as_ref()))
        .bind(user.refresh_token.as_ref().map(|t| t.expose_secret().as_str()))
        .bind(user.created_at)
        .bind(user.updated_at);

        query.execute(&self.pool).await.map_err(map_write_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user by identifier from PostgreSQL", skip_all)]
    async fn find_by_identifier(
        &self,
        identifier: &LoginIdentifier,
    ) -> Result<UserAccount, UserStoreError> {
        // A username match sorts ahead of an email match
        let query = sqlx::query(
            r#"
                SELECT id, username, email, full_name, password_hash,
                       avatar, cover_image, refresh_token, created_at, updated_at
                FROM users
                WHERE username = $1 OR email = $2
                ORDER BY (username = $1) DESC NULLS LAST
                LIMIT 1
            "#,
        )
        .bind(identifier.username().map(|u| u.as_ref()))
        .bind(identifier.email().map(|e| e.as_ref()));

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(UserStoreError::UserNotFound)?;

        account_from_row(&row)
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<UserAccount, UserStoreError> {
        let query = sqlx::query(
            r#"
                SELECT id, username, email, full_name, password_hash,
                       avatar, cover_image, refresh_token, created_at, updated_at
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid());

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(UserStoreError::UserNotFound)?;

        account_from_row(&row)
    }

    #[tracing::instrument(name = "Set refresh token", skip_all)]
    async fn set_refresh_token(
        &self,
        id: &UserId,
        refresh_token: Option<String>,
    ) -> Result<(), UserStoreError> {
        let query = sqlx::query(
            r#"
                UPDATE users
                SET refresh_token = $2, updated_at = now()
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(refresh_token);

        let result = query.execute(&self.pool).await.map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Rotate refresh token", skip_all)]
    async fn rotate_refresh_token(
        &self,
        id: &UserId,
        presented: &str,
        replacement: String,
    ) -> Result<(), UserStoreError> {
        let query = sqlx::query(
            r#"
                UPDATE users
                SET refresh_token = $3, updated_at = now()
                WHERE id = $1 AND refresh_token = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(presented)
        .bind(replacement);

        let result = query.execute(&self.pool).await.map_err(unexpected)?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;

        if exists {
            Err(UserStoreError::RefreshTokenMismatch)
        } else {
            Err(UserStoreError::UserNotFound)
        }
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: HashedPassword,
    ) -> Result<(), UserStoreError> {
        let query = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $2, updated_at = now()
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(password_hash.as_ref().expose_secret().as_str());

        let result = query.execute(&self.pool).await.map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Update user profile", skip_all)]
    async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserAccount, UserStoreError> {
        let query = sqlx::query(
            r#"
                UPDATE users
                SET full_name = COALESCE($2, full_name),
                    email = COALESCE($3, email),
                    avatar = COALESCE($4, avatar),
                    cover_image = COALESCE($5, cover_image),
                    updated_at = now()
                WHERE id = $1
                RETURNING id, username, email, full_name, password_hash,
                          avatar, cover_image, refresh_token, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(update.full_name.as_ref().map(|n| n.as_ref()))
        .bind(update.email.as_ref().map(|e| e.as_ref()))
        .bind(update.avatar.as_ref().map(|url| url.as_ref()))
        .bind(update.cover_image.as_ref().map(|url| url.as_ref()));

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or(UserStoreError::UserNotFound)?;

        account_from_row(&row)
    }
}

fn unexpected(e: sqlx::Error) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

fn map_write_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return UserStoreError::UserAlreadyExists;
        }
    }
    unexpected(e)
}

fn account_from_row(row: &PgRow) -> Result<UserAccount, UserStoreError> {
    let invalid = |e: turnstile_core::UserError| UserStoreError::UnexpectedError(e.to_string());

    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let username: String = row.try_get("username").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let full_name: String = row.try_get("full_name").map_err(unexpected)?;
    let password_hash: String = row.try_get("password_hash").map_err(unexpected)?;
    let avatar: Option<String> = row.try_get("avatar").map_err(unexpected)?;
    let cover_image: Option<String> = row.try_get("cover_image").map_err(unexpected)?;
    let refresh_token: Option<String> = row.try_get("refresh_token").map_err(unexpected)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(unexpected)?;

    Ok(UserAccount {
        id: UserId::from(id),
        username: Username::parse(&username).map_err(invalid)?,
        email: Email::parse(&email).map_err(invalid)?,
        full_name: FullName::parse(&full_name).map_err(invalid)?,
        password_hash: HashedPassword::new(Secret::from(password_hash)),
        avatar: avatar.as_deref().map(ImageUrl::parse).transpose().map_err(invalid)?,
        cover_image: cover_image
            .as_deref()
            .map(ImageUrl::parse)
            .transpose()
            .map_err(invalid)?,
        refresh_token: refresh_token.map(Secret::from),
        created_at,
        updated_at,
    })
}
