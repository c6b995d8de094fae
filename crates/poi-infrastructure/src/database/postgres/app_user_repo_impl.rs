// ============================================================================
// POI Infrastructure - PostgreSQL Application User Repository
// File: crates/poi-infrastructure/src/database/postgres/app_user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use poi_core::domain::{AppUser, UserRole};
use poi_core::error::DomainError;
use poi_core::repositories::AppUserRepository;

use super::{db_error, is_unique_violation};

pub struct PgAppUserRepository {
    pool: PgPool,
}

impl PgAppUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppUserRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AppUserRow> for AppUser {
    fn from(row: AppUserRow) -> Self {
        AppUser {
            id: row.id,
            organization_id: row.organization_id,
            username: row.username,
            email: row.email,
            phone: row.phone,
            role: UserRole::from_str(&row.role).unwrap_or_default(),
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

fn write_error(user: &AppUser) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e: sqlx::Error| {
        error!("Database error writing user: {}", e);
        let msg = e.to_string();
        if is_unique_violation(&e) {
            if msg.contains("email") {
                DomainError::EmailAlreadyExists(user.email.clone().unwrap_or_default())
            } else {
                DomainError::UsernameAlreadyExists(user.username.clone())
            }
        } else {
            DomainError::DatabaseError(msg)
        }
    }
}

#[async_trait]
impl AppUserRepository for PgAppUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AppUser>, DomainError> {
        let row: Option<AppUserRow> = sqlx::query_as(
            r#"
            SELECT id, organization_id, username, email, phone, role, is_active, created_at
            FROM app_users
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError> {
        let row: Option<AppUserRow> = sqlx::query_as(
            r#"
            SELECT id, organization_id, username, email, phone, role, is_active, created_at
            FROM app_users
            WHERE username = $1
            "#
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by username"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AppUser>, DomainError> {
        let row: Option<AppUserRow> = sqlx::query_as(
            r#"
            SELECT id, organization_id, username, email, phone, role, is_active, created_at
            FROM app_users
            WHERE LOWER(email) = LOWER($1)
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by email"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<AppUser>, DomainError> {
        let rows: Vec<AppUserRow> = sqlx::query_as(
            r#"
            SELECT id, organization_id, username, email, phone, role, is_active, created_at
            FROM app_users
            ORDER BY username
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing users"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, user: &AppUser) -> Result<AppUser, DomainError> {
        info!("Creating user: {}", user.username);

        let row: AppUserRow = sqlx::query_as(
            r#"
            INSERT INTO app_users (id, organization_id, username, email, phone, role, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, organization_id, username, email, phone, role, is_active, created_at
            "#
        )
        .bind(user.id)
        .bind(user.organization_id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(user))?;

        Ok(row.into())
    }

    async fn update(&self, user: &AppUser) -> Result<AppUser, DomainError> {
        let row: Option<AppUserRow> = sqlx::query_as(
            r#"
            UPDATE app_users
            SET username = $2, email = $3, phone = $4, role = $5, is_active = $6
            WHERE id = $1
            RETURNING id, organization_id, username, email, phone, role, is_active, created_at
            "#
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(user))?;

        row.map(Into::into).ok_or(DomainError::UserNotFound(user.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM app_users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting user"))?;

        Ok(result.rows_affected() > 0)
    }
}
