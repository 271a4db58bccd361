//! `SQLite` implementation of the user repository.
//!
//! Accounts live in `users`; per-user dialer limits live in
//! `dialer_settings`, one optional row per user.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use dialer_core::utils::timestamp;
use dialer_core::{
    DialerSettings, NewUser, Page, PageRequest, RepositoryError, User, UserFilter, UserRepository,
};

use super::row_mappers::{map_sqlx_error, parse_stored_datetime, storage_error, to_page, to_u32};

const USER_COLUMNS: &str =
    "id, username, first_name, last_name, is_superuser, last_login, date_joined";

/// `SQLite` implementation of the user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal row types for database queries
// ─────────────────────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    first_name: String,
    last_name: String,
    is_superuser: bool,
    last_login: Option<String>,
    date_joined: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        Ok(User {
            id: self.id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            last_login: self
                .last_login
                .as_deref()
                .map(|s| parse_stored_datetime(s, "last_login"))
                .transpose()?,
            is_superuser: self.is_superuser,
            date_joined: parse_stored_datetime(&self.date_joined, "date_joined")?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

#[derive(sqlx::FromRow)]
struct DialerSettingsRow {
    max_number_campaign: i64,
    max_frequency: i64,
    callmaxduration: i64,
    maxretry: i64,
    max_calltimeout: i64,
}

impl DialerSettingsRow {
    fn into_settings(self) -> Result<DialerSettings, RepositoryError> {
        Ok(DialerSettings {
            max_number_campaign: to_u32(self.max_number_campaign, "max_number_campaign")?,
            max_frequency: to_u32(self.max_frequency, "max_frequency")?,
            callmaxduration: to_u32(self.callmaxduration, "callmaxduration")?,
            maxretry: to_u32(self.maxretry, "maxretry")?,
            max_calltimeout: to_u32(self.max_calltimeout, "max_calltimeout")?,
        })
    }
}

fn push_user_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &UserFilter) {
    if let Some(username) = &filter.username {
        qb.push(" WHERE username = ").push_bind(username.clone());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<User>, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users");
        push_user_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let mut select = QueryBuilder::<Sqlite>::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_user_filter(&mut select, filter);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(i64::from(page.limit))
            .push(" OFFSET ")
            .push_bind(i64::from(page.offset));
        let rows: Vec<UserRow> = select
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        let users = rows
            .into_iter()
            .map(UserRow::into_user)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(to_page(users, total, page))
    }

    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("User with ID {id}")))?;
        row.into_user()
    }

    async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError> {
        let row: UserRow =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error)?
                .ok_or_else(|| RepositoryError::NotFound(format!("User '{username}'")))?;
        row.into_user()
    }

    async fn credentials(&self, username: &str) -> Result<(User, String), RepositoryError> {
        let row: CredentialRow = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| RepositoryError::NotFound(format!("User '{username}'")))?;
        Ok((row.user.into_user()?, row.password_hash))
    }

    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let now = timestamp::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users
                (username, first_name, last_name, password_hash, is_superuser, date_joined)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.is_superuser)
        .bind(timestamp::format_datetime(&now))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &format!("user '{}'", user.username)))?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            last_login: None,
            is_superuser: user.is_superuser,
            date_joined: now,
        })
    }

    async fn touch_last_login(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(timestamp::format_datetime(&timestamp::now()))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("User with ID {id}")));
        }
        Ok(())
    }

    async fn dialer_settings(
        &self,
        user_id: i64,
    ) -> Result<Option<DialerSettings>, RepositoryError> {
        let row: Option<DialerSettingsRow> = sqlx::query_as(
            r#"
            SELECT max_number_campaign, max_frequency, callmaxduration, maxretry, max_calltimeout
            FROM dialer_settings WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(DialerSettingsRow::into_settings).transpose()
    }

    async fn save_dialer_settings(
        &self,
        user_id: i64,
        settings: &DialerSettings,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO dialer_settings
                (user_id, max_number_campaign, max_frequency, callmaxduration,
                 maxretry, max_calltimeout)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                max_number_campaign = excluded.max_number_campaign,
                max_frequency = excluded.max_frequency,
                callmaxduration = excluded.callmaxduration,
                maxretry = excluded.maxretry,
                max_calltimeout = excluded.max_calltimeout
            "#,
        )
        .bind(user_id)
        .bind(i64::from(settings.max_number_campaign))
        .bind(i64::from(settings.max_frequency))
        .bind(i64::from(settings.callmaxduration))
        .bind(i64::from(settings.maxretry))
        .bind(i64::from(settings.max_calltimeout))
        .execute(&self.pool)
        .await
        .map_err(|e| match map_sqlx_error(e, "dialer settings") {
            RepositoryError::Constraint(_) => {
                RepositoryError::NotFound(format!("User with ID {user_id}"))
            }
            other => other,
        })?;
        Ok(())
    }
}
