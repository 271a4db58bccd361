//! `SQLite` implementation of the VoIP application repository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use dialer_core::utils::timestamp::{self, format_datetime};
use dialer_core::{
    NewVoipApp, Page, PageRequest, RepositoryError, VoipApp, VoipAppRepository, VoipAppType,
};

use super::row_mappers::{map_sqlx_error, parse_stored_datetime, storage_error, to_page, to_u8};

const VOIP_APP_COLUMNS: &str = "id, name, description, app_type, data, created_date, updated_date";

pub struct SqliteVoipAppRepository {
    pool: SqlitePool,
}

impl SqliteVoipAppRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VoipAppRow {
    id: i64,
    name: String,
    description: String,
    app_type: i64,
    data: String,
    created_date: String,
    updated_date: String,
}

impl VoipAppRow {
    fn into_voip_app(self) -> Result<VoipApp, RepositoryError> {
        Ok(VoipApp {
            id: self.id,
            name: self.name,
            description: self.description,
            app_type: VoipAppType::try_from(to_u8(self.app_type, "app_type")?)
                .map_err(RepositoryError::Serialization)?,
            data: self.data,
            created_date: parse_stored_datetime(&self.created_date, "created_date")?,
            updated_date: parse_stored_datetime(&self.updated_date, "updated_date")?,
        })
    }
}

#[async_trait]
impl VoipAppRepository for SqliteVoipAppRepository {
    async fn list(&self, page: PageRequest) -> Result<Page<VoipApp>, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM voip_apps")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let query =
            format!("SELECT {VOIP_APP_COLUMNS} FROM voip_apps ORDER BY id LIMIT ? OFFSET ?");
        let rows = sqlx::query_as::<_, VoipAppRow>(&query)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        let apps = rows
            .into_iter()
            .map(VoipAppRow::into_voip_app)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(to_page(apps, total, page))
    }

    async fn get_by_id(&self, id: i64) -> Result<VoipApp, RepositoryError> {
        let query = format!("SELECT {VOIP_APP_COLUMNS} FROM voip_apps WHERE id = ?");
        sqlx::query_as::<_, VoipAppRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("VoIP application with ID {id}")))?
            .into_voip_app()
    }

    async fn insert(&self, app: &NewVoipApp) -> Result<VoipApp, RepositoryError> {
        let now = timestamp::now();
        let result = sqlx::query(
            r#"
            INSERT INTO voip_apps (name, description, app_type, data, created_date, updated_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&app.name)
        .bind(&app.description)
        .bind(i64::from(u8::from(app.app_type)))
        .bind(&app.data)
        .bind(format_datetime(&now))
        .bind(format_datetime(&now))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &format!("voip app '{}'", app.name)))?;

        Ok(VoipApp {
            id: result.last_insert_rowid(),
            name: app.name.clone(),
            description: app.description.clone(),
            app_type: app.app_type,
            data: app.data.clone(),
            created_date: now,
            updated_date: now,
        })
    }

    async fn update(&self, app: &VoipApp) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE voip_apps SET name = ?, description = ?, app_type = ?, data = ?, updated_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&app.name)
        .bind(&app.description)
        .bind(i64::from(u8::from(app.app_type)))
        .bind(&app.data)
        .bind(format_datetime(&app.updated_date))
        .bind(app.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &format!("voip app '{}'", app.name)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "VoIP application with ID {}",
                app.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM voip_apps WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "VoIP application with ID {id}"
            )));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM voip_apps")
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected())
    }
}
