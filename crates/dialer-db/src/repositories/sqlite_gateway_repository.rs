//! `SQLite` implementation of the gateway repository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use dialer_core::utils::timestamp::{self, format_datetime};
use dialer_core::{
    Gateway, GatewayRepository, GatewayStatus, NewGateway, Page, PageRequest, RepositoryError,
};

use super::row_mappers::{
    map_sqlx_error, parse_stored_datetime, storage_error, to_page, to_u8, to_u32,
};

const GATEWAY_COLUMNS: &str = "id, name, description, gateways, gateway_codecs, \
    gateway_timeouts, gateway_retries, maximum_call, status, created_date, updated_date";

pub struct SqliteGatewayRepository {
    pool: SqlitePool,
}

impl SqliteGatewayRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct GatewayRow {
    id: i64,
    name: String,
    description: String,
    gateways: String,
    gateway_codecs: String,
    gateway_timeouts: String,
    gateway_retries: String,
    maximum_call: Option<i64>,
    status: i64,
    created_date: String,
    updated_date: String,
}

impl GatewayRow {
    fn into_gateway(self) -> Result<Gateway, RepositoryError> {
        Ok(Gateway {
            id: self.id,
            name: self.name,
            description: self.description,
            gateways: self.gateways,
            gateway_codecs: self.gateway_codecs,
            gateway_timeouts: self.gateway_timeouts,
            gateway_retries: self.gateway_retries,
            maximum_call: self
                .maximum_call
                .map(|v| to_u32(v, "maximum_call"))
                .transpose()?,
            status: GatewayStatus::try_from(to_u8(self.status, "status")?)
                .map_err(RepositoryError::Serialization)?,
            created_date: parse_stored_datetime(&self.created_date, "created_date")?,
            updated_date: parse_stored_datetime(&self.updated_date, "updated_date")?,
        })
    }
}

#[async_trait]
impl GatewayRepository for SqliteGatewayRepository {
    async fn list(&self, page: PageRequest) -> Result<Page<Gateway>, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gateways")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let query = format!("SELECT {GATEWAY_COLUMNS} FROM gateways ORDER BY id LIMIT ? OFFSET ?");
        let rows = sqlx::query_as::<_, GatewayRow>(&query)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        let gateways = rows
            .into_iter()
            .map(GatewayRow::into_gateway)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(to_page(gateways, total, page))
    }

    async fn get_by_id(&self, id: i64) -> Result<Gateway, RepositoryError> {
        let query = format!("SELECT {GATEWAY_COLUMNS} FROM gateways WHERE id = ?");
        sqlx::query_as::<_, GatewayRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Gateway with ID {id}")))?
            .into_gateway()
    }

    async fn insert(&self, gateway: &NewGateway) -> Result<Gateway, RepositoryError> {
        let now = timestamp::now();
        let result = sqlx::query(
            r#"
            INSERT INTO gateways (
                name, description, gateways, gateway_codecs, gateway_timeouts,
                gateway_retries, maximum_call, status, created_date, updated_date
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&gateway.name)
        .bind(&gateway.description)
        .bind(&gateway.gateways)
        .bind(&gateway.gateway_codecs)
        .bind(&gateway.gateway_timeouts)
        .bind(&gateway.gateway_retries)
        .bind(gateway.maximum_call.map(i64::from))
        .bind(i64::from(u8::from(gateway.status)))
        .bind(format_datetime(&now))
        .bind(format_datetime(&now))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &format!("gateway '{}'", gateway.name)))?;

        Ok(Gateway {
            id: result.last_insert_rowid(),
            name: gateway.name.clone(),
            description: gateway.description.clone(),
            gateways: gateway.gateways.clone(),
            gateway_codecs: gateway.gateway_codecs.clone(),
            gateway_timeouts: gateway.gateway_timeouts.clone(),
            gateway_retries: gateway.gateway_retries.clone(),
            maximum_call: gateway.maximum_call,
            status: gateway.status,
            created_date: now,
            updated_date: now,
        })
    }

    async fn update(&self, gateway: &Gateway) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE gateways SET
                name = ?, description = ?, gateways = ?, gateway_codecs = ?,
                gateway_timeouts = ?, gateway_retries = ?, maximum_call = ?, status = ?,
                updated_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&gateway.name)
        .bind(&gateway.description)
        .bind(&gateway.gateways)
        .bind(&gateway.gateway_codecs)
        .bind(&gateway.gateway_timeouts)
        .bind(&gateway.gateway_retries)
        .bind(gateway.maximum_call.map(i64::from))
        .bind(i64::from(u8::from(gateway.status)))
        .bind(format_datetime(&gateway.updated_date))
        .bind(gateway.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &format!("gateway '{}'", gateway.name)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Gateway with ID {}",
                gateway.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM gateways WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Gateway with ID {id}")));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM gateways")
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected())
    }
}
