//! `SQLite` implementation of the campaign repository.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use dialer_core::domain::{Pacing, WeeklySchedule};
use dialer_core::utils::timestamp::{self, format_datetime};
use dialer_core::{
    Campaign, CampaignFilter, CampaignRepository, CampaignStatus, NewCampaign, Page, PageRequest,
    RepositoryError, Scope,
};

use super::row_mappers::{
    WhereClause, format_time, map_sqlx_error, parse_stored_datetime, parse_stored_time, push_page,
    storage_error, to_page, to_u8, to_u32,
};

const CAMPAIGN_COLUMNS: &str = "id, campaign_code, name, description, callerid, status, \
    startingdate, expirationdate, daily_start_time, daily_stop_time, \
    monday, tuesday, wednesday, thursday, friday, saturday, sunday, \
    frequency, callmaxduration, maxretry, intervalretry, calltimeout, \
    aleg_gateway_id, voipapp_id, extra_data, user_id, created_date, updated_date";

/// `SQLite` implementation of the campaign repository.
pub struct SqliteCampaignRepository {
    pool: SqlitePool,
}

impl SqliteCampaignRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal row types for database queries
// ─────────────────────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct CampaignRow {
    id: i64,
    campaign_code: String,
    name: String,
    description: String,
    callerid: String,
    status: i64,
    startingdate: String,
    expirationdate: String,
    daily_start_time: String,
    daily_stop_time: String,
    monday: bool,
    tuesday: bool,
    wednesday: bool,
    thursday: bool,
    friday: bool,
    saturday: bool,
    sunday: bool,
    frequency: i64,
    callmaxduration: i64,
    maxretry: i64,
    intervalretry: i64,
    calltimeout: i64,
    aleg_gateway_id: Option<i64>,
    voipapp_id: Option<i64>,
    extra_data: String,
    user_id: i64,
    created_date: String,
    updated_date: String,
}

impl CampaignRow {
    fn into_campaign(self) -> Result<Campaign, RepositoryError> {
        let status = CampaignStatus::try_from(to_u8(self.status, "status")?)
            .map_err(RepositoryError::Serialization)?;

        Ok(Campaign {
            id: self.id,
            campaign_code: self.campaign_code,
            name: self.name,
            description: self.description,
            callerid: self.callerid,
            status,
            startingdate: parse_stored_datetime(&self.startingdate, "startingdate")?,
            expirationdate: parse_stored_datetime(&self.expirationdate, "expirationdate")?,
            daily_start_time: parse_stored_time(&self.daily_start_time, "daily_start_time")?,
            daily_stop_time: parse_stored_time(&self.daily_stop_time, "daily_stop_time")?,
            schedule: WeeklySchedule {
                monday: self.monday,
                tuesday: self.tuesday,
                wednesday: self.wednesday,
                thursday: self.thursday,
                friday: self.friday,
                saturday: self.saturday,
                sunday: self.sunday,
            },
            pacing: Pacing {
                frequency: to_u32(self.frequency, "frequency")?,
                callmaxduration: to_u32(self.callmaxduration, "callmaxduration")?,
                maxretry: to_u32(self.maxretry, "maxretry")?,
                intervalretry: to_u32(self.intervalretry, "intervalretry")?,
                calltimeout: to_u32(self.calltimeout, "calltimeout")?,
            },
            aleg_gateway_id: self.aleg_gateway_id,
            voipapp_id: self.voipapp_id,
            extra_data: self.extra_data,
            user_id: self.user_id,
            created_date: parse_stored_datetime(&self.created_date, "created_date")?,
            updated_date: parse_stored_datetime(&self.updated_date, "updated_date")?,
        })
    }
}

fn push_campaign_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &CampaignFilter) {
    let mut clause = WhereClause::new();
    clause.scope(qb, filter.scope);
    clause.name(qb, "name", filter.name.as_ref());
    if let Some(status) = filter.status {
        clause.equals(qb, "status", i64::from(u8::from(status)));
    }
}

fn push_scope(qb: &mut QueryBuilder<'_, Sqlite>, scope: Scope) {
    WhereClause::new().scope(qb, scope);
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CampaignRepository for SqliteCampaignRepository {
    async fn list(
        &self,
        filter: &CampaignFilter,
        page: PageRequest,
    ) -> Result<Page<Campaign>, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM campaigns");
        push_campaign_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let mut select =
            QueryBuilder::<Sqlite>::new(format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns"));
        push_campaign_filter(&mut select, filter);
        push_page(&mut select, page);
        let rows = select
            .build_query_as::<CampaignRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        let campaigns = rows
            .into_iter()
            .map(CampaignRow::into_campaign)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(to_page(campaigns, total, page))
    }

    async fn get_by_id(&self, id: i64) -> Result<Campaign, RepositoryError> {
        let query = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = ?");
        sqlx::query_as::<_, CampaignRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Campaign with ID {id}")))?
            .into_campaign()
    }

    async fn count_for_user(&self, user_id: i64) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM campaigns WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn name_exists(&self, user_id: i64, name: &str) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM campaigns WHERE user_id = ? AND name = ?)",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(exists)
    }

    async fn insert(&self, campaign: &NewCampaign) -> Result<Campaign, RepositoryError> {
        let now = timestamp::now();
        let schedule = &campaign.schedule;
        let pacing = &campaign.pacing;

        let result = sqlx::query(
            r#"
            INSERT INTO campaigns (
                campaign_code, name, description, callerid, status,
                startingdate, expirationdate, daily_start_time, daily_stop_time,
                monday, tuesday, wednesday, thursday, friday, saturday, sunday,
                frequency, callmaxduration, maxretry, intervalretry, calltimeout,
                aleg_gateway_id, voipapp_id, extra_data, user_id, created_date, updated_date
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&campaign.campaign_code)
        .bind(&campaign.name)
        .bind(&campaign.description)
        .bind(&campaign.callerid)
        .bind(i64::from(u8::from(campaign.status)))
        .bind(format_datetime(&campaign.startingdate))
        .bind(format_datetime(&campaign.expirationdate))
        .bind(format_time(campaign.daily_start_time))
        .bind(format_time(campaign.daily_stop_time))
        .bind(schedule.monday)
        .bind(schedule.tuesday)
        .bind(schedule.wednesday)
        .bind(schedule.thursday)
        .bind(schedule.friday)
        .bind(schedule.saturday)
        .bind(schedule.sunday)
        .bind(i64::from(pacing.frequency))
        .bind(i64::from(pacing.callmaxduration))
        .bind(i64::from(pacing.maxretry))
        .bind(i64::from(pacing.intervalretry))
        .bind(i64::from(pacing.calltimeout))
        .bind(campaign.aleg_gateway_id)
        .bind(campaign.voipapp_id)
        .bind(&campaign.extra_data)
        .bind(campaign.user_id)
        .bind(format_datetime(&now))
        .bind(format_datetime(&now))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(
                e,
                &format!("campaign '{}' ({})", campaign.name, campaign.campaign_code),
            )
        })?;

        Ok(Campaign {
            id: result.last_insert_rowid(),
            campaign_code: campaign.campaign_code.clone(),
            name: campaign.name.clone(),
            description: campaign.description.clone(),
            callerid: campaign.callerid.clone(),
            status: campaign.status,
            startingdate: campaign.startingdate,
            expirationdate: campaign.expirationdate,
            daily_start_time: campaign.daily_start_time,
            daily_stop_time: campaign.daily_stop_time,
            schedule: campaign.schedule,
            pacing: campaign.pacing,
            aleg_gateway_id: campaign.aleg_gateway_id,
            voipapp_id: campaign.voipapp_id,
            extra_data: campaign.extra_data.clone(),
            user_id: campaign.user_id,
            created_date: now,
            updated_date: now,
        })
    }

    async fn update(&self, campaign: &Campaign) -> Result<(), RepositoryError> {
        let schedule = &campaign.schedule;
        let pacing = &campaign.pacing;

        let result = sqlx::query(
            r#"
            UPDATE campaigns SET
                name = ?, description = ?, callerid = ?, status = ?,
                startingdate = ?, expirationdate = ?, daily_start_time = ?, daily_stop_time = ?,
                monday = ?, tuesday = ?, wednesday = ?, thursday = ?,
                friday = ?, saturday = ?, sunday = ?,
                frequency = ?, callmaxduration = ?, maxretry = ?,
                intervalretry = ?, calltimeout = ?,
                aleg_gateway_id = ?, voipapp_id = ?, extra_data = ?, updated_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&campaign.name)
        .bind(&campaign.description)
        .bind(&campaign.callerid)
        .bind(i64::from(u8::from(campaign.status)))
        .bind(format_datetime(&campaign.startingdate))
        .bind(format_datetime(&campaign.expirationdate))
        .bind(format_time(campaign.daily_start_time))
        .bind(format_time(campaign.daily_stop_time))
        .bind(schedule.monday)
        .bind(schedule.tuesday)
        .bind(schedule.wednesday)
        .bind(schedule.thursday)
        .bind(schedule.friday)
        .bind(schedule.saturday)
        .bind(schedule.sunday)
        .bind(i64::from(pacing.frequency))
        .bind(i64::from(pacing.callmaxduration))
        .bind(i64::from(pacing.maxretry))
        .bind(i64::from(pacing.intervalretry))
        .bind(i64::from(pacing.calltimeout))
        .bind(campaign.aleg_gateway_id)
        .bind(campaign.voipapp_id)
        .bind(&campaign.extra_data)
        .bind(format_datetime(&campaign.updated_date))
        .bind(campaign.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &format!("campaign '{}'", campaign.name)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Campaign with ID {}",
                campaign.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Campaign with ID {id}")));
        }
        Ok(())
    }

    async fn delete_all(&self, scope: Scope) -> Result<u64, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM campaigns");
        push_scope(&mut query, scope);
        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected())
    }
}
