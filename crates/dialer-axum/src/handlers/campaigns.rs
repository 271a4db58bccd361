//! Campaign handlers - CRUD plus placing a call for a campaign.

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::Response;
use dialer_core::{CampaignInput, CampaignStatus, PageRequest, ResourceKind};
use serde::Deserialize;

use super::{created, name_filter};
use crate::auth::Caller;
use crate::dto::{CallResponseDto, CampaignDto, DialRequest, ListResponse};
use crate::error::HttpError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Query parameters for `GET /api/v1/campaign/`.
#[derive(Debug, Default, Deserialize)]
pub struct CampaignQuery {
    pub name: Option<String>,
    #[serde(rename = "name__contains", alias = "name__icontains")]
    pub name_contains: Option<String>,
    pub status: Option<u8>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// List campaigns visible to the caller.
pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiQuery(query): ApiQuery<CampaignQuery>,
) -> Result<Json<ListResponse<CampaignDto>>, HttpError> {
    let status = query
        .status
        .map(CampaignStatus::try_from)
        .transpose()
        .map_err(HttpError::BadRequest)?;
    let campaigns = state.core.campaigns();
    let page = campaigns
        .list(
            &caller.user,
            name_filter(query.name, query.name_contains),
            status,
            PageRequest::new(query.limit, query.offset),
        )
        .await?;
    let page = campaigns.expand(page).await?;
    Ok(Json(ListResponse::new(
        page,
        ResourceKind::Campaign,
        CampaignDto::from,
    )))
}

/// Get a single campaign by ID.
pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<CampaignDto>, HttpError> {
    let detail = state.core.campaigns().get_detail(&caller.user, id).await?;
    Ok(Json(detail.into()))
}

/// Create a campaign owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(input): ApiJson<CampaignInput>,
) -> Result<Response, HttpError> {
    let campaigns = state.core.campaigns();
    let campaign = campaigns.create(&caller.user, &input).await?;
    let detail = campaigns.get_detail(&caller.user, campaign.id).await?;
    Ok(created(
        ResourceKind::Campaign.uri(campaign.id),
        CampaignDto::from(detail),
    ))
}

/// Apply the supplied fields to an existing campaign.
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<CampaignInput>,
) -> Result<StatusCode, HttpError> {
    state
        .core
        .campaigns()
        .update(&caller.user, id, &input)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.campaigns().delete(&caller.user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every campaign visible to the caller.
pub async fn remove_all(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<StatusCode, HttpError> {
    state.core.campaigns().delete_all(&caller.user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Place one call to `phone_number` through the campaign's A-leg gateway.
pub async fn dial(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<DialRequest>,
) -> Result<Json<CallResponseDto>, HttpError> {
    let response = state
        .core
        .dispatch()
        .dial_for_campaign(&caller.user, id, &request.phone_number)
        .await?;
    Ok(Json(response.into()))
}
