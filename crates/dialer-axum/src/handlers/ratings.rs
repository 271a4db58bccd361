//! `mycampaign` and `rating` handlers: read-only campaign views that add a
//! fixed score and the requesting peer address.

use axum::Json;
use axum::extract::{Extension, State};
use dialer_core::ResourceKind;

use crate::auth::Caller;
use crate::dto::{ListResponse, MyCampaignDto, PageQuery, RatingDto};
use crate::error::HttpError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

fn request_ip(caller: &Caller) -> Option<String> {
    caller.ip.map(|ip| ip.to_string())
}

pub async fn list_mycampaigns(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ListResponse<MyCampaignDto>>, HttpError> {
    let page = state
        .core
        .campaigns()
        .list(&caller.user, None, None, query.page())
        .await?;
    let ip = request_ip(&caller);
    Ok(Json(ListResponse::new(page, ResourceKind::MyCampaign, |c| {
        MyCampaignDto::new(c, ip.clone())
    })))
}

pub async fn get_mycampaign(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MyCampaignDto>, HttpError> {
    let campaign = state.core.campaigns().get(&caller.user, id).await?;
    Ok(Json(MyCampaignDto::new(campaign, request_ip(&caller))))
}

pub async fn list_ratings(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ListResponse<RatingDto>>, HttpError> {
    let page = state
        .core
        .campaigns()
        .list(&caller.user, None, None, query.page())
        .await?;
    let ip = request_ip(&caller);
    Ok(Json(ListResponse::new(page, ResourceKind::Rating, |c| {
        RatingDto::new(c, ip.clone())
    })))
}

pub async fn get_rating(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<RatingDto>, HttpError> {
    let campaign = state.core.campaigns().get(&caller.user, id).await?;
    Ok(Json(RatingDto::new(campaign, request_ip(&caller))))
}
