//! VoIP application handlers. Reads are open to every caller, writes need
//! a superuser.

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::Response;
use dialer_core::{ResourceKind, VoipAppInput};

use super::created;
use crate::auth::Caller;
use crate::dto::{ListResponse, PageQuery, VoipAppDto};
use crate::error::HttpError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ListResponse<VoipAppDto>>, HttpError> {
    let page = state.core.voip_apps().list(query.page()).await?;
    Ok(Json(ListResponse::new(
        page,
        ResourceKind::VoipApp,
        VoipAppDto::from,
    )))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<VoipAppDto>, HttpError> {
    Ok(Json(state.core.voip_apps().get(id).await?.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(input): ApiJson<VoipAppInput>,
) -> Result<Response, HttpError> {
    let app = state.core.voip_apps().create(&caller.user, &input).await?;
    Ok(created(
        ResourceKind::VoipApp.uri(app.id),
        VoipAppDto::from(app),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<VoipAppInput>,
) -> Result<StatusCode, HttpError> {
    state
        .core
        .voip_apps()
        .update(&caller.user, id, &input)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.voip_apps().delete(&caller.user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_all(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<StatusCode, HttpError> {
    state.core.voip_apps().delete_all(&caller.user).await?;
    Ok(StatusCode::NO_CONTENT)
}
