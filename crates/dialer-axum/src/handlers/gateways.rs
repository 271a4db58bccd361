//! Gateway handlers. Reads are open to every caller, writes need a
//! superuser.

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::Response;
use dialer_core::{GatewayInput, ResourceKind};

use super::created;
use crate::auth::Caller;
use crate::dto::{GatewayDto, ListResponse, PageQuery};
use crate::error::HttpError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ListResponse<GatewayDto>>, HttpError> {
    let page = state.core.gateways().list(query.page()).await?;
    Ok(Json(ListResponse::new(
        page,
        ResourceKind::Gateway,
        GatewayDto::from,
    )))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<GatewayDto>, HttpError> {
    Ok(Json(state.core.gateways().get(id).await?.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(input): ApiJson<GatewayInput>,
) -> Result<Response, HttpError> {
    let gateway = state.core.gateways().create(&caller.user, &input).await?;
    Ok(created(
        ResourceKind::Gateway.uri(gateway.id),
        GatewayDto::from(gateway),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<GatewayInput>,
) -> Result<StatusCode, HttpError> {
    state
        .core
        .gateways()
        .update(&caller.user, id, &input)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.gateways().delete(&caller.user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_all(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<StatusCode, HttpError> {
    state.core.gateways().delete_all(&caller.user).await?;
    Ok(StatusCode::NO_CONTENT)
}
