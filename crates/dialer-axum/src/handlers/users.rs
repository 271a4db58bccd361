//! User handlers - read only.

use axum::Json;
use axum::extract::{Extension, State};
use dialer_core::{PageRequest, ResourceKind};
use serde::Deserialize;

use crate::auth::Caller;
use crate::dto::{ListResponse, UserDto};
use crate::error::HttpError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

/// Query parameters for `GET /api/v1/user/`. `username` matches exactly.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub username: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<ListResponse<UserDto>>, HttpError> {
    let page = state
        .core
        .users()
        .list(
            &caller.user,
            query.username,
            PageRequest::new(query.limit, query.offset),
        )
        .await?;
    Ok(Json(ListResponse::new(page, ResourceKind::User, UserDto::from)))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<UserDto>, HttpError> {
    Ok(Json(state.core.users().get(&caller.user, id).await?.into()))
}
