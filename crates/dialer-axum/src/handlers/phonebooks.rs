//! Phonebook handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::Response;
use dialer_core::{CoreError, Page, PageRequest, Phonebook, PhonebookInput, ResourceKind};
use serde::Deserialize;

use super::{created, name_filter};
use crate::auth::Caller;
use crate::dto::{ListResponse, PhonebookDto, UserDto};
use crate::error::HttpError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Query parameters for `GET /api/v1/phonebook/`.
#[derive(Debug, Default, Deserialize)]
pub struct PhonebookQuery {
    pub name: Option<String>,
    #[serde(rename = "name__contains", alias = "name__icontains")]
    pub name_contains: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Resolve phonebook owners for nesting, once per distinct owner.
struct Owners<'a> {
    state: &'a AppState,
    caller: &'a Caller,
    seen: HashMap<i64, Option<UserDto>>,
}

impl<'a> Owners<'a> {
    fn new(state: &'a AppState, caller: &'a Caller) -> Self {
        Self {
            state,
            caller,
            seen: HashMap::new(),
        }
    }

    async fn dto(&mut self, phonebook: Phonebook) -> Result<PhonebookDto, HttpError> {
        let owner_id = phonebook.user_id;
        if !self.seen.contains_key(&owner_id) {
            let owner = if owner_id == self.caller.user.id {
                Some(self.caller.user.clone())
            } else {
                match self.state.core.users().get(&self.caller.user, owner_id).await {
                    Ok(user) => Some(user),
                    Err(CoreError::NotFound(_)) => None,
                    Err(e) => return Err(e.into()),
                }
            };
            self.seen.insert(owner_id, owner.map(UserDto::from));
        }
        let owner = self.seen.get(&owner_id).cloned().flatten();
        Ok(PhonebookDto::new(phonebook, owner))
    }
}

/// List phonebooks visible to the caller.
pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiQuery(query): ApiQuery<PhonebookQuery>,
) -> Result<Json<ListResponse<PhonebookDto>>, HttpError> {
    let page = state
        .core
        .phonebooks()
        .list(
            &caller.user,
            name_filter(query.name, query.name_contains),
            PageRequest::new(query.limit, query.offset),
        )
        .await?;

    let mut owners = Owners::new(&state, &caller);
    let mut objects = Vec::with_capacity(page.items.len());
    for phonebook in page.items {
        objects.push(owners.dto(phonebook).await?);
    }
    let page = Page {
        items: objects,
        total_count: page.total_count,
        limit: page.limit,
        offset: page.offset,
    };
    Ok(Json(ListResponse::new(
        page,
        ResourceKind::Phonebook,
        std::convert::identity,
    )))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PhonebookDto>, HttpError> {
    let phonebook = state.core.phonebooks().get(&caller.user, id).await?;
    let dto = Owners::new(&state, &caller).dto(phonebook).await?;
    Ok(Json(dto))
}

/// Create a phonebook owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(input): ApiJson<PhonebookInput>,
) -> Result<Response, HttpError> {
    let phonebook = state.core.phonebooks().create(&caller.user, &input).await?;
    let location = ResourceKind::Phonebook.uri(phonebook.id);
    let dto = Owners::new(&state, &caller).dto(phonebook).await?;
    Ok(created(location, dto))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<PhonebookInput>,
) -> Result<StatusCode, HttpError> {
    state
        .core
        .phonebooks()
        .update(&caller.user, id, &input)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.phonebooks().delete(&caller.user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every phonebook visible to the caller.
pub async fn remove_all(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<StatusCode, HttpError> {
    state.core.phonebooks().delete_all(&caller.user).await?;
    Ok(StatusCode::NO_CONTENT)
}
