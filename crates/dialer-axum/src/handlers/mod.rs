//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for one resource. Handlers are thin
//! wrappers that delegate to `AppCore` and convert results to DTOs.

pub mod campaigns;
pub mod gateways;
pub mod phonebooks;
pub mod ratings;
pub mod users;
pub mod voip_apps;

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use dialer_core::NameFilter;
use serde::Serialize;

/// `201 Created` with a `Location` header and the stored record.
pub(crate) fn created<T: Serialize>(location: String, body: T) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}

/// `?name=` matches exactly and wins over `?name__contains=`.
pub(crate) fn name_filter(exact: Option<String>, contains: Option<String>) -> Option<NameFilter> {
    exact
        .map(NameFilter::Exact)
        .or_else(|| contains.map(NameFilter::Contains))
}
