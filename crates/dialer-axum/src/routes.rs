//! Route definitions and router construction.
//!
//! Every resource lives under `/api/v1/` in its trailing-slash form.
//! `/health` stays outside authentication.

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use dialer_core::API_PREFIX;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::require_basic_auth;
use crate::bootstrap::AxumContext;
use crate::handlers;
use crate::state::AppState;

/// Build all API routes without the `/api/v1` prefix.
///
/// Returned without `.with_state()`; the caller applies state and the
/// authentication layer before nesting.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Campaigns
        .route(
            "/campaign/",
            get(handlers::campaigns::list)
                .post(handlers::campaigns::create)
                .delete(handlers::campaigns::remove_all),
        )
        .route(
            "/campaign/{id}/",
            get(handlers::campaigns::get)
                .put(handlers::campaigns::update)
                .delete(handlers::campaigns::remove),
        )
        .route("/campaign/{id}/dial/", post(handlers::campaigns::dial))
        // Phonebooks
        .route(
            "/phonebook/",
            get(handlers::phonebooks::list)
                .post(handlers::phonebooks::create)
                .delete(handlers::phonebooks::remove_all),
        )
        .route(
            "/phonebook/{id}/",
            get(handlers::phonebooks::get)
                .put(handlers::phonebooks::update)
                .delete(handlers::phonebooks::remove),
        )
        // Gateways
        .route(
            "/gateway/",
            get(handlers::gateways::list)
                .post(handlers::gateways::create)
                .delete(handlers::gateways::remove_all),
        )
        .route(
            "/gateway/{id}/",
            get(handlers::gateways::get)
                .put(handlers::gateways::update)
                .delete(handlers::gateways::remove),
        )
        // VoIP applications
        .route(
            "/voipapp/",
            get(handlers::voip_apps::list)
                .post(handlers::voip_apps::create)
                .delete(handlers::voip_apps::remove_all),
        )
        .route(
            "/voipapp/{id}/",
            get(handlers::voip_apps::get)
                .put(handlers::voip_apps::update)
                .delete(handlers::voip_apps::remove),
        )
        // Users (read only)
        .route("/user/", get(handlers::users::list))
        .route("/user/{id}/", get(handlers::users::get))
        // Campaign views
        .route("/mycampaign/", get(handlers::ratings::list_mycampaigns))
        .route("/mycampaign/{id}/", get(handlers::ratings::get_mycampaign))
        .route("/rating/", get(handlers::ratings::list_ratings))
        .route("/rating/{id}/", get(handlers::ratings::get_rating))
}

/// Create the main Axum router.
///
/// # Path Parameter Syntax
/// Axum 0.8 uses brace syntax for path parameters: `{id}`
pub fn create_router(ctx: AxumContext) -> Router {
    let state: AppState = Arc::new(ctx);
    let auth = middleware::from_fn_with_state(state.clone(), require_basic_auth);

    Router::new()
        .route("/health", get(health_check))
        .nest(
            API_PREFIX,
            api_routes().route_layer(auth).with_state(state),
        )
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
