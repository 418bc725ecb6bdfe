//! Route definitions for the Mesa HTTP surface.
//!
//! API routes are mounted under `/api`; page routes sit at the root and
//! pass through the edge gate before any handler runs.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(session_routes())
        .merge(health_routes());

    let page_routes = page_routes().layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::gate::edge_gate,
    ));

    let cors = build_cors_layer(&state.config.server);

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_upgrade))
        .merge(page_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, guest login, refresh, logout.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/guest/login", post(handlers::auth::guest_login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// Session administration endpoints.
fn session_routes() -> Router<AppState> {
    Router::new().route(
        "/manage/sessions/revoke",
        post(handlers::session::revoke),
    )
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Page anchors guarded by the edge gate.
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/login", get(handlers::pages::login))
        .route("/refresh-token", get(handlers::pages::refresh_token))
        .route("/manage/dashboard", get(handlers::pages::manage_dashboard))
        .route("/manage/orders", get(handlers::pages::manage_orders))
        .route("/manage/accounts", get(handlers::pages::manage_accounts))
        .route("/guest/menu", get(handlers::pages::guest_menu))
        .route("/guest/orders", get(handlers::pages::guest_orders))
}
