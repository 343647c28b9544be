use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::v1;

/// Create the full router with application state.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/users/v1", v1::create_users_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
