// Route definitions

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::AppState;

mod api;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/searcher", get(api::search_listings))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
