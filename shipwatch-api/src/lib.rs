use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod logistics;
pub mod state;
pub mod sync;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    Router::new()
        .route("/v1/logistics/query", post(logistics::query_logistics))
        .route("/v1/sync/orders", get(sync::run_scheduled_sync))
        .route("/v1/sync/manual", post(sync::manual_sync))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
