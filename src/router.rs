use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use crate::state::AppState;
use crate::{records, stats, ui};

/// Every routed path, as reported by `/system-info`.
pub const ENDPOINTS: &[&str] = &[
    "/health",
    "/system-info",
    "/",
    "/data",
    "/insert_record",
    "/create_table",
    "/stats",
    "/search",
    "/delete_record/{id}",
];

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(ui::index))
        // Monitoring
        .route("/health", get(stats::health_check))
        .route("/system-info", get(stats::system_info))
        .route("/stats", get(stats::get_stats))
        // Records
        .route("/create_table", get(records::create_table))
        .route("/insert_record", post(records::insert_record))
        .route("/data", get(records::get_data))
        .route("/search", get(records::search))
        .route("/delete_record/{id}", delete(records::delete_record))
        .fallback(crate::middleware::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(crate::middleware::panic_response))
                .layer(middleware::from_fn(crate::middleware::log_requests)),
        )
        .with_state(state)
}
