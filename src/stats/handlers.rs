use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::router::ENDPOINTS;
use crate::state::AppState;

const APPLICATION_NAME: &str = "Records API";
const RECENT_ACTIVITY_LIMIT: i64 = 10;

fn now() -> String {
    Utc::now().to_rfc3339()
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "Up & Running",
        "timestamp": now(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn system_info(State(state): State<Arc<AppState>>) -> Json<Value> {
    let database_status = match crate::db::ping(&state.db).await {
        Ok(()) => "Connected".to_string(),
        Err(e) => {
            tracing::warn!("Database connectivity check failed: {}", e);
            format!("Error: {}", e)
        }
    };

    Json(json!({
        "application": APPLICATION_NAME,
        "status": "running",
        "database_status": database_status,
        "timestamp": now(),
        "environment": state.config.environment,
        // Key name is part of the published response contract.
        "python_version": format!(
            "{} {} ({}/{})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH,
        ),
        "endpoints": ENDPOINTS,
    }))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let total_records = crate::db::count_records(&state.db).await?;
    let department_breakdown = crate::db::get_department_breakdown(&state.db).await?;
    let recent_activity = crate::db::get_recent_activity(&state.db, RECENT_ACTIVITY_LIMIT).await?;

    Ok(Json(json!({
        "status": "success",
        "total_records": total_records,
        "department_breakdown": department_breakdown,
        "recent_activity": recent_activity,
        "generated_at": now(),
    })))
}
