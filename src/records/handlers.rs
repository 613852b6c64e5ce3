use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::db::{self, NewRecord, RECORDS_TABLE, STATS_TABLE};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn create_table(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    db::init_db(&state.db).await?;

    tracing::info!("Database tables created successfully");
    Ok(Json(json!({
        "status": "success",
        "message": "Tables created successfully",
        "tables": [RECORDS_TABLE, STATS_TABLE],
    })))
}

#[derive(Debug, Deserialize)]
pub struct InsertRecordRequest {
    name: Option<String>,
    email: Option<String>,
    department: Option<String>,
}

pub async fn insert_record(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InsertRecordRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(payload) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    let name = match payload.name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ApiError::Validation("Name is required".to_string())),
    };

    let record = NewRecord::new(name, payload.email, payload.department);
    let record_id = db::insert_record(&state.db, &record).await?;

    tracing::info!("Record inserted successfully: {}", record.name);
    Ok(Json(json!({
        "status": "success",
        "message": "Record inserted successfully",
        "record_id": record_id,
    })))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_per_page")]
    per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    10
}

/// Ceiling of `total / per_page`; zero when `per_page` is not positive.
fn page_count(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 {
        return 0;
    }
    total / per_page + i64::from(total % per_page != 0)
}

pub async fn get_data(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(params) = query.map_err(|e| ApiError::Internal(e.body_text()))?;
    let offset = params.page.saturating_sub(1).saturating_mul(params.per_page);

    let total = db::count_records(&state.db).await?;
    let records = db::list_records(&state.db, params.per_page, offset).await?;

    Ok(Json(json!({
        "status": "success",
        "data": records,
        "pagination": {
            "page": params.page,
            "per_page": params.per_page,
            "total": total,
            "pages": page_count(total, params.per_page),
        },
    })))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<Value>> {
    let term = params.q.trim();
    if term.is_empty() {
        return Err(ApiError::Validation("Search query required".to_string()));
    }

    let results = db::search_records(&state.db, term).await?;

    Ok(Json(json!({
        "status": "success",
        "query": term,
        "count": results.len(),
        "results": results,
    })))
}

pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    // Non-integer ids do not name a route.
    let Path(id) = id.map_err(|_| ApiError::NotFound("Endpoint not found".to_string()))?;

    let Some(name) = db::delete_record(&state.db, id).await? else {
        return Err(ApiError::NotFound("Record not found".to_string()));
    };

    tracing::info!("Record deleted: {} (ID: {})", name, id);
    Ok(Json(json!({
        "status": "success",
        "message": format!("Record '{}' deleted successfully", name),
    })))
}
