use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/db-test
///
/// Connectivity probe: returns the database's current timestamp.
pub async fn db_test(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let rows = state
        .sdk
        .sql("SELECT CAST(now() AS VARCHAR) AS time", &[])
        .await
        .map_err(|e| AppError::internal(format!("Database error: {e}")))?;

    let time = rows
        .first()
        .and_then(|r| r.get("time"))
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();

    Ok(Json(json!({ "time": time })))
}
