use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/products/:product_id
///
/// Details for a single product.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let product = state.sdk.run(move |s| s.products().get(product_id)).await?;

    match product {
        Some(p) => Ok(Json(json!({ "data": p }))),
        None => Err(AppError::not_found("Product not found")),
    }
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /api/products/:product_id/history?from=2026-01-01&to=2026-08-01
///
/// Price history for the product, ordered by date, for chart rendering.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Value>, AppError> {
    let points = state
        .sdk
        .run(move |s| {
            s.prices()
                .history(product_id, params.from.as_deref(), params.to.as_deref())
        })
        .await?;

    let count = points.len();
    Ok(Json(json!({ "data": points, "count": count })))
}
