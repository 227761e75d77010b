use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tcgtracker_sdk::RankingRequest;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TopBottomParams {
    pub sort: Option<String>,
    pub column: Option<String>,
}

/// GET /api/price_change/top-bottom?sort=asc&column=percentage_change
///
/// Up to 15 price-change records ordered by the requested metric.
/// Unrecognized `column` or `sort` values fall back to descending by
/// current price; only a data-store failure produces an error response.
pub async fn top_bottom(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopBottomParams>,
) -> Result<Json<Value>, AppError> {
    let request = RankingRequest::resolve(params.column.as_deref(), params.sort.as_deref());

    let records = state
        .sdk
        .run(move |s| s.movers().top_bottom(&request))
        .await
        .map_err(|_| AppError::internal("Failed to fetch cards"))?;

    Ok(Json(json!(records)))
}

/// GET /api/cards/top-bottom?sort=asc&column=percentage_change
///
/// Same ranking, joined with product name and image for list rendering.
pub async fn top_bottom_cards(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopBottomParams>,
) -> Result<Json<Value>, AppError> {
    let request = RankingRequest::resolve(params.column.as_deref(), params.sort.as_deref());

    let cards = state
        .sdk
        .run(move |s| s.movers().top_bottom_cards(&request))
        .await
        .map_err(|_| AppError::internal("Failed to fetch cards"))?;

    Ok(Json(json!(cards)))
}
