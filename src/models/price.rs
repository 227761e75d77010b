use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceChangeRecord — one product's current market state (query result)
// ---------------------------------------------------------------------------

/// Immutable snapshot of a row in the `price_change` table.
///
/// `price_change` and `percentage_change` are null when no comparison price
/// exists inside the look-back window (or the old price was zero).
/// Serializes as camelCase for the HTTP surface; the aliases let it
/// deserialize straight from snake_case database rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChangeRecord {
    #[serde(alias = "product_id")]
    pub product_id: i64,
    #[serde(alias = "current_price")]
    pub current_price: f64,
    #[serde(default, alias = "price_change")]
    pub price_change: Option<f64>,
    #[serde(default, alias = "percentage_change")]
    pub percentage_change: Option<f64>,
}

// ---------------------------------------------------------------------------
// CardMover — a price-change row joined with its product details
// ---------------------------------------------------------------------------

/// What the card-list view renders: the movers row plus name and image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMover {
    #[serde(alias = "product_id")]
    pub product_id: i64,
    pub name: String,
    #[serde(default, alias = "image_url")]
    pub image_url: Option<String>,
    #[serde(alias = "current_price")]
    pub current_price: f64,
    #[serde(default, alias = "price_change")]
    pub price_change: Option<f64>,
    #[serde(default, alias = "percentage_change")]
    pub percentage_change: Option<f64>,
}

// ---------------------------------------------------------------------------
// PricePoint — single price-history data point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    #[serde(alias = "product_id")]
    pub product_id: i64,
    #[serde(default, alias = "sub_type_name")]
    pub sub_type_name: Option<String>,
    pub date: String,
    #[serde(alias = "market_price")]
    pub market_price: f64,
}

// ---------------------------------------------------------------------------
// PriceTrend — aggregated price trend data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceTrend {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub avg_price: Option<f64>,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub data_points: i64,
}
