use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product — one sellable printing of a card (or sealed product)
// ---------------------------------------------------------------------------

/// Serializes as camelCase for the HTTP surface; the aliases let it
/// deserialize straight from snake_case database rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "product_id")]
    pub product_id: i64,
    #[serde(alias = "group_id")]
    pub group_id: i64,
    pub name: String,
    #[serde(default, alias = "clean_name")]
    pub clean_name: Option<String>,
    #[serde(default, alias = "image_url")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "sub_type_name")]
    pub sub_type_name: Option<String>,
}
