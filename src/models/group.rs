use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Group — a TCGplayer group (a card set / expansion)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: i64,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub published_on: Option<String>,
    #[serde(default)]
    pub modified_on: Option<String>,
}
