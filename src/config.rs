use std::path::PathBuf;

/// TCGplayer category id for Pokémon on tcgcsv.com.
pub const CATEGORY_ID: u32 = 3;

pub const TCGCSV_BASE: &str = "https://tcgcsv.com/tcgplayer";

/// Maximum number of records returned by a top/bottom movers request.
pub const TOP_MOVERS_LIMIT: usize = 15;

/// Default look-back window, in days, for price-change calculation.
pub const DEFAULT_CHANGE_WINDOW_DAYS: u32 = 7;

/// File name of the DuckDB database inside the cache directory.
pub const DB_FILE: &str = "tcgtracker.duckdb";

/// URL of the group (set) listing for the configured category.
pub fn groups_url() -> String {
    format!("{}/{}/groups", TCGCSV_BASE, CATEGORY_ID)
}

/// URL of the products-and-prices CSV for a single group.
pub fn products_csv_url(group_id: i64) -> String {
    format!("{}/{}/{}/ProductsAndPrices.csv", TCGCSV_BASE, CATEGORY_ID, group_id)
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("tcgtracker-sdk")
    } else {
        PathBuf::from(".tcgtracker-sdk-cache")
    }
}
