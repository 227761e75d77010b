//! Shared test fixtures for the tracker SDK integration tests.
//!
//! Provides `setup_sample_db()` which opens a `Connection` backed by a
//! temporary cache directory and loads small sample tables (`products`,
//! `price_history`, `price_change`) via NDJSON temp files.

use std::io::Write;
use std::time::Duration;

use tcgtracker_sdk::{CacheManager, Connection};
use tempfile::NamedTempFile;

/// Create a `Connection` backed by a temporary cache directory, with no
/// tables loaded.
///
/// Returns `(Connection, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test so the cache directory
/// (and the DuckDB file inside it) is not deleted prematurely.
pub fn setup_empty_db() -> (Connection, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(
        Some(tmp_dir.path().to_path_buf()),
        true,
        Duration::from_secs(30),
    )
    .unwrap();
    let conn = Connection::new(cache).unwrap();
    (conn, tmp_dir)
}

/// Connection with standard sample data loaded into all three tables.
pub fn setup_sample_db() -> (Connection, tempfile::TempDir) {
    let (conn, tmp_dir) = setup_empty_db();
    register_products(&conn);
    register_price_history(&conn);
    register_price_change(&conn);
    (conn, tmp_dir)
}

/// Register a `price_change` table with `n` rows of strictly decreasing
/// price as `product_id` grows: product `i` has `current_price = n - i`,
/// `price_change = i`, `percentage_change = i * 10`.
pub fn register_price_change_rows(conn: &Connection, n: usize) {
    let rows: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "product_id": i as i64 + 1,
                "current_price": (n - i) as f64,
                "price_change": i as f64,
                "percentage_change": i as f64 * 10.0,
            })
        })
        .collect();
    register_table(conn, "price_change", &rows);
}

/// Create an empty `price_change` table with the production schema.
pub fn register_empty_price_change(conn: &Connection) {
    conn.run_batch(
        "CREATE OR REPLACE TABLE price_change (
             product_id BIGINT,
             current_price DOUBLE,
             price_change DOUBLE,
             percentage_change DOUBLE
         )",
    )
    .unwrap();
}

fn register_products(conn: &Connection) {
    let products = vec![
        serde_json::json!({
            "product_id": 101,
            "group_id": 604,
            "name": "Charizard ex",
            "clean_name": "Charizard ex",
            "image_url": "https://example.com/101.jpg",
            "url": "https://example.com/product/101",
            "sub_type_name": "Holofoil"
        }),
        serde_json::json!({
            "product_id": 102,
            "group_id": 604,
            "name": "Pikachu",
            "clean_name": "Pikachu",
            "image_url": "https://example.com/102.jpg",
            "url": "https://example.com/product/102",
            "sub_type_name": "Normal"
        }),
        serde_json::json!({
            "product_id": 103,
            "group_id": 823,
            "name": "Blastoise",
            "clean_name": "Blastoise",
            "image_url": null,
            "url": "https://example.com/product/103",
            "sub_type_name": "Normal"
        }),
    ];

    register_table(conn, "products", &products);
}

fn register_price_history(conn: &Connection) {
    let history = vec![
        serde_json::json!({"product_id": 101, "sub_type_name": "Holofoil", "date_point": "2026-08-16", "market_price": 8.0}),
        serde_json::json!({"product_id": 101, "sub_type_name": "Holofoil", "date_point": "2026-08-20", "market_price": 9.0}),
        serde_json::json!({"product_id": 101, "sub_type_name": "Holofoil", "date_point": "2026-08-23", "market_price": 10.0}),
        serde_json::json!({"product_id": 102, "sub_type_name": "Normal", "date_point": "2026-08-22", "market_price": 5.0}),
        serde_json::json!({"product_id": 103, "sub_type_name": "Normal", "date_point": "2026-08-10", "market_price": 3.0}),
        serde_json::json!({"product_id": 103, "sub_type_name": "Normal", "date_point": "2026-08-21", "market_price": 4.0}),
    ];

    register_table(conn, "price_history", &history);
}

fn register_price_change(conn: &Connection) {
    let changes = vec![
        serde_json::json!({"product_id": 101, "current_price": 10.0, "price_change": 2.0, "percentage_change": 25.0}),
        serde_json::json!({"product_id": 102, "current_price": 5.0, "price_change": null, "percentage_change": null}),
        serde_json::json!({"product_id": 103, "current_price": 4.0, "price_change": 1.0, "percentage_change": 33.33}),
    ];

    register_table(conn, "price_change", &changes);
}

/// Write a slice of JSON values as NDJSON to a temp file and register it
/// as a DuckDB table via `Connection::register_table_from_ndjson`.
pub fn register_table(conn: &Connection, table_name: &str, rows: &[serde_json::Value]) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    conn.register_table_from_ndjson(table_name, path).unwrap();
    // NamedTempFile is dropped here, but DuckDB has already read the data
    // into a table, so this is fine.
}
