//! ETL change-calculation tests against a synthetic price history.

mod common;

use tcgtracker_sdk::etl::Etl;
use tcgtracker_sdk::Connection;

const AS_OF: &str = "2026-08-23";

fn history_row(
    product_id: i64,
    sub_type: &str,
    date: &str,
    price: f64,
) -> serde_json::Value {
    serde_json::json!({
        "product_id": product_id,
        "sub_type_name": sub_type,
        "date_point": date,
        "market_price": price,
    })
}

fn load_history(conn: &Connection, rows: &[serde_json::Value]) {
    common::register_table(conn, "price_history", rows);
}

fn change_rows(conn: &Connection) -> Vec<std::collections::HashMap<String, serde_json::Value>> {
    conn.execute(
        "SELECT product_id, sub_type_name, current_price, price_change, percentage_change
         FROM price_change ORDER BY product_id",
        &[],
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Basic window arithmetic
// ---------------------------------------------------------------------------

#[test]
fn computes_dollar_and_percent_change_over_window() {
    let (conn, _tmp) = common::setup_empty_db();
    load_history(
        &conn,
        &[
            history_row(1, "Normal", "2026-08-16", 8.0),
            history_row(1, "Normal", "2026-08-23", 10.0),
        ],
    );

    let count = Etl::new(&conn).calculate_changes(7, Some(AS_OF)).unwrap();
    assert_eq!(count, 1);

    let rows = change_rows(&conn);
    assert_eq!(rows[0]["current_price"].as_f64().unwrap(), 10.0);
    assert_eq!(rows[0]["price_change"].as_f64().unwrap(), 2.0);
    assert_eq!(rows[0]["percentage_change"].as_f64().unwrap(), 25.0);
}

#[test]
fn baseline_is_latest_price_at_or_before_cutoff() {
    let (conn, _tmp) = common::setup_empty_db();
    // Cutoff for a 7-day window as of 08-23 is 08-16. The 08-14 row is
    // nearer the cutoff than 08-01 and must win; 08-20 is inside the
    // window and must not.
    load_history(
        &conn,
        &[
            history_row(1, "Normal", "2026-08-01", 2.0),
            history_row(1, "Normal", "2026-08-14", 4.0),
            history_row(1, "Normal", "2026-08-20", 6.0),
            history_row(1, "Normal", "2026-08-23", 5.0),
        ],
    );

    Etl::new(&conn).calculate_changes(7, Some(AS_OF)).unwrap();

    let rows = change_rows(&conn);
    assert_eq!(rows[0]["current_price"].as_f64().unwrap(), 5.0);
    assert_eq!(rows[0]["price_change"].as_f64().unwrap(), 1.0); // 5.0 - 4.0
    assert_eq!(rows[0]["percentage_change"].as_f64().unwrap(), 25.0);
}

#[test]
fn percent_change_is_rounded_to_two_decimals() {
    let (conn, _tmp) = common::setup_empty_db();
    load_history(
        &conn,
        &[
            history_row(1, "Normal", "2026-08-16", 3.0),
            history_row(1, "Normal", "2026-08-23", 4.0),
        ],
    );

    Etl::new(&conn).calculate_changes(7, Some(AS_OF)).unwrap();

    let rows = change_rows(&conn);
    assert_eq!(rows[0]["percentage_change"].as_f64().unwrap(), 33.33);
}

// ---------------------------------------------------------------------------
// Null handling
// ---------------------------------------------------------------------------

#[test]
fn missing_baseline_yields_null_changes() {
    let (conn, _tmp) = common::setup_empty_db();
    load_history(&conn, &[history_row(1, "Normal", "2026-08-22", 5.0)]);

    Etl::new(&conn).calculate_changes(7, Some(AS_OF)).unwrap();

    let rows = change_rows(&conn);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["current_price"].as_f64().unwrap(), 5.0);
    assert!(rows[0]["price_change"].is_null());
    assert!(rows[0]["percentage_change"].is_null());
}

#[test]
fn zero_baseline_price_yields_null_percent() {
    let (conn, _tmp) = common::setup_empty_db();
    load_history(
        &conn,
        &[
            history_row(1, "Normal", "2026-08-10", 0.0),
            history_row(1, "Normal", "2026-08-23", 4.0),
        ],
    );

    Etl::new(&conn).calculate_changes(7, Some(AS_OF)).unwrap();

    let rows = change_rows(&conn);
    assert_eq!(rows[0]["price_change"].as_f64().unwrap(), 4.0);
    assert!(rows[0]["percentage_change"].is_null());
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

#[test]
fn prices_after_as_of_are_ignored() {
    let (conn, _tmp) = common::setup_empty_db();
    load_history(
        &conn,
        &[
            history_row(1, "Normal", "2026-08-16", 8.0),
            history_row(1, "Normal", "2026-08-23", 10.0),
            history_row(1, "Normal", "2026-09-01", 99.0),
            history_row(2, "Normal", "2026-09-01", 1.0),
        ],
    );

    Etl::new(&conn).calculate_changes(7, Some(AS_OF)).unwrap();

    let rows = change_rows(&conn);
    // Product 2 has no data at or before as_of; it must not appear.
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["product_id"].as_i64().unwrap(), 1);
    assert_eq!(rows[0]["current_price"].as_f64().unwrap(), 10.0);
}

#[test]
fn one_row_per_product_across_sub_types() {
    let (conn, _tmp) = common::setup_empty_db();
    load_history(
        &conn,
        &[
            history_row(1, "Holofoil", "2026-08-16", 20.0),
            history_row(1, "Holofoil", "2026-08-23", 30.0),
            history_row(1, "Normal", "2026-08-16", 2.0),
            history_row(1, "Normal", "2026-08-23", 3.0),
        ],
    );

    Etl::new(&conn).calculate_changes(7, Some(AS_OF)).unwrap();

    let rows = change_rows(&conn);
    assert_eq!(rows.len(), 1);
    // First sub type alphabetically wins.
    assert_eq!(rows[0]["sub_type_name"].as_str().unwrap(), "Holofoil");
    assert_eq!(rows[0]["current_price"].as_f64().unwrap(), 30.0);
    assert_eq!(rows[0]["price_change"].as_f64().unwrap(), 10.0);
}

#[test]
fn recalculation_replaces_the_table() {
    let (conn, _tmp) = common::setup_empty_db();
    load_history(
        &conn,
        &[
            history_row(1, "Normal", "2026-08-16", 8.0),
            history_row(1, "Normal", "2026-08-23", 10.0),
        ],
    );

    let etl = Etl::new(&conn);
    etl.calculate_changes(7, Some(AS_OF)).unwrap();
    // A wider window reaches no baseline row, so deltas become null.
    etl.calculate_changes(30, Some(AS_OF)).unwrap();

    let rows = change_rows(&conn);
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["price_change"].is_null());
}

#[test]
fn empty_history_produces_empty_change_table() {
    let (conn, _tmp) = common::setup_empty_db();
    conn.run_batch(
        "CREATE TABLE price_history (
             product_id BIGINT,
             sub_type_name VARCHAR,
             date_point DATE,
             market_price DOUBLE
         )",
    )
    .unwrap();

    let count = Etl::new(&conn).calculate_changes(7, Some(AS_OF)).unwrap();
    assert_eq!(count, 0);
    assert!(conn.has_table("price_change").unwrap());
}
