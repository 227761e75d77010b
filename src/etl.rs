//! ETL against the tcgcsv.com daily dumps.
//!
//! Two steps, runnable independently:
//!
//! 1. [`Etl::daily_update`]: fetch the Pokémon group list, download each
//!    group's `ProductsAndPrices.csv`, upsert the `products` table and
//!    append today's market prices to `price_history`.
//! 2. [`Etl::calculate_changes`]: rebuild the `price_change` table by
//!    comparing each product's latest price against its price at the edge
//!    of a look-back window (default 7 days).
//!
//! CSVs are loaded straight from disk by DuckDB's `read_csv`, never through
//! a Rust-side structure.

use std::path::Path;

use crate::config::DEFAULT_CHANGE_WINDOW_DAYS;
use crate::connection::Connection;
use crate::error::Result;

// ---------------------------------------------------------------------------
// UpdateSummary
// ---------------------------------------------------------------------------

/// Row counts from one [`Etl::daily_update`] run.
#[derive(Debug, Clone, Default)]
pub struct UpdateSummary {
    /// Groups successfully loaded.
    pub groups: usize,
    /// Product rows upserted.
    pub products: usize,
    /// Price-history rows inserted.
    pub price_rows: usize,
}

// ---------------------------------------------------------------------------
// Etl
// ---------------------------------------------------------------------------

/// ETL interface bound to a [`Connection`].
pub struct Etl<'a> {
    conn: &'a Connection,
}

impl<'a> Etl<'a> {
    /// Create a new `Etl` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch today's data for every group and load it into the database.
    ///
    /// A group that fails to download or load is skipped with a warning;
    /// one bad set must not abort the whole daily run.
    pub fn daily_update(&self) -> Result<UpdateSummary> {
        self.ensure_schema()?;

        let groups = self.conn.cache.borrow_mut().fetch_groups()?;
        eprintln!("Daily update: {} groups to process", groups.len());

        let mut summary = UpdateSummary::default();
        for group in &groups {
            let csv = match self.conn.cache.borrow_mut().ensure_group_csv(group.group_id) {
                Ok(path) => path,
                Err(e) => {
                    eprintln!("Skipping group {} ({}): {}", group.group_id, group.name, e);
                    continue;
                }
            };

            match self.load_group_csv(&csv) {
                Ok((products, prices)) => {
                    summary.groups += 1;
                    summary.products += products;
                    summary.price_rows += prices;
                }
                Err(e) => {
                    eprintln!("Failed to load group {} ({}): {}", group.group_id, group.name, e);
                }
            }
        }

        eprintln!(
            "Daily update complete: {} groups, {} products, {} price rows",
            summary.groups, summary.products, summary.price_rows
        );
        Ok(summary)
    }

    /// Rebuild the `price_change` table.
    ///
    /// For each product: the current price is the latest `price_history`
    /// entry at or before `as_of` (today when `None`), the baseline is the
    /// latest entry at least `window_days` older. Dollar and percent deltas
    /// are rounded to 2 decimals; the percent delta is null when no baseline
    /// exists or the baseline price is zero. Products carrying several
    /// sub types (Normal, Holofoil, ...) keep one row, the first sub type
    /// alphabetically, so `product_id` stays unique.
    ///
    /// Returns the number of rows in the rebuilt table.
    pub fn calculate_changes(&self, window_days: u32, as_of: Option<&str>) -> Result<usize> {
        let (as_of_expr, params): (&str, Vec<String>) = match as_of {
            Some(date) => ("CAST(? AS DATE)", vec![date.to_string(), date.to_string()]),
            None => ("current_date", Vec::new()),
        };

        let sql = format!(
            r#"
            CREATE OR REPLACE TABLE price_change AS
            WITH bounded AS (
                SELECT product_id, sub_type_name, market_price,
                       CAST(date_point AS DATE) AS date_point
                FROM price_history
                WHERE market_price IS NOT NULL
                  AND CAST(date_point AS DATE) <= {as_of}
            ),
            latest AS (
                SELECT product_id, sub_type_name, market_price, date_point
                FROM bounded
                QUALIFY ROW_NUMBER() OVER (
                    PARTITION BY product_id, sub_type_name ORDER BY date_point DESC
                ) = 1
            ),
            baseline AS (
                SELECT product_id, sub_type_name, market_price
                FROM bounded
                WHERE date_point <= {as_of} - INTERVAL {window} DAY
                QUALIFY ROW_NUMBER() OVER (
                    PARTITION BY product_id, sub_type_name ORDER BY date_point DESC
                ) = 1
            )
            SELECT c.product_id,
                   c.sub_type_name,
                   c.market_price AS current_price,
                   c.date_point AS current_price_date,
                   ROUND(c.market_price - b.market_price, 2) AS price_change,
                   CASE WHEN b.market_price IS NOT NULL AND b.market_price <> 0
                        THEN ROUND((c.market_price - b.market_price) / b.market_price * 100, 2)
                   END AS percentage_change,
                   current_timestamp AS last_updated
            FROM latest c
            LEFT JOIN baseline b USING (product_id, sub_type_name)
            QUALIFY ROW_NUMBER() OVER (
                PARTITION BY c.product_id ORDER BY c.sub_type_name
            ) = 1
            "#,
            as_of = as_of_expr,
            window = window_days,
        );

        self.conn.run_with_params(&sql, &params)?;

        let count = self
            .conn
            .execute_scalar("SELECT COUNT(*) FROM price_change", &[])?
            .and_then(|v| v.as_i64())
            .unwrap_or(0) as usize;
        eprintln!("Calculated price changes for {} products", count);
        Ok(count)
    }

    /// [`calculate_changes`](Self::calculate_changes) with the default
    /// window, as of today.
    pub fn calculate_changes_default(&self) -> Result<usize> {
        self.calculate_changes(DEFAULT_CHANGE_WINDOW_DAYS, None)
    }

    /// Create the ETL target tables if they do not exist yet.
    fn ensure_schema(&self) -> Result<()> {
        self.conn.run_batch(
            "CREATE TABLE IF NOT EXISTS products (
                 product_id BIGINT PRIMARY KEY,
                 group_id BIGINT,
                 name VARCHAR,
                 clean_name VARCHAR,
                 image_url VARCHAR,
                 url VARCHAR,
                 sub_type_name VARCHAR,
                 modified_on TIMESTAMP
             );
             CREATE TABLE IF NOT EXISTS price_history (
                 product_id BIGINT,
                 sub_type_name VARCHAR,
                 date_point DATE,
                 market_price DOUBLE,
                 PRIMARY KEY (product_id, sub_type_name, date_point)
             );",
        )
    }

    /// Load one group CSV: upsert products, insert today's prices.
    ///
    /// Returns `(product_rows, price_rows)`.
    fn load_group_csv(&self, csv_path: &Path) -> Result<(usize, usize)> {
        // Forward slashes and doubled quotes for the DuckDB string literal;
        // the path is cache-internal, never caller-supplied.
        let path = csv_path.to_string_lossy().replace('\\', "/").replace('\'', "''");

        let products = self.conn.run(&format!(
            "INSERT OR REPLACE INTO products
                 (product_id, group_id, name, clean_name, image_url, url,
                  sub_type_name, modified_on)
             SELECT productId, groupId, name, cleanName, imageUrl, url,
                    COALESCE(subTypeName, ''), current_timestamp
             FROM read_csv('{}', header = true)
             QUALIFY ROW_NUMBER() OVER (
                 PARTITION BY productId ORDER BY COALESCE(subTypeName, '')
             ) = 1",
            path
        ))?;

        let prices = self.conn.run(&format!(
            "INSERT OR REPLACE INTO price_history
                 (product_id, sub_type_name, date_point, market_price)
             SELECT productId, COALESCE(subTypeName, ''), current_date, marketPrice
             FROM read_csv('{}', header = true)
             WHERE marketPrice IS NOT NULL
             QUALIFY ROW_NUMBER() OVER (
                 PARTITION BY productId, COALESCE(subTypeName, '')
                 ORDER BY marketPrice DESC
             ) = 1",
            path
        ))?;

        Ok((products, prices))
    }
}
