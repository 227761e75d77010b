//! Price-history queries against the `price_history` table.

use crate::error::Result;
use crate::models::{PricePoint, PriceTrend};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// PriceQuery
// ---------------------------------------------------------------------------

/// Query interface for historical market prices backed by the
/// `price_history` table.
pub struct PriceQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> PriceQuery<'a> {
    /// Create a new `PriceQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Get price history for a product, optionally bounded by ISO dates.
    ///
    /// Rows are ordered by date ascending, ready for chart rendering.
    pub fn history(
        &self,
        product_id: i64,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Result<Vec<PricePoint>> {
        let mut qb = SqlBuilder::new("price_history");
        qb.select(&[
            "product_id",
            "sub_type_name",
            "CAST(date_point AS VARCHAR) AS date",
            "market_price",
        ]);
        qb.where_eq("product_id", &product_id.to_string());
        qb.where_clause("market_price IS NOT NULL", &[]);
        qb.order_by(&["date_point ASC", "sub_type_name ASC"]);

        if let Some(df) = date_from {
            qb.where_gte("CAST(date_point AS DATE)", df);
        }

        if let Some(dt) = date_to {
            qb.where_lte("CAST(date_point AS DATE)", dt);
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }

    /// Get aggregated price trend statistics for a product.
    ///
    /// Returns `min_price`, `max_price`, `avg_price`, `first_date`,
    /// `last_date`, `data_points`.
    pub fn trend(&self, product_id: i64) -> Result<PriceTrend> {
        let sql = r#"
            SELECT
                MIN(market_price) AS min_price,
                MAX(market_price) AS max_price,
                AVG(market_price) AS avg_price,
                CAST(MIN(date_point) AS VARCHAR) AS first_date,
                CAST(MAX(date_point) AS VARCHAR) AS last_date,
                COUNT(market_price) AS data_points
            FROM price_history
            WHERE product_id = ?
              AND market_price IS NOT NULL
        "#;

        let mut rows: Vec<PriceTrend> =
            self.conn.execute_into(sql, &[product_id.to_string()])?;
        Ok(rows.pop().unwrap_or(PriceTrend {
            min_price: None,
            max_price: None,
            avg_price: None,
            first_date: None,
            last_date: None,
            data_points: 0,
        }))
    }
}
