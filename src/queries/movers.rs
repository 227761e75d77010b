//! Top/bottom movers queries against the `price_change` table.
//!
//! This is the ranked retrieval path behind the movers view. The sort column
//! and direction arrive pre-validated as a [`RankingRequest`]; nothing
//! caller-supplied is ever spliced into the ORDER BY clause.

use crate::config::TOP_MOVERS_LIMIT;
use crate::error::{Result, TrackerError};
use crate::metrics::RankingRequest;
use crate::models::{CardMover, PriceChangeRecord};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// MoverQuery
// ---------------------------------------------------------------------------

/// Query interface for ranked price movers backed by the `price_change` table.
pub struct MoverQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> MoverQuery<'a> {
    /// Create a new `MoverQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Fetch the top/bottom movers for a validated request.
    ///
    /// Returns at most [`TOP_MOVERS_LIMIT`] records ordered by the requested
    /// metric and direction. Ties on the sort key are broken by ascending
    /// `product_id`, so repeated calls on unchanged data return identical
    /// sequences. Rows with a null sort key sort last in either direction.
    pub fn top_bottom(&self, request: &RankingRequest) -> Result<Vec<PriceChangeRecord>> {
        self.ensure_price_change()?;

        let order = format!(
            "{} {} NULLS LAST",
            request.metric.column(),
            request.direction.sql()
        );

        let (sql, params) = SqlBuilder::new("price_change")
            .select(&[
                "product_id",
                "current_price",
                "price_change",
                "percentage_change",
            ])
            .order_by(&[&order, "product_id ASC"])
            .limit(TOP_MOVERS_LIMIT)
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Fetch the top/bottom movers joined with product details.
    ///
    /// Same ordering contract as [`top_bottom`](Self::top_bottom), with each
    /// row carrying the product name and image for list rendering. Products
    /// missing from the `products` table are skipped by the inner join.
    pub fn top_bottom_cards(&self, request: &RankingRequest) -> Result<Vec<CardMover>> {
        self.ensure_price_change()?;

        let order = format!(
            "pc.{} {} NULLS LAST",
            request.metric.column(),
            request.direction.sql()
        );

        let (sql, params) = SqlBuilder::new("price_change pc")
            .select(&[
                "pc.product_id",
                "p.name",
                "p.image_url",
                "pc.current_price",
                "pc.price_change",
                "pc.percentage_change",
            ])
            .join("JOIN products p ON pc.product_id = p.product_id")
            .order_by(&[&order, "pc.product_id ASC"])
            .limit(TOP_MOVERS_LIMIT)
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Number of rows currently in the `price_change` table.
    pub fn count(&self) -> Result<i64> {
        self.ensure_price_change()?;
        let value = self
            .conn
            .execute_scalar("SELECT COUNT(*) FROM price_change", &[])?;
        Ok(value.and_then(|v| v.as_i64()).unwrap_or(0))
    }

    /// The movers view reads a table the ETL materializes; if it has never
    /// been built the data set is simply unavailable, not a query bug.
    fn ensure_price_change(&self) -> Result<()> {
        if !self.conn.has_table("price_change")? {
            return Err(TrackerError::DataUnavailable(
                "price_change table has not been built; run the ETL first".to_string(),
            ));
        }
        Ok(())
    }
}
