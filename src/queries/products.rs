//! Product lookups against the `products` table.

use crate::error::Result;
use crate::models::Product;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// ProductQuery
// ---------------------------------------------------------------------------

/// Query interface for Pokémon TCG products backed by the `products` table.
pub struct ProductQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> ProductQuery<'a> {
    /// Create a new `ProductQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Retrieve a single product by its TCGplayer product id.
    pub fn get(&self, product_id: i64) -> Result<Option<Product>> {
        let (sql, params) = SqlBuilder::new("products")
            .where_eq("product_id", &product_id.to_string())
            .limit(1)
            .build();

        let rows: Vec<Product> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }

    /// Search products by name substring, case-insensitive.
    pub fn search_name(&self, name: &str, limit: Option<usize>) -> Result<Vec<Product>> {
        let pattern = format!("%{}%", name);

        let mut qb = SqlBuilder::new("products");
        qb.where_like("name", &pattern);
        qb.order_by(&["name ASC", "product_id ASC"]);
        qb.limit(limit.unwrap_or(100));

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }

    /// List the products of a single group (set), paged.
    pub fn list_group(
        &self,
        group_id: i64,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Product>> {
        let mut qb = SqlBuilder::new("products");
        qb.where_eq("group_id", &group_id.to_string());
        qb.order_by(&["product_id ASC"]);
        qb.limit(limit.unwrap_or(100));
        if let Some(o) = offset {
            qb.offset(o);
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }
}
