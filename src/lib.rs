//! Pokémon TCG price tracker SDK.
//!
//! Pulls daily product and price dumps from tcgcsv.com into an embedded
//! DuckDB database, computes per-product price changes, and serves ranked
//! top/bottom movers queries with whitelist-validated sort parameters.
//!
//! # Quick start
//!
//! ```no_run
//! use tcgtracker_sdk::{RankingRequest, TcgTrackerSdk};
//!
//! let sdk = TcgTrackerSdk::builder().build().unwrap();
//!
//! // Ingest today's data and compute 7-day changes
//! sdk.update().unwrap();
//!
//! // Biggest gainers by percent change
//! let request = RankingRequest::resolve(Some("percentage_change"), None);
//! let movers = sdk.movers().top_bottom(&request).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod etl;
pub mod metrics;
pub mod models;
pub mod queries;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncTrackerSdk;
pub use cache::CacheManager;
pub use connection::Connection;
pub use error::{Result, TrackerError};
pub use etl::UpdateSummary;
pub use metrics::{RankingRequest, SortDirection, SortMetric};
pub use models::PriceChangeRecord;
pub use sql_builder::SqlBuilder;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// TcgTrackerSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`TcgTrackerSdk`] instance.
///
/// Use [`TcgTrackerSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](TcgTrackerSdkBuilder::build) to create the SDK.
pub struct TcgTrackerSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
}

impl Default for TcgTrackerSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: Duration::from_secs(120),
        }
    }
}

impl TcgTrackerSdkBuilder {
    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/tcgtracker-sdk` on Linux, `~/Library/Caches/tcgtracker-sdk`
    /// on macOS, `%LOCALAPPDATA%\tcgtracker-sdk` on Windows). The DuckDB
    /// database file lives inside this directory too.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never downloads from tcgcsv.com and only uses
    /// previously cached data files. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for downloads.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK, initializing the cache and opening the DuckDB database.
    ///
    /// Nothing is downloaded eagerly -- data files are fetched by
    /// [`TcgTrackerSdk::update()`] or lazily by the ETL.
    pub fn build(self) -> Result<TcgTrackerSdk> {
        let cache = CacheManager::new(self.cache_dir, self.offline, self.timeout)?;
        let conn = Connection::new(cache)?;
        Ok(TcgTrackerSdk { conn })
    }
}

// ---------------------------------------------------------------------------
// TcgTrackerSdk
// ---------------------------------------------------------------------------

/// The main entry point for the tracker SDK.
///
/// Wraps a [`Connection`] (which owns the [`CacheManager`] and the DuckDB
/// database) and exposes query interfaces as lightweight borrowing wrappers.
///
/// Created via [`TcgTrackerSdk::builder()`].
pub struct TcgTrackerSdk {
    conn: Connection,
}

impl TcgTrackerSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> TcgTrackerSdkBuilder {
        TcgTrackerSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the ranked top/bottom movers query interface.
    ///
    /// Requires the `price_change` table to have been built (see
    /// [`update()`](Self::update)).
    pub fn movers(&self) -> queries::movers::MoverQuery<'_> {
        queries::movers::MoverQuery::new(&self.conn)
    }

    /// Access the product query interface.
    pub fn products(&self) -> queries::products::ProductQuery<'_> {
        queries::products::ProductQuery::new(&self.conn)
    }

    /// Access the price-history query interface.
    pub fn prices(&self) -> queries::prices::PriceQuery<'_> {
        queries::prices::PriceQuery::new(&self.conn)
    }

    /// Access the ETL interface.
    pub fn etl(&self) -> etl::Etl<'_> {
        etl::Etl::new(&self.conn)
    }

    // -- Convenience and utility methods ------------------------------------

    /// Run the full update: daily ingest plus change calculation over the
    /// default window.
    pub fn update(&self) -> Result<UpdateSummary> {
        let etl = self.etl();
        let summary = etl.daily_update()?;
        etl.calculate_changes_default()?;
        Ok(summary)
    }

    /// Execute a raw SQL query against the DuckDB database.
    ///
    /// Provides escape-hatch access for queries not covered by the
    /// domain-specific interfaces.
    ///
    /// # Arguments
    ///
    /// * `query` - SQL string with `?` positional placeholders.
    /// * `params` - Parameter values corresponding to the placeholders.
    ///
    /// # Returns
    ///
    /// A vector of rows, each represented as a `HashMap<String, serde_json::Value>`.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Return the names of all tables currently in the database.
    pub fn tables(&self) -> Result<Vec<String>> {
        self.conn.tables()
    }

    /// Consume the SDK and release all resources.
    ///
    /// Closes the DuckDB connection and HTTP client. This is called
    /// automatically when the SDK is dropped, but can be invoked explicitly
    /// for deterministic cleanup.
    pub fn close(self) {
        drop(self);
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Return a mutable reference to the underlying [`Connection`].
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for TcgTrackerSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.conn.tables().unwrap_or_default();
        let cache = self.conn.cache.borrow();
        write!(
            f,
            "TcgTrackerSdk(cache_dir={}, tables=[{}], offline={})",
            cache.cache_dir.display(),
            tables.join(", "),
            cache.offline
        )
    }
}
