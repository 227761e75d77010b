//! Async wrapper around [`TcgTrackerSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! DuckDB queries are CPU-bound but fast, making this approach efficient.
//!
//! # Example
//!
//! ```no_run
//! use tcgtracker_sdk::{AsyncTrackerSdk, RankingRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncTrackerSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let request = RankingRequest::resolve(Some("percentage_change"), Some("asc"));
//!     let movers = sdk.run(move |s| s.movers().top_bottom(&request)).await.unwrap();
//!
//!     // Convenience method for raw SQL
//!     let rows = sdk.sql("SELECT COUNT(*) FROM products", &[]).await.unwrap();
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{Result, TrackerError};
use crate::etl::UpdateSummary;
use crate::TcgTrackerSdk;

// ---------------------------------------------------------------------------
// AsyncTrackerSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncTrackerSdk`] instance.
pub struct AsyncTrackerSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
}

impl Default for AsyncTrackerSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: Duration::from_secs(120),
        }
    }
}

impl AsyncTrackerSdkBuilder {
    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for downloads.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async SDK, initializing the cache and DuckDB connection.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncTrackerSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = TcgTrackerSdk::builder();
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            builder = builder.offline(self.offline).timeout(self.timeout);
            let sdk = builder.build()?;
            Ok(AsyncTrackerSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| TrackerError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncTrackerSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`TcgTrackerSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`TcgTrackerSdk`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally.
pub struct AsyncTrackerSdk {
    inner: Arc<Mutex<TcgTrackerSdk>>,
}

impl AsyncTrackerSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncTrackerSdkBuilder {
        AsyncTrackerSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&TcgTrackerSdk` reference and should return
    /// a `Result<T>`. The operation runs on a dedicated blocking thread,
    /// keeping the async event loop free.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use tcgtracker_sdk::AsyncTrackerSdk;
    /// # async fn example() -> tcgtracker_sdk::Result<()> {
    /// # let sdk = AsyncTrackerSdk::builder().build().await?;
    /// let product = sdk.run(|s| s.products().get(42)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&TcgTrackerSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| TrackerError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| TrackerError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Execute a raw SQL query asynchronously.
    ///
    /// Convenience wrapper around [`run()`](Self::run) for
    /// [`TcgTrackerSdk::sql()`].
    pub async fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let query = query.to_string();
        let params = params.to_vec();
        self.run(move |s| s.sql(&query, &params)).await
    }

    /// Run the full update (daily ingest plus change calculation)
    /// asynchronously.
    pub async fn update(&self) -> Result<UpdateSummary> {
        self.run(|s| s.update()).await
    }

    /// Return the names of all tables currently in the database.
    pub async fn tables(&self) -> Result<Vec<String>> {
        self.run(|s| s.tables()).await
    }

    /// Close the SDK, releasing all resources.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let sdk = self
                .inner
                .lock()
                .map_err(|_| TrackerError::InvalidArgument("SDK lock poisoned".into()))?;
            // Dropping the MutexGuard drops the SDK
            drop(sdk);
            Ok(())
        })
        .await
        .map_err(|e| TrackerError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
