//! Download and local file cache for tcgcsv.com data.
//!
//! tcgcsv.com republishes TCGplayer data once a day. The cache keeps the
//! group listing and per-group `ProductsAndPrices.csv` files on disk and
//! re-downloads a file once its local copy is older than a day. Files are
//! downloaded lazily on first access.

use crate::config;
use crate::error::{Result, TrackerError};
use crate::models::Group;
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a cached file stays fresh before it is re-downloaded.
const MAX_FILE_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Downloads and caches tcgcsv.com data files.
pub struct CacheManager {
    /// Directory where cached files and the DuckDB database are stored.
    pub cache_dir: PathBuf,
    /// If true, never download; use cached files only.
    pub offline: bool,
    timeout: Duration,
    client: Option<Client>,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache
    /// directory. Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool, timeout: Duration) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            timeout,
            client: None,
        })
    }

    /// Path of the DuckDB database file inside the cache directory.
    pub fn db_path(&self) -> PathBuf {
        self.cache_dir.join(config::DB_FILE)
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> &Client {
        if self.client.is_none() {
            self.client = Some(
                Client::builder()
                    .timeout(self.timeout)
                    .redirect(reqwest::redirect::Policy::limited(10))
                    .build()
                    .expect("failed to build HTTP client"),
            );
        }
        self.client.as_ref().unwrap()
    }

    /// Fetch the group (set) listing for the configured category.
    ///
    /// Cached on disk as `groups.json`; re-downloaded daily.
    pub fn fetch_groups(&mut self) -> Result<Vec<Group>> {
        let path = self.ensure_file(&config::groups_url(), Path::new("groups.json"))?;
        let contents = fs::read_to_string(&path)?;

        let parsed: serde_json::Value = match serde_json::from_str(&contents) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Corrupt cache file {}: {} -- removing", path.display(), e);
                let _ = fs::remove_file(&path);
                return Err(TrackerError::NotFound(format!(
                    "Cache file 'groups.json' was corrupt and has been removed. \
                     Retry to re-download. Original error: {}",
                    e
                )));
            }
        };

        let results = parsed
            .get("results")
            .cloned()
            .unwrap_or(serde_json::Value::Array(Vec::new()));
        let groups: Vec<Group> = serde_json::from_value(results)?;
        Ok(groups)
    }

    /// Ensure a group's `ProductsAndPrices.csv` is cached locally,
    /// downloading if missing or stale.
    ///
    /// Returns the local filesystem path to the cached CSV.
    pub fn ensure_group_csv(&mut self, group_id: i64) -> Result<PathBuf> {
        let rel = PathBuf::from("csv").join(format!("{}.csv", group_id));
        self.ensure_file(&config::products_csv_url(group_id), &rel)
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }

    /// Ensure a single file is cached and fresh, downloading if needed.
    fn ensure_file(&mut self, url: &str, relative: &Path) -> Result<PathBuf> {
        let local_path = self.cache_dir.join(relative);

        if !local_path.exists() || self.is_stale(&local_path) {
            if self.offline {
                if local_path.exists() {
                    return Ok(local_path);
                }
                return Err(TrackerError::NotFound(format!(
                    "File {} not cached and offline mode is enabled",
                    relative.display()
                )));
            }
            self.download_file(url, &local_path)?;
        }

        Ok(local_path)
    }

    /// A file is stale once its modification time is older than a day.
    ///
    /// If the modification time cannot be read, the file is treated as
    /// fresh so a cached copy is never discarded over a metadata error.
    fn is_stale(&self, path: &Path) -> bool {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|t| t.elapsed().ok())
            .map(|age| age > MAX_FILE_AGE)
            .unwrap_or(false)
    }

    /// Download a single file.
    ///
    /// Downloads to a temp file first and renames on success, so an
    /// interrupted download never leaves a corrupt partial file behind.
    fn download_file(&mut self, url: &str, dest: &Path) -> Result<()> {
        eprintln!("Downloading {}", url);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_dest = dest.with_extension(format!(
            "{}.tmp",
            dest.extension().and_then(|e| e.to_str()).unwrap_or("")
        ));

        let client = self.client().clone();
        let result = (|| -> Result<()> {
            let resp = client.get(url).send()?.error_for_status()?;
            let bytes = resp.bytes()?;
            fs::write(&tmp_dest, &bytes)?;
            fs::rename(&tmp_dest, dest)?;
            Ok(())
        })();

        if result.is_err() {
            // Clean up partial temp file on any error
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }
}
