//! Whitelist resolution of untrusted sort parameters.
//!
//! The movers endpoint accepts a `column` and `sort` pair straight from the
//! query string. Neither value is ever interpolated into SQL: the column is
//! resolved against the closed [`SortMetric`] set and the direction against
//! the literal `"asc"`. Anything unrecognized silently degrades to the
//! defaults (descending by current price); a malformed sort preference
//! must not break the read path.

use std::fmt;

/// A sortable column of the `price_change` table.
///
/// Closed set: dynamically named fields are never honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMetric {
    #[default]
    CurrentPrice,
    PriceChange,
    PercentageChange,
}

impl SortMetric {
    pub const ALL: [SortMetric; 3] = [
        SortMetric::CurrentPrice,
        SortMetric::PriceChange,
        SortMetric::PercentageChange,
    ];

    /// Column name on the `price_change` table.
    pub fn column(&self) -> &'static str {
        match self {
            SortMetric::CurrentPrice => "current_price",
            SortMetric::PriceChange => "price_change",
            SortMetric::PercentageChange => "percentage_change",
        }
    }

    /// Resolve a wire name to a metric. Returns `None` for anything outside
    /// the allowed set (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "current_price" => Some(SortMetric::CurrentPrice),
            "price_change" => Some(SortMetric::PriceChange),
            "percentage_change" => Some(SortMetric::PercentageChange),
            _ => None,
        }
    }

    /// Whether `name` is a member of the allowed metric set.
    pub fn is_allowed(name: &str) -> bool {
        Self::from_name(name).is_some()
    }
}

impl fmt::Display for SortMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Ordering direction for a movers request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }

    /// Only the exact literal `"asc"` selects ascending order; every other
    /// value, including absence, is descending.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }
}

/// A validated `(metric, direction)` pair, safe to hand to the executor.
///
/// Constructed per call from untrusted input via [`RankingRequest::resolve`];
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RankingRequest {
    pub metric: SortMetric,
    pub direction: SortDirection,
}

impl RankingRequest {
    pub fn new(metric: SortMetric, direction: SortDirection) -> Self {
        Self { metric, direction }
    }

    /// Resolve raw caller-supplied strings into a validated request.
    ///
    /// Total function: invalid or absent input falls back to defaults
    /// instead of erroring.
    pub fn resolve(raw_metric: Option<&str>, raw_direction: Option<&str>) -> Self {
        let metric = raw_metric
            .and_then(SortMetric::from_name)
            .unwrap_or_default();
        let direction = SortDirection::from_raw(raw_direction);
        Self { metric, direction }
    }
}
