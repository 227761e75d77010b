//! Unit tests for sort-metric whitelist resolution.

use tcgtracker_sdk::{RankingRequest, SortDirection, SortMetric};

// ---------------------------------------------------------------------------
// SortMetric
// ---------------------------------------------------------------------------

#[test]
fn allowed_metrics_resolve_to_their_variant() {
    assert_eq!(
        SortMetric::from_name("current_price"),
        Some(SortMetric::CurrentPrice)
    );
    assert_eq!(
        SortMetric::from_name("price_change"),
        Some(SortMetric::PriceChange)
    );
    assert_eq!(
        SortMetric::from_name("percentage_change"),
        Some(SortMetric::PercentageChange)
    );
}

#[test]
fn unknown_metrics_are_rejected() {
    assert_eq!(SortMetric::from_name(""), None);
    assert_eq!(SortMetric::from_name("price"), None);
    assert_eq!(SortMetric::from_name("product_id"), None);
    assert_eq!(SortMetric::from_name("current_price; DROP TABLE cards"), None);
    assert_eq!(SortMetric::from_name("DROP TABLE cards"), None);
}

#[test]
fn metric_names_are_case_sensitive() {
    assert_eq!(SortMetric::from_name("Current_Price"), None);
    assert_eq!(SortMetric::from_name("CURRENT_PRICE"), None);
}

#[test]
fn is_allowed_matches_from_name() {
    for metric in SortMetric::ALL {
        assert!(SortMetric::is_allowed(metric.column()));
    }
    assert!(!SortMetric::is_allowed("market_price"));
}

#[test]
fn default_metric_is_current_price() {
    assert_eq!(SortMetric::default(), SortMetric::CurrentPrice);
    assert_eq!(SortMetric::default().column(), "current_price");
}

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

#[test]
fn only_exact_asc_selects_ascending() {
    assert_eq!(SortDirection::from_raw(Some("asc")), SortDirection::Ascending);

    assert_eq!(SortDirection::from_raw(Some("ASC")), SortDirection::Descending);
    assert_eq!(SortDirection::from_raw(Some("Asc")), SortDirection::Descending);
    assert_eq!(SortDirection::from_raw(Some("desc")), SortDirection::Descending);
    assert_eq!(SortDirection::from_raw(Some("ascending")), SortDirection::Descending);
    assert_eq!(SortDirection::from_raw(Some("")), SortDirection::Descending);
    assert_eq!(SortDirection::from_raw(None), SortDirection::Descending);
}

#[test]
fn direction_sql_keywords() {
    assert_eq!(SortDirection::Ascending.sql(), "ASC");
    assert_eq!(SortDirection::Descending.sql(), "DESC");
}

// ---------------------------------------------------------------------------
// RankingRequest
// ---------------------------------------------------------------------------

#[test]
fn resolve_accepts_valid_pairs() {
    let request = RankingRequest::resolve(Some("percentage_change"), Some("asc"));
    assert_eq!(request.metric, SortMetric::PercentageChange);
    assert_eq!(request.direction, SortDirection::Ascending);
}

#[test]
fn resolve_falls_back_to_defaults_on_absent_input() {
    let request = RankingRequest::resolve(None, None);
    assert_eq!(request.metric, SortMetric::CurrentPrice);
    assert_eq!(request.direction, SortDirection::Descending);
}

#[test]
fn resolve_downgrades_injection_attempts_silently() {
    // Never an error: a malformed sort preference yields the default view.
    let request = RankingRequest::resolve(Some("DROP TABLE cards"), Some("asc"));
    assert_eq!(request.metric, SortMetric::CurrentPrice);
    assert_eq!(request.direction, SortDirection::Ascending);
}

#[test]
fn resolve_never_passes_raw_strings_through() {
    for raw in ["", "x", "name ASC; --", "current_price OR 1=1"] {
        let request = RankingRequest::resolve(Some(raw), Some(raw));
        assert_eq!(request.metric, SortMetric::CurrentPrice);
        assert_eq!(request.direction, SortDirection::Descending);
    }
}
