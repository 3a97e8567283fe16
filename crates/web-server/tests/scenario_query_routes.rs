//! Scenario: the dashboard's query surface, end to end over files on disk.
//!
//! Every route recomputes the pipeline from the source files, and missing
//! data degrades to empty collections or sentinel objects with status 200.
//! All tests are in-process; no listener is bound.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use analytics::{EventCorrelationEngine, ReturnsVolatilityEngine};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Days, NaiveDate};
use http_body_util::BodyExt;
use loader::{DataLoader, LoadError, SummaryReader};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt; // oneshot
use web_server::{build_router, AppState, QueryService};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> &Self {
        fs::write(self.path(name), content).expect("write fixture");
        self
    }

    fn router(&self) -> axum::Router {
        let service = QueryService::new(
            DataLoader::new(self.path("prices.csv"), self.path("events.csv")),
            SummaryReader::new(self.path("summary.json")),
            ReturnsVolatilityEngine::default(),
            EventCorrelationEngine::default(),
        );
        build_router(Arc::new(AppState { service }))
    }
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
    let resp = router.oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    let body = resp.into_body().collect().await.expect("body collect failed").to_bytes();
    (status, serde_json::from_slice(&body).expect("body is not valid JSON"))
}

/// Day-first price rows for `count` consecutive days starting 2020-01-01.
fn daily_prices(count: u64, price: impl Fn(u64) -> f64) -> String {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut csv = String::from("Date,Price\n");
    for i in 0..count {
        let date = start + Days::new(i);
        csv.push_str(&format!("{},{}\n", date.format("%d/%m/%Y"), price(i)));
    }
    csv
}

const NO_EVENTS: &str = "date,title,type\n";

// ---------------------------------------------------------------------------
// 1. Two prices, no events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn two_prices_without_events() {
    let fx = Fixture::new();
    fx.write("prices.csv", "Date,Price\n02/01/2020,110\n01/01/2020,100\n")
        .write("events.csv", NO_EVENTS);

    let (status, prices) = get(fx.router(), "/api/prices").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prices.as_array().unwrap().len(), 2);
    assert_eq!(prices[0]["Date"], "2020-01-01");
    assert_eq!(prices[0]["Returns"], 0.0);
    assert_eq!(prices[0]["Volatility"], 0.0);
    assert!((prices[1]["Returns"].as_f64().unwrap() - 0.10).abs() < 1e-12);

    let (status, correlations) = get(fx.router(), "/api/correlations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(correlations, json!([]));

    let (_, events) = get(fx.router(), "/api/events").await;
    assert_eq!(events, json!([]));
}

// ---------------------------------------------------------------------------
// 2. Event impact with rising prices
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rising_prices_around_an_event_give_a_positive_change() {
    let fx = Fixture::new();
    // 2020-01-01 .. 2020-03-10; 100 before 2020-02-01, 120 from then on.
    fx.write("prices.csv", &daily_prices(70, |i| if i < 31 { 100.0 } else { 120.0 }))
        .write(
            "events.csv",
            "date,title,type\n2020-02-01,Supply shock,Geopolitical\n1990-08-02,Gulf War,Geopolitical\n",
        );

    let (status, body) = get(fx.router(), "/api/correlations").await;
    assert_eq!(status, StatusCode::OK);

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1, "uncovered 1990 event is omitted: {body}");
    let r = &records[0];
    assert_eq!(r["title"], "Supply shock");
    assert_eq!(r["date"], "2020-02-01");
    assert_eq!(r["type"], "Geopolitical");
    assert_eq!(r["avg_price_before"], 100.0);
    assert_eq!(r["avg_price_after"], 120.0);
    assert_eq!(r["price_change_pct"], 20.0);
    assert!(r["vol_change_pct"].as_f64().unwrap().is_finite());
}

// ---------------------------------------------------------------------------
// 3. Metrics snapshot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn metrics_reflect_the_latest_price_and_embed_the_summary() {
    let fx = Fixture::new();
    fx.write("prices.csv", "Date,Price\n03/01/2020,90\n01/01/2020,100\n02/01/2020,110\n")
        .write("events.csv", NO_EVENTS)
        .write("summary.json", r#"{"cp_median_date": "2020-01-02", "mu1_mean": 0.01}"#);

    let (status, m) = get(fx.router(), "/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(m["latest_price"], 90.0);
    assert_eq!(m["avg_price"], 100.0);
    assert_eq!(m["max_price"], 110.0);
    assert_eq!(m["min_price"], 90.0);
    assert_eq!(m["current_volatility"], 0.0);
    assert_eq!(m["cp_summary"]["cp_median_date"], "2020-01-02");
}

// ---------------------------------------------------------------------------
// 4. Missing inputs degrade, never fault
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_price_file_degrades_to_empty_bodies() {
    let fx = Fixture::new();
    fx.write("events.csv", "date,title,type\n2020-02-01,x,y\n");

    let (status, prices) = get(fx.router(), "/api/prices").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prices, json!([]));

    let (status, metrics) = get(fx.router(), "/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics, json!({}));

    let (_, correlations) = get(fx.router(), "/api/correlations").await;
    assert_eq!(correlations, json!([]));
}

#[tokio::test]
async fn missing_summary_is_a_successful_sentinel() {
    let fx = Fixture::new();

    let (status, body) = get(fx.router(), "/api/change_points").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["message"], "No model results yet");
}

#[tokio::test]
async fn malformed_summary_is_embedded_as_an_error_object() {
    let fx = Fixture::new();
    fx.write("prices.csv", "Date,Price\n01/01/2020,100\n")
        .write("events.csv", NO_EVENTS)
        .write("summary.json", "{ truncated");

    let (status, body) = get(fx.router(), "/api/change_points").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().unwrap().contains("summary.json"));

    let (status, metrics) = get(fx.router(), "/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["latest_price"], 100.0);
    assert_eq!(metrics["cp_summary"]["status"], "error");
}

// ---------------------------------------------------------------------------
// 5. No cross-request state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn file_updates_are_visible_on_the_next_request() {
    let fx = Fixture::new();
    fx.write("prices.csv", "Date,Price\n01/01/2020,100\n").write("events.csv", NO_EVENTS);
    let router = fx.router();

    let (_, first) = get(router.clone(), "/api/metrics").await;
    let (_, again) = get(router.clone(), "/api/metrics").await;
    assert_eq!(first, again);

    fx.write("prices.csv", "Date,Price\n01/01/2020,100\n02/01/2020,80\n");
    let (_, updated) = get(router, "/api/metrics").await;
    assert_eq!(updated["latest_price"], 80.0);
}

#[tokio::test]
async fn unknown_routes_are_404_with_an_error_body() {
    let fx = Fixture::new();
    let (status, body) = get(fx.router(), "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("/api/nope"));
}

// ---------------------------------------------------------------------------
// 6. Reporting views outside the HTTP surface
// ---------------------------------------------------------------------------

#[test]
fn event_peaks_and_regime_split_read_the_same_sources() {
    let fx = Fixture::new();
    fx.write("prices.csv", &daily_prices(45, |i| 100.0 + (i % 4) as f64))
        .write("events.csv", "date,title,type\n2020-02-05,Cut,OPEC\n2019-01-01,Old,Economic\n")
        .write("summary.json", r#"{"cp_median_date": "2020-01-20", "mu2_mean": -0.002}"#);

    let service = QueryService::new(
        DataLoader::new(fx.path("prices.csv"), fx.path("events.csv")),
        SummaryReader::new(fx.path("summary.json")),
        ReturnsVolatilityEngine::default(),
        EventCorrelationEngine::default(),
    );

    let peaks = service.event_peaks();
    assert_eq!(peaks.len(), 2);
    assert!(peaks[0].1.is_some_and(|v| v > 0.0));
    assert_eq!(peaks[1].1, None);

    let split = service.regime().unwrap();
    assert_eq!(split.before.count + split.after.count, 44);
    assert_eq!(split.mu_after, Some(-0.002));
}

// ---------------------------------------------------------------------------
// 7. Load-failure cause
// ---------------------------------------------------------------------------

#[test]
fn load_failure_names_the_missing_source_until_it_appears() {
    let fx = Fixture::new();
    fx.write("events.csv", NO_EVENTS);

    let service = QueryService::new(
        DataLoader::new(fx.path("prices.csv"), fx.path("events.csv")),
        SummaryReader::new(fx.path("summary.json")),
        ReturnsVolatilityEngine::default(),
        EventCorrelationEngine::default(),
    );

    match service.load_failure() {
        Some(LoadError::DataUnavailable { path, .. }) => assert_eq!(path, fx.path("prices.csv")),
        other => panic!("expected DataUnavailable, got {other:?}"),
    }
    assert!(service.metrics().is_none());

    fx.write("prices.csv", &daily_prices(3, |_| 80.0));
    assert!(service.load_failure().is_none());
    assert!(service.metrics().is_some());
}
