//! Upstream mock through a refresh pass to the served page

use std::sync::Arc;

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{chart_json, closes, mock_chart, yahoo_provider, TestApiServer};

#[tokio::test]
async fn refresh_pass_renders_mixed_results() {
    let upstream = MockServer::start().await;
    mock_chart(&upstream, "AAA.NS", chart_json("AAA.NS", &closes(250))).await;
    mock_chart(&upstream, "SHORT.NS", chart_json("SHORT.NS", &closes(126))).await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/BBB.NS"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;

    let provider = Arc::new(yahoo_provider(&upstream, 1));
    let app = TestApiServer::with_provider(provider, &["AAA.NS", "BBB.NS", "SHORT.NS"]);

    let response = app.server.post("/api/refresh").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = app.server.get("/api/signals").await.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    let aaa = &results[0]["outcome"];
    assert_eq!(aaa["status"], "computed");
    assert_eq!(aaa["close"], 250.0);
    assert_eq!(aaa["signal"], "Buy");
    assert_eq!(aaa["smas"][0]["value"], 225.5);
    assert_eq!(aaa["smas"][2]["value"], 150.5);

    assert_eq!(results[1]["outcome"]["status"], "data_not_available");

    let short = &results[2]["outcome"];
    assert_eq!(short["status"], "computed");
    assert!(short["smas"][2]["value"].is_null());
    assert_eq!(short["signal"], "Buy");

    let page = app.server.get("/").await.text();
    let aaa_row = page.find("<td>AAA</td>").unwrap();
    let bbb_row = page.find("<td>BBB</td>").unwrap();
    let short_row = page.find("<td>SHORT</td>").unwrap();
    assert!(aaa_row < bbb_row && bbb_row < short_row);
    assert!(page.contains("<td>150.50</td>"));
    assert!(page.contains("Data Not Available"));
}

#[tokio::test]
async fn failed_upstream_keeps_page_serving() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let provider = Arc::new(yahoo_provider(&upstream, 0));
    let app = TestApiServer::with_provider(provider, &["AAA.NS", "BBB.NS"]);

    let response = app.server.post("/api/refresh").await;
    assert_eq!(response.status_code(), 200);

    let page = app.server.get("/").await.text();
    assert_eq!(page.matches("Data Not Available").count(), 2);
}
