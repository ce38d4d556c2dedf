//! Fetcher tests against a local stub collector.

use std::time::Duration;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

use flowscope::api::{ApiClient, FetchError};

/// Serve a router on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(base, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn fetch_flows_decodes_records_and_nulls() {
    let router = Router::new().route(
        "/data",
        get(|| async {
            axum::Json(serde_json::json!([
                {
                    "time_first": "2024-01-01 12:00:00+04:00",
                    "ipv4_src_addr": "10.0.0.1",
                    "ipv4_dst_addr": "10.0.0.2",
                    "l4_src_port": 51234,
                    "l4_dst_port": 443,
                    "protocol": 6,
                    "tcp_flags": 27,
                    "in_bytes": 1200,
                    "in_pkts": 4,
                    "flow_duration_ms": 350,
                    "avg_throughput_bps": 27428.5
                },
                {
                    "time_first": "2024-01-01 12:00:30+04:00",
                    "ipv4_src_addr": null,
                    "in_bytes": null
                }
            ]))
        }),
    );

    let base = serve(router).await;
    let flows = client(&base).fetch_flows().await.unwrap();

    assert_eq!(flows.len(), 2);
    assert_eq!(flows[0].ipv4_src_addr.as_deref(), Some("10.0.0.1"));
    assert_eq!(flows[0].l4_dst_port, Some(443));
    assert_eq!(flows[0].avg_throughput_bps, Some(27428.5));
    assert!(flows[1].ipv4_src_addr.is_none());
    assert!(flows[1].in_bytes.is_none());
}

#[tokio::test]
async fn fetch_metrics_decodes_both_sections() {
    let router = Router::new().route(
        "/metrics",
        get(|| async {
            axum::Json(serde_json::json!({
                "timeseries": [
                    {"minute": "2024-01-01T00:00:00", "total_bytes": 100,
                     "total_packets": 2, "flow_count": 1, "avg_throughput": 50.0}
                ],
                "top_talkers": [
                    {"ipv4_src_addr": "1.2.3.4", "total_bytes": 100}
                ]
            }))
        }),
    );

    let base = serve(router).await;
    let metrics = client(&base).fetch_metrics().await.unwrap();

    assert_eq!(metrics.timeseries.len(), 1);
    assert_eq!(metrics.timeseries[0].total_packets, Some(2));
    assert_eq!(metrics.top_talkers[0].ipv4_src_addr, "1.2.3.4");
}

#[tokio::test]
async fn fetch_geo_keeps_events_without_coordinates() {
    let router = Router::new().route(
        "/api/geomap_data",
        get(|| async {
            axum::Json(serde_json::json!([
                {"ip": "1.1.1.1", "time": "2024-01-01T12:00:00+00:00", "lat": 25.2, "lon": 55.3},
                {"ip": "2.2.2.2", "time": "2024-01-01T12:00:05+00:00", "lat": null, "lon": null}
            ]))
        }),
    );

    let base = serve(router).await;
    let events = client(&base).fetch_geo().await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].lat, Some(25.2));
    assert!(events[1].lat.is_none());
}

#[tokio::test]
async fn fetch_by_direction_and_interface_decode() {
    let router = Router::new()
        .route(
            "/bytes_by_direction",
            get(|| async {
                axum::Json(serde_json::json!([
                    {"minute": "2024-01-01T00:00:00", "direction": "ingress", "total_bytes": 900},
                    {"minute": "2024-01-01T00:00:00", "direction": "egress", "total_bytes": 300}
                ]))
            }),
        )
        .route(
            "/bytes_by_interface",
            get(|| async {
                axum::Json(serde_json::json!([
                    {"minute": "2024-01-01T00:00:00", "ingress_if": 2, "total_bytes": 1200}
                ]))
            }),
        );

    let base = serve(router).await;
    let api = client(&base);

    let directions = api.fetch_by_direction().await.unwrap();
    assert_eq!(directions.len(), 2);
    assert_eq!(directions[0].direction, "ingress");

    let interfaces = api.fetch_by_interface().await.unwrap();
    assert_eq!(interfaces[0].ingress_if, 2);
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    // A JSON error body on a 500 must not decode as data
    let router = Router::new().route(
        "/data",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(serde_json::json!({"error": "db unreachable"})),
            )
                .into_response()
        }),
    );

    let base = serve(router).await;
    let result = client(&base).fetch_flows().await;

    assert!(matches!(result, Err(FetchError::Status(500))));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let router = Router::new().route("/data", get(|| async { "<html>not json</html>" }));

    let base = serve(router).await;
    let result = client(&base).fetch_flows().await;

    assert!(matches!(result, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn wrong_shape_is_a_decode_error() {
    // Valid JSON, wrong shape for /metrics
    let router = Router::new().route("/metrics", get(|| async { axum::Json(serde_json::json!([])) }));

    let base = serve(router).await;
    let result = client(&base).fetch_metrics().await;

    assert!(matches!(result, Err(FetchError::Decode(_))));
}
