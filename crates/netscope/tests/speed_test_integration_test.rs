mod support;

use anyhow::Result;
use axum::{body::Body, http::Request, http::StatusCode};
use netscope::api::types::SpeedTestResult;
use netscope::config::{Config, SpeedTestConfig};
use netscope::services::SpeedTester;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn speed_config(server: &MockServer, download: &[&str], upload: &[&str]) -> SpeedTestConfig {
    SpeedTestConfig {
        download_urls: download
            .iter()
            .map(|p| format!("{}{p}", server.uri()))
            .collect(),
        upload_urls: upload
            .iter()
            .map(|p| format!("{}{p}", server.uri()))
            .collect(),
        upload_payload_sizes: vec![16 * 1024, 64 * 1024],
        request_timeout_secs: 5,
    }
}

fn tester(config: SpeedTestConfig) -> SpeedTester {
    SpeedTester::new(
        Arc::new(support::StubInterfaces),
        config,
        tracing::info_span!("speed_test"),
    )
}

async fn mount_healthy_endpoints(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 256 * 1024]))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/up"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_successful_probes_yield_positive_speeds() -> Result<()> {
    let server = MockServer::start().await;
    mount_healthy_endpoints(&server).await;

    let result = tester(speed_config(&server, &["/down"], &["/up"]))
        .test_interface("eth0")
        .await?;

    assert!(result.download_speed_mbps > 0.0);
    assert!(result.upload_speed_mbps > 0.0);
    Ok(())
}

#[tokio::test]
async fn test_upload_sends_one_post_per_url_and_size() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/up"))
        .respond_with(ResponseTemplate::new(200))
        .expect(4)
        .mount(&server)
        .await;

    let speed = tester(speed_config(&server, &["/down"], &["/up", "/up"]))
        .measure_upload()
        .await?;

    assert!(speed > 0.0);
    Ok(())
}

#[tokio::test]
async fn test_all_probes_failing_yields_zero() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = tester(speed_config(&server, &["/a", "/b"], &["/c"]))
        .test_interface("lo")
        .await?;

    assert_eq!(result.download_speed_mbps, 0.0);
    assert_eq!(result.upload_speed_mbps, 0.0);
    Ok(())
}

#[tokio::test]
async fn test_failed_download_does_not_affect_upload() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/up"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = tester(speed_config(&server, &["/missing"], &["/up"]))
        .test_interface("eth0")
        .await?;

    assert_eq!(result.download_speed_mbps, 0.0);
    assert!(result.upload_speed_mbps > 0.0);
    Ok(())
}

#[tokio::test]
async fn test_slow_endpoint_times_out_and_is_skipped() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0u8; 1024])
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 256 * 1024]))
        .mount(&server)
        .await;

    let mut config = speed_config(&server, &["/slow", "/down"], &["/up"]);
    config.request_timeout_secs = 1;

    let speed = tester(config).measure_download().await?;
    assert!(speed > 0.0);
    Ok(())
}

#[tokio::test]
async fn test_speed_route_returns_camel_case_result() -> Result<()> {
    let server = MockServer::start().await;
    mount_healthy_endpoints(&server).await;

    let config = Config {
        speed_test: speed_config(&server, &["/down"], &["/up"]),
        ..Config::default()
    };
    let app = netscope::build_router(support::state(config));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/network/test-speed/eth0")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let raw: serde_json::Value = serde_json::from_slice(&body)?;
    assert!(raw.get("downloadSpeedMbps").is_some());
    assert!(raw.get("uploadSpeedMbps").is_some());

    let result: SpeedTestResult = serde_json::from_slice(&body)?;
    assert!(result.download_speed_mbps > 0.0);
    Ok(())
}

#[tokio::test]
async fn test_large_download_is_measured_across_chunks() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 8 * 1024 * 1024]))
        .expect(1)
        .mount(&server)
        .await;

    let speed = tester(speed_config(&server, &["/large"], &["/up"]))
        .measure_download()
        .await?;

    assert!(speed > 0.0);
    Ok(())
}
