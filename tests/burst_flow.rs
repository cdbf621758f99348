//! End-to-end burst scenarios against an in-process target server
//!
//! These tests wire the real HTTP fetcher, executor and formatter to a
//! loopback target server and check the report a user would see.

use burst_bench::{
    output::render_report, BurstExecutor, ClientConfig, FormatterFactory, HttpFetcher,
    ServerConfig, TargetServer,
};
use std::net::TcpListener;
use std::sync::Arc;

fn client_config(url: String, requests: u64) -> ClientConfig {
    ClientConfig {
        target_url: url,
        request_count: requests,
        ..ClientConfig::default()
    }
}

async fn run_burst(config: &ClientConfig) -> String {
    let fetcher = Arc::new(HttpFetcher::from_config(config).unwrap());
    let summary = BurstExecutor::new(config, fetcher).unwrap().run().await.unwrap();
    let formatter = FormatterFactory::create(false);
    render_report(formatter.as_ref(), &summary, false).unwrap()
}

/// Parse "S / N, P%, cost T seconds, Q qps." into its four numbers
fn parse_report(line: &str) -> (u64, u64, f64, f64) {
    let parts: Vec<&str> = line.trim_end_matches(" qps.").split(", ").collect();
    assert_eq!(parts.len(), 4, "unexpected report shape: {}", line);

    let (successes, total) = parts[0].split_once(" / ").unwrap();
    let rate = parts[1].trim_end_matches('%');
    let elapsed = parts[2].trim_start_matches("cost ").trim_end_matches(" seconds");
    let qps = parts[3];

    assert!(rate.parse::<f64>().is_ok());
    (
        successes.parse().unwrap(),
        total.parse().unwrap(),
        elapsed.parse().unwrap(),
        qps.parse().unwrap(),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_all_requests_succeed_against_ok_server() {
    let server = TargetServer::bind(&ServerConfig::loopback("ok")).unwrap().spawn();

    let report = run_burst(&client_config(server.url(), 100)).await;

    assert!(report.starts_with("100 / 100, 100.00%, cost "), "{}", report);
    let (successes, total, elapsed, qps) = parse_report(&report);
    assert_eq!((successes, total), (100, 100));
    assert!(elapsed >= 0.0);
    assert!(qps > 0.0);

    server.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_wrong_body_counts_as_failure() {
    let server = TargetServer::bind(&ServerConfig::loopback("fail")).unwrap().spawn();

    let report = run_burst(&client_config(server.url(), 10)).await;

    assert!(report.starts_with("0 / 10, 0.00%, cost "), "{}", report);

    server.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_custom_expected_body_round_trip() {
    let server = TargetServer::bind(&ServerConfig::loopback("pong")).unwrap().spawn();
    let mut config = client_config(server.url(), 20);
    config.expected_body = "pong".to_string();

    let report = run_burst(&config).await;

    assert!(report.starts_with("20 / 20, 100.00%"), "{}", report);

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_reports_zero_without_hanging() {
    // Reserve a port, then release it so nothing is listening there
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let report = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        run_burst(&client_config(format!("http://127.0.0.1:{}/", port), 5)),
    )
    .await
    .expect("run against a closed port must finish");

    assert!(report.starts_with("0 / 5, 0.00%, cost "), "{}", report);
}
