//! CLI interaction tests for the burst-client and burst-server binaries
//!
//! Each command runs in an empty temporary directory with the configuration
//! environment variables removed, so only the flags under test apply.

use assert_cmd::prelude::*;
use burst_bench::{server::ServerHandle, ServerConfig, TargetServer};
use predicates::prelude::*;
use std::fs;
use std::net::TcpListener;
use std::process::Command;
use tempfile::TempDir;

const CONFIG_VARS: &[&str] = &[
    "TARGET_URL",
    "REQUEST_COUNT",
    "EXPECTED_BODY",
    "REQUEST_TIMEOUT_SECONDS",
    "RUN_DEADLINE_SECONDS",
    "CONCURRENCY_LIMIT",
    "ENABLE_COLOR",
    "SERVER_BIND",
    "SERVER_PORT",
    "SERVER_BODY",
];

/// Helper function to create an isolated command for one of the binaries
fn create_test_cmd(bin: &str, dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(bin).unwrap();
    cmd.current_dir(dir.path());
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Target server running on its own runtime for the length of a test
struct BackgroundServer {
    url: String,
    _handle: ServerHandle,
    _runtime: tokio::runtime::Runtime,
}

fn start_server(body: &str) -> BackgroundServer {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();
    let config = ServerConfig::loopback(body);
    let handle = runtime.block_on(async { TargetServer::bind(&config).unwrap().spawn() });

    BackgroundServer {
        url: handle.url(),
        _handle: handle,
        _runtime: runtime,
    }
}

#[test]
fn test_client_help() {
    let dir = TempDir::new().unwrap();
    create_test_cmd("burst-client", &dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--requests"))
        .stdout(predicate::str::contains("--expect"))
        .stdout(predicate::str::contains("TARGET_URL"));
}

#[test]
fn test_server_help() {
    let dir = TempDir::new().unwrap();
    create_test_cmd("burst-server", &dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--body"))
        .stdout(predicate::str::contains("SERVER_PORT"));
}

#[test]
fn test_zero_requests_rejected() {
    let dir = TempDir::new().unwrap();
    create_test_cmd("burst-client", &dir)
        .args(["-n", "0"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Request count must be greater than 0"));
}

#[test]
fn test_invalid_url_rejected() {
    let dir = TempDir::new().unwrap();
    create_test_cmd("burst-client", &dir)
        .args(["--url", "ftp://example.com/file"])
        .assert()
        .code(1);
}

#[test]
fn test_https_target_rejected_before_any_request() {
    let dir = TempDir::new().unwrap();
    create_test_cmd("burst-client", &dir)
        .args(["--url", "https://127.0.0.1:8443/", "-n", "3"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("TLS is not supported"));
}

#[test]
fn test_conflicting_color_flags_rejected() {
    let dir = TempDir::new().unwrap();
    create_test_cmd("burst-client", &dir)
        .args(["--color", "--no-color", "-n", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--no-color"));
}

#[test]
fn test_client_prints_single_summary_line() {
    let server = start_server("ok");
    let dir = TempDir::new().unwrap();

    create_test_cmd("burst-client", &dir)
        .args(["--url", &server.url, "-n", "50"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("50 / 50, 100.00%, cost "))
        .stdout(predicate::str::ends_with(" qps.\n"))
        .stdout(predicate::str::contains("\n").count(1));
}

#[test]
fn test_client_reads_env_file() {
    let server = start_server("ok");
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        format!("TARGET_URL={}\nREQUEST_COUNT=3\n", server.url),
    )
    .unwrap();

    create_test_cmd("burst-client", &dir)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("3 / 3, 100.00%"));
}

#[test]
fn test_cli_overrides_env_file() {
    let server = start_server("ok");
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        format!("TARGET_URL={}\nREQUEST_COUNT=3\n", server.url),
    )
    .unwrap();

    create_test_cmd("burst-client", &dir)
        .args(["-n", "7"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("7 / 7, 100.00%"));
}

#[test]
fn test_client_verbose_breakdown() {
    let server = start_server("fail");
    let dir = TempDir::new().unwrap();

    create_test_cmd("burst-client", &dir)
        .args(["--url", &server.url, "-n", "4", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0 / 4, 0.00%"))
        .stdout(predicate::str::contains("Failures: 4"))
        .stdout(predicate::str::contains("unexpected body:"));
}

#[test]
fn test_client_exits_zero_when_nothing_succeeds() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = TempDir::new().unwrap();

    create_test_cmd("burst-client", &dir)
        .args(["--url", &format!("http://127.0.0.1:{}/", port), "-n", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0 / 3, 0.00%"));
}

#[test]
fn test_server_port_conflict_exits_with_bind_code() {
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();
    let dir = TempDir::new().unwrap();

    create_test_cmd("burst-server", &dir)
        .args(["--bind", "127.0.0.1", "-p", &port.to_string()])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("BIND"));
}

#[test]
fn test_client_with_concurrency_limit() {
    let server = start_server("ok");
    let dir = TempDir::new().unwrap();

    create_test_cmd("burst-client", &dir)
        .args(["--url", &server.url, "-n", "40", "-c", "4"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("40 / 40, 100.00%"));
}
