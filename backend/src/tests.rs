//! Tests for the backend bootstrap: settings loading, readiness signalling
//! and bind failures.

use std::ffi::OsString;

use super::load_settings;
use super::server::{ServerConfig, create_server};
#[cfg(feature = "metrics")]
use super::server::default_metrics;
use actix_web::web;
use env_lock::lock_env;
use rstest::{fixture, rstest};
use yoga_backend::inbound::http::health::HealthState;
use zeroize::Zeroizing;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn config() -> ServerConfig {
    let bind_addr = "127.0.0.1:0".parse().expect("loopback address");
    ServerConfig::new(bind_addr, Zeroizing::new(b"bootstrap-test-secret".to_vec()))
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[cfg(feature = "metrics")]
#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready_with_metrics(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    let config = config.with_metrics(default_metrics());

    let _server = create_server(health_state.clone(), config)
        .expect("server should build with metrics");

    assert!(health_state.is_ready());
}

#[rstest]
#[actix_rt::test]
async fn occupied_port_is_reported(health_state: web::Data<HealthState>) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let taken = listener.local_addr().expect("local addr");
    let config = ServerConfig::new(taken, Zeroizing::new(b"secret".to_vec()));

    let result = create_server(health_state.clone(), config);

    assert!(result.is_err(), "binding an occupied port should fail");
    assert!(!health_state.is_ready());
}

#[rstest]
fn settings_load_from_process_arguments() {
    let _guard = lock_env([
        ("YOGA_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
        ("YOGA_DATABASE_URL", None),
    ]);

    let settings =
        load_settings([OsString::from("yoga-backend")]).expect("settings should load");

    assert_eq!(
        settings.bind_addr().expect("bind address"),
        "127.0.0.1:9090".parse::<std::net::SocketAddr>().expect("addr")
    );
    assert!(settings.database_url.is_none());
}
