use std::time::Duration;

use tracing::info;

use dealgate_gateway::config::GatewayConfig;
use dealgate_gateway::domain::types::OTP_SWEEP_INTERVAL_SECS;
use dealgate_gateway::infra::memory::{MemoryOtpStore, spawn_sweeper};
use dealgate_gateway::router::build_router;
use dealgate_gateway::state::AppState;
use dealgate_session::SessionCodec;

#[tokio::main]
async fn main() {
    dealgate_core::tracing::init_tracing();

    let config = GatewayConfig::from_env();

    let http = reqwest::Client::builder()
        .build()
        .expect("failed to build http client");

    let state = AppState {
        otp: MemoryOtpStore::new(),
        http,
        codec: SessionCodec::new(config.session_secret.as_bytes().to_vec()),
        backend_base_url: config.backend_base_url,
        directory_url: config.directory_url,
        bypass_otp: config.bypass_otp,
        production: config.production,
    };

    if state.bypass_otp {
        tracing::warn!("BYPASS_OTP enabled: otp verification is skipped (development only)");
    }

    // Sweep expired codes in the background; the handle is owned here and
    // aborted once the server stops.
    let sweeper = spawn_sweeper(
        state.otp.clone(),
        Duration::from_secs(OTP_SWEEP_INTERVAL_SECS),
    );

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.gateway_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("gateway listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    sweeper.abort();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
