// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon entrypoint: initialize tracing, spawn the Controller/Warden
//! runtime, and run until a termination signal arrives.

use tracing::info;
use tracing_subscriber::EnvFilter;

use wmo_daemon::Runtime;

/// Priority: `RUST_LOG` if set, otherwise `info` for this crate and `warn`
/// elsewhere.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,wmo_daemon=info,wmo_core=info"));
    let result = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    drop(result);
}

#[tokio::main]
async fn main() {
    init_tracing();

    let runtime = Runtime::builder().spawn();
    info!("wmod started");

    wait_for_shutdown_signal().await;
    info!("shutdown signal received, draining dispatch loops");

    runtime.shutdown(std::time::Duration::from_secs(5)).await;
    info!("wmod stopped");
}

/// First SIGTERM/SIGINT triggers a graceful drain; a second forces an exit.
async fn wait_for_shutdown_signal() {
    let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(s) => Some(s),
        Err(_) => None,
    };
    let mut sigint = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt()) {
        Ok(s) => Some(s),
        Err(_) => None,
    };

    tokio::select! {
        _ = async {
            match sigterm.as_mut() {
                Some(s) => s.recv().await,
                None => std::future::pending().await,
            }
        } => {}
        _ = async {
            match sigint.as_mut() {
                Some(s) => s.recv().await,
                None => std::future::pending().await,
            }
        } => {}
    }
}
