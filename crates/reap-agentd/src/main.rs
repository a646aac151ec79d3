mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use reap_api::{HttpApi, ReaperAdapter};
use reap_core::Reaper;
use reap_exec::gcloud::GcloudControlPlane;
use reap_observe::init_logger;
use reap_prometheus::PrometheusMetrics;

use crate::config::Config;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) config
    let config = Config::parse();
    config.validate()?;

    // 2) logger
    init_logger(&config.logger_config()?)?;
    info!("logger initialized");

    // 3) control plane + metrics
    let plane = GcloudControlPlane::with_config(config.gcloud_config())?;
    let metrics = PrometheusMetrics::new().context("failed to register metrics")?;

    // 4) reaper
    let policy = config.policy()?;
    let reaper = Reaper::new(Arc::new(plane))
        .with_metrics(Arc::new(metrics.clone()))
        .with_options(config.reap_options());
    info!(
        region = %policy.region,
        max_duration = %policy.max_duration,
        cancel_concurrency = config.cancel_concurrency,
        call_timeout_secs = config.call_timeout_secs,
        "reaper configured"
    );

    // 5) http
    let app = HttpApi::new(Arc::new(ReaperAdapter::new(reaper, policy)))
        .with_metrics(metrics)
        .router();

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("http server failed")?;

    info!("shutdown complete");
    Ok(())
}

/// Cancel `token` on ctrl-c or SIGTERM.
async fn wait_for_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
    token.cancel();
}
