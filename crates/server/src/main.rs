// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use config::{Args, RemoteStateConfig};
use remote_state_api::{
    app::create_app,
    logging::{self, LoggingConfig},
    metrics,
    state::AppState,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = RemoteStateConfig::from_env_file(&args.env_file)
        .with_context(|| format!("Failed to load configuration from {}", args.env_file))?;

    let _logging_guard = logging::init_with_config(LoggingConfig {
        level: &config.log.level,
        json_format: config.log.json,
        strip_ansi: config.log.strip_ansi,
        write_to_file: config.log.write,
        write_path: &config.log.write_path,
        write_max_file_size: config.log.write_max_file_size,
        write_max_files: config.log.write_max_files,
        loki_url: config.metrics.loki_url.as_deref(),
    })?;

    if config.metrics.enabled {
        match metrics::init(&config.metrics.prometheus_prefix) {
            Ok(()) => tracing::info!(
                prefix = %config.metrics.prometheus_prefix,
                "Prometheus metrics enabled"
            ),
            Err(err) => tracing::error!(error = %err, "Failed to initialize metrics"),
        }
    }

    let addr = format!("{}:{}", config.express.bind_host, config.express.port);
    tracing::info!(
        tfe = %config.tfe.address,
        authenticated = config.tfe.token.is_some(),
        log_level = %config.log.level,
        "Starting remote-state-api v{}",
        env!("CARGO_PKG_VERSION")
    );

    let state = AppState::new(config).context("Failed to create TFE client")?;
    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}
