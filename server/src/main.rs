mod config;
mod error;
mod routes;
mod services;
mod state;

use config::GatewayConfig;

#[tokio::main]
async fn main() {
    // Local `.env` is optional; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();
    if config.api_base_url.is_none() {
        tracing::warn!("NUXT_PUBLIC_API_URL / API_URL not set: upstream-bound requests will fail with 500");
    }
    if config.terminated_cache_ttl.is_zero() {
        tracing::info!("terminated-jobs cache disabled");
    } else {
        tracing::info!(ttl_secs = config.terminated_cache_ttl.as_secs(), "terminated-jobs cache enabled");
    }

    let port = config.port;
    let state = state::AppState::new(config).expect("upstream client init failed");

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "jobdesk gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
