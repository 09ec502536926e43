use std::net::SocketAddr;

use campus::logging::{init_tracing, shutdown_tracer};
use campus::metrics::{init_metrics, metrics_app};
use campus::router::init_router;
use campus::state::init_app_state;
use dotenvy::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let metrics_handle = init_metrics()?;
    let state = init_app_state().await?;
    let port = state.server_config.port;

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    info!(port, "Server running on http://localhost:{port}");
    info!("Swagger UI available at http://localhost:{port}/swagger-ui");
    info!("Scalar UI available at http://localhost:{port}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
