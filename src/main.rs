mod api;
mod config;
mod routes;
mod services;
mod session;
mod state;
mod views;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let client = api::BackendClient::new(&config.backend_url, config.timeouts).expect("backend client init failed");
    let port = config.port;
    tracing::info!(backend = %config.backend_url, esewa = %config.esewa.form_url, "backend configured");

    let state = state::AppState::new(Arc::new(client), config);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "pavilion listening");
    axum::serve(listener, app).await.expect("server failed");
}
