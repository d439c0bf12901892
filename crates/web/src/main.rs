use std::sync::Arc;

use tracing::info;

mod config;
mod errors;
mod routes;

use config::ServerConfig;

pub struct AppState {
    pub config: ServerConfig,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let addr = config.bind_addr();
    let app = routes::router(Arc::new(AppState { config }));

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!(%addr, "chess tactics server listening");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
