use axum::http::{HeaderValue, Method};
use market_relay::{AppState, Config, create_router};
use sqlx::mysql::MySqlPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Inizializza la configurazione
    let config = Config::from_env()?;
    config.print_info();

    // Pool pigro: se lo store è irraggiungibile all'avvio il processo parte
    // comunque, saranno le singole operazioni a fallire (e a essere loggate)
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.database_url)?;

    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => info!("Store connection verified"),
        Err(e) => warn!("Store unreachable at startup, continuing anyway: {e}"),
    }

    let state = Arc::new(AppState::new(pool));

    // CORS ristretto all'origin del client configurato
    let cors = CorsLayer::new()
        .allow_origin(config.client_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);

    let app = create_router(state).layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    info!("Relay server listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
