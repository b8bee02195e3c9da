use defi_sentinel_rating::{
    config::{LoggingSettings, Settings},
    create_app, shutdown_signal,
    utils::monitoring::init_metrics,
    AppState,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;
    init_tracing(&settings.logging);
    info!("Configuration loaded successfully");

    init_metrics()?;
    info!("Metrics system initialized");

    if settings.rating.clamp_all_categories {
        info!("All rating categories are clamped to [0, 100]");
    }

    let addr = settings.bind_address();
    let app = create_app(AppState::new(settings));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Rating service listening on {}", addr);
    info!("  POST   /rating/calculate - Rate a single protocol");
    info!("  POST   /rating/batch     - Rate several protocols");
    info!("  GET    /rating/scale     - Grade thresholds and category weights");
    info!("  GET    /health           - Health check");
    info!("  GET    /metrics          - Prometheus metrics");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down rating service");
    Ok(())
}

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_lowercase()));

    if logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
