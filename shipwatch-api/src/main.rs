use std::net::SocketAddr;
use std::sync::Arc;

use shipwatch_api::{app, state::AppState};
use shipwatch_core::repository::OrderRepository;
use shipwatch_core::tracking::{MockTrackingProvider, TrackingClient};
use shipwatch_store::{DbClient, StoreOrderRepository};
use shipwatch_sync::{HttpOrderSource, SyncEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shipwatch_api=debug,shipwatch_sync=info,tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = shipwatch_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Shipwatch API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let repo: Arc<dyn OrderRepository> = Arc::new(StoreOrderRepository::new(db.pool.clone()));

    // Carrier integrations plug in through the TrackingProvider trait; the
    // mock provider stands in until one is wired up.
    let tracker = TrackingClient::new(Arc::new(MockTrackingProvider));

    let source = Arc::new(
        HttpOrderSource::new(&config.order_source.url, &config.order_source.token)
            .expect("Failed to build order source client"),
    );

    let engine = Arc::new(SyncEngine::new(
        source,
        repo,
        tracker.clone(),
        config.sync.concurrency_limit,
    ));

    let app_state = AppState {
        tracker,
        engine,
        sync_secret: config.sync.cron_secret.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
