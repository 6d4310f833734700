//! BoxOffice Server — seat reservation and booking platform
//!
//! Main entry point that wires all crates together and starts the HTTP
//! server plus the three background pipelines (expiry signaler, seat-state
//! consumer, reconciler).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use boxoffice_api::{AppState, build_router};
use boxoffice_cache::{RedisClient, RedisSeatLockStore, RedisSeatOverlayStore};
use boxoffice_cache::lock::SeatLockStore;
use boxoffice_cache::overlay::SeatOverlayStore;
use boxoffice_core::config::AppConfig;
use boxoffice_core::error::AppError;
use boxoffice_database::DatabasePool;
use boxoffice_database::repositories::{
    BookingRepository, EventRepository, SeatHoldRepository, SeatRepository,
};
use boxoffice_messaging::{EventPublisher, build_stream_consumer};
use boxoffice_service::{BookingService, EventReadService};
use boxoffice_worker::{ExpirySignaler, HoldReconciler, SeatStateConsumer};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("BOXOFFICE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    // ── Step 1: Record store ─────────────────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        boxoffice_database::migration::run_migrations(db.pool()).await?;
    }
    let pool = db.pool().clone();

    // ── Step 2: Lock/overlay store and event log ─────────────────
    let redis = RedisClient::connect(&config.cache).await?;
    let locks: Arc<dyn SeatLockStore> = Arc::new(RedisSeatLockStore::new(redis.clone()));
    let overlay: Arc<dyn SeatOverlayStore> = Arc::new(RedisSeatOverlayStore::new(
        redis.clone(),
        config.cache.overlay_ttl_seconds,
    ));
    let publisher = Arc::new(EventPublisher::new(&config.messaging)?);

    // ── Step 3: Repositories and services ────────────────────────
    let event_repo = EventRepository::new(pool.clone());
    let seat_repo = SeatRepository::new(pool.clone());
    let hold_repo = SeatHoldRepository::new(pool.clone());
    let booking_repo = BookingRepository::new(pool.clone());

    let booking_service = Arc::new(BookingService::new(
        pool.clone(),
        event_repo.clone(),
        seat_repo.clone(),
        hold_repo.clone(),
        booking_repo.clone(),
        Arc::clone(&locks),
        Arc::clone(&overlay),
        Arc::clone(&publisher),
        config.booking.clone(),
    ));
    let event_read_service = Arc::new(EventReadService::new(
        event_repo.clone(),
        seat_repo.clone(),
        Arc::clone(&overlay),
    ));

    // ── Step 4: Background pipelines ─────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let signaler = ExpirySignaler::new(&config.cache, Arc::clone(&publisher));
    let signaler_handle = tokio::spawn({
        let rx = shutdown_rx.clone();
        async move { signaler.run(rx).await }
    });

    let transition_stream = build_stream_consumer(
        &config.messaging,
        &[config.messaging.topics.seat_state_transitions.as_str()],
    )?;
    let consumer = SeatStateConsumer::new(
        pool.clone(),
        seat_repo.clone(),
        hold_repo.clone(),
        Arc::clone(&overlay),
        Arc::clone(&publisher),
        transition_stream,
    );
    let consumer_handle = tokio::spawn({
        let rx = shutdown_rx.clone();
        async move { consumer.run(rx).await }
    });

    let reconciler = HoldReconciler::new(
        pool.clone(),
        seat_repo.clone(),
        hold_repo.clone(),
        Arc::clone(&locks),
        Arc::clone(&overlay),
        Arc::clone(&publisher),
        config.booking.reconciler.clone(),
    );
    let reconciler_handle = tokio::spawn({
        let rx = shutdown_rx.clone();
        async move { reconciler.run(rx).await }
    });

    // ── Step 5: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState {
        config: Arc::new(config),
        db_pool: pool.clone(),
        booking_service,
        event_read_service,
    };
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(addr = %addr, "BoxOffice server listening");

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
        }
        let _ = shutdown_tx.send(true);
    });

    let mut serve_shutdown = shutdown_rx.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = serve_shutdown.changed().await;
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 6: Drain background pipelines ───────────────────────
    tracing::info!("Waiting for background pipelines to drain...");
    let _ = tokio::time::timeout(grace, async {
        let _ = signaler_handle.await;
        let _ = consumer_handle.await;
        let _ = reconciler_handle.await;
    })
    .await;

    db.close().await;
    tracing::info!("BoxOffice server shut down");
    Ok(())
}
