//! Shelfwise catalog runner.
//!
//! Opens one headless catalog session against a live catalog service: loads
//! configuration, performs the initial page load for `CATALOG_START_URL` and
//! logs what a page would render.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelfwise_catalog::api::{CatalogApi, HttpCatalogClient};
use shelfwise_catalog::config::CatalogConfig;
use shelfwise_catalog::error::AppError;
use shelfwise_catalog::url_sync::{AddressBar, MemoryAddressBar};
use shelfwise_catalog::view::{CatalogView, TracingView};
use shelfwise_catalog::view_mode::{FileViewModeStore, MemoryViewModeStore, ViewModeStore};
use shelfwise_catalog::{CatalogController, CatalogPorts, QueryOutcome};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CatalogConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = CatalogConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shelfwise_catalog=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(&config).await {
        e.report();
        // Flush pending Sentry events before exiting
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(config: &CatalogConfig) -> Result<(), AppError> {
    let api = HttpCatalogClient::new(config.base_url.clone(), config.featured_cache_ttl);
    tracing::info!(base_url = %api.base_url(), "Catalog client created");

    // Fail fast when the service is unreachable; this also warms the featured cache.
    let featured = api.featured().await?;
    tracing::debug!(count = featured.len(), "Catalog service reachable");

    let view_modes: Arc<dyn ViewModeStore> = match &config.view_store_path {
        Some(path) => {
            let store = FileViewModeStore::new(path.clone());
            if let Err(e) = store.load() {
                AppError::from(e).report();
            }
            Arc::new(store)
        }
        None => Arc::new(MemoryViewModeStore::default()),
    };

    let address = MemoryAddressBar::new(config.start_url.clone());
    let controller = CatalogController::new(
        CatalogPorts {
            api: Arc::new(api) as Arc<dyn CatalogApi>,
            view: Arc::new(TracingView) as Arc<dyn CatalogView>,
            address: Arc::new(address) as Arc<dyn AddressBar>,
            view_modes,
        },
        config.controller_settings(),
    );

    match controller.init().await {
        QueryOutcome::Applied => {
            tracing::info!(filters = ?controller.filters(), "Initial page load complete");
        }
        QueryOutcome::Failed | QueryOutcome::Discarded => {
            tracing::warn!("Initial page load did not render results");
        }
    }
    Ok(())
}
