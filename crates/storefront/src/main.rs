//! Bazaar Storefront - JSON API for the shop front end.
//!
//! This binary serves the catalog, cart and checkout API on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - Product catalog loaded from a JSON file at start-up
//! - Carts held in tower-sessions (bounded in-memory store, 7-day idle expiry)
//! - Razorpay Orders API for online payment; cash on delivery needs nothing
//!
//! Without gateway credentials the service still starts and takes cash on
//! delivery orders.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use bazaar_core::PaymentGateway;
use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::services::{DisabledGateway, RazorpayClient, load_catalog};
use bazaar_storefront::{AppState, app};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Start Sentry (when a DSN is configured) and the tracing subscriber.
///
/// Sentry must be initialized before the subscriber so its tracing layer
/// sees a client. The returned guard flushes pending events on drop.
fn init_observability(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: config.sentry_environment.clone().map(Into::into),
                sample_rate: config.sentry_sample_rate,
                traces_sample_rate: config.sentry_traces_sample_rate,
                attach_stacktrace: true,
                ..Default::default()
            },
        ))
    });

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar_storefront=info,tower_http=debug".into());

    // Warnings and errors become Sentry events, info and debug breadcrumbs
    let sentry_layer = sentry_tracing::layer().event_filter(|metadata: &tracing::Metadata<'_>| match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_layer)
        .init();

    if guard.is_some() {
        tracing::info!(environment = ?config.sentry_environment, "Sentry initialized");
    }
    guard
}

/// Pick the payment gateway: Razorpay when configured, otherwise one that
/// refuses online payment.
fn payment_gateway(config: &StorefrontConfig) -> Arc<dyn PaymentGateway> {
    match &config.razorpay {
        Some(razorpay) => {
            let client = RazorpayClient::new(razorpay).expect("Failed to build Razorpay client");
            tracing::info!(key_id = client.key_id(), "Online payment enabled");
            Arc::new(client)
        }
        None => {
            tracing::warn!("RAZORPAY_KEY_ID not set, online payment disabled");
            Arc::new(DisabledGateway)
        }
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    let _sentry_guard = init_observability(&config);

    let catalog = load_catalog(&config.catalog_path).expect("Failed to load product catalog");
    let gateway = payment_gateway(&config);
    let state = AppState::new(config.clone(), catalog, gateway);

    let app = app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.expect("Failed to install Ctrl+C handler"),
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");

    tracing::info!("Shutdown signal received, draining connections");
}
