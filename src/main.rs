//! ClubSphere API server.
//!
//! Loads configuration, wires the storage backend, identity verification and
//! Stripe into `AppState`, then serves the `/api` router.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use clubsphere::adapters::auth::{JwksConfig, JwksTokenVerifier};
use clubsphere::adapters::http::{app_router, with_layers, AppState, Repositories};
use clubsphere::adapters::memory::InMemoryStore;
use clubsphere::adapters::postgres::run_migrations;
use clubsphere::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use clubsphere::application::IdentityResolver;
use clubsphere::config::{AppConfig, DatabaseConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        backend = ?config.database.backend,
        "Starting ClubSphere API"
    );

    let repos = connect_repositories(&config.database).await?;

    let verifier = JwksTokenVerifier::new(
        JwksConfig::new(
            config.auth.jwks_url.clone(),
            config.auth.issuer.clone(),
            config.auth.audience.clone(),
        )
        .with_cache_duration(config.auth.jwks_cache_ttl()),
    );
    let session_validator = Arc::new(IdentityResolver::new(
        Arc::new(verifier),
        repos.users.clone(),
    ));

    let mut stripe = StripeConfig::new(config.payment.stripe_api_key.clone());
    if let Some(base) = &config.payment.stripe_api_base {
        stripe = stripe.with_base_url(base.clone());
    }
    let payment_provider = Arc::new(StripePaymentAdapter::new(stripe));

    let state = AppState::new(
        repos,
        payment_provider,
        session_validator,
        config.payment.currency.clone(),
    );
    let app = with_layers(app_router(state), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON lines in production, human-readable output elsewhere. `RUST_LOG`
/// overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

async fn connect_repositories(database: &DatabaseConfig) -> Result<Repositories, Box<dyn Error>> {
    if database.is_memory() {
        tracing::warn!("Using the in-memory store; data is lost on restart");
        return Ok(Repositories::in_memory(Arc::new(InMemoryStore::new())));
    }

    let pool = database.pool_options().connect(&database.url).await?;
    tracing::info!("Connected to PostgreSQL");

    if database.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("Migrations applied");
    }

    Ok(Repositories::postgres(pool))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
