// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Portfolio contact & newsletter API server.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! honored):
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `PUBLIC_BASE_URL`: Base URL for unsubscribe links
//! - `NEWSLETTER_ADMIN_TOKEN`: Shared admin token; unset locks the admin
//!   endpoints
//! - `ALLOWED_ORIGINS`: Comma-separated CORS allow-list
//! - `CONTACT_MAX_REQUESTS` / `CONTACT_WINDOW_SECS`: Contact rate limit
//!   (default: 5 per 3600 s)
//! - `EMAIL_API_URL` / `EMAIL_API_TOKEN` / `EMAIL_SENDER` /
//!   `CONTACT_ADMIN_RECIPIENT`: Outbound email provider settings

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portfolio_api::{
    config::Config,
    handlers::{self, AppState},
    limiter::FixedWindowLimiter,
    mailer::HttpMailer,
    store::MemoryStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        admin_configured = !config.admin_token.is_empty(),
        "Starting portfolio API"
    );

    // Create application state
    let state = Arc::new(AppState {
        limiter: FixedWindowLimiter::new(config.rate_limit.clone()),
        store: Arc::new(MemoryStore::new()),
        mailer: Arc::new(HttpMailer::new(config.email.clone())),
        config: config.clone(),
    });

    // Spawn limiter cleanup task
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            cleanup_state.limiter.cleanup().await;
        }
    });

    // Restrictive CORS for the browser-facing endpoints
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .split(',')
        .filter_map(|o| o.trim().parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Build router
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/healthz", get(handlers::health))
        .route("/api/contact", post(handlers::submit_contact))
        .route("/api/newsletter/subscribe", post(handlers::subscribe))
        .route("/api/newsletter/unsubscribe", get(handlers::unsubscribe))
        .route(
            "/api/newsletter/subscribers",
            get(handlers::list_subscribers),
        )
        .route(
            "/api/newsletter/campaigns",
            get(handlers::list_campaigns).post(handlers::create_campaign),
        )
        .route("/api/newsletter/send", post(handlers::send_campaign))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
