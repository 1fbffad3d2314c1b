//! Storefront backend for a party-supplies marketing site.
//!
//! # General Infrastructure
//! - Product sheet is a CSV file or URL, loaded once at start, see [`catalog`]
//! - Pages fetch rendered regions from `/fragments/{region}` or the raw list from `/api/products`
//! - Contact form posts to `/api/contact`, mail goes out over SMTP or is only logged
//!
//! # Environment
//!
//! | Key | Default |
//! |---|---|
//! | `RUST_PORT` | `1111` |
//! | `CATALOG_SOURCE` | `products.csv` |
//! | `FROM_EMAIL` | `noreply@thebannercompany.com` |
//! | `TO_EMAIL` | `hello@thebannercompany.com` |
//! | `SMTP_HOST` | unset, mail is logged only |
//! | `SMTP_PORT` | `587`, STARTTLS |
//! | `SMTP_USER` | unset, no authentication |
//! | `CONTACT_LOG` | unset, submissions are not recorded |
//!
//! SMTP password is read from `/run/secrets/SMTP_PASS` when present.
//!
//! # Logging
//! ```sh
//! RUST_LOG=storefront=info,catalog=debug cargo run --bin server
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod contact;
pub mod error;
pub mod mailer;
pub mod routes;
pub mod state;
pub mod utils;

use routes::{contact_handler, fragment_handler, products_handler};
use state::AppState;

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/contact", post(contact_handler))
        .route("/api/products", get(products_handler))
        .route("/fragments/{region}", get(fragment_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
