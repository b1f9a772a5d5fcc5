//! HTTP server for the entry form and the JSON API.
//!
//! | Route                | Purpose                                   |
//! |----------------------|-------------------------------------------|
//! | `GET /`              | The entry form, showing the next TNo      |
//! | `GET /items`         | Item names for the item picker            |
//! | `POST /save`         | Validate and append a new entry           |
//! | `GET /records`       | Every entry                               |
//! | `GET /record/:tno`   | One entry                                 |
//! | `POST /delete/:tno`  | Remove an entry                           |

mod handler;
mod page;

use crate::error::Res;
use crate::store::Ledger;
use crate::Config;
use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// State shared by the request handlers.
///
/// The ledger sits behind a mutex so that each request's read-modify-write of the ledger runs to
/// completion before the next one starts.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<Mutex<Ledger>>,
    items_path: PathBuf,
    templates_dir: PathBuf,
}

impl AppState {
    pub fn new(ledger: Ledger, items_path: impl Into<PathBuf>, templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            items_path: items_path.into(),
            templates_dir: templates_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ledger(), config.items_path(), config.templates_dir())
    }
}

/// Build the axum router with all endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::index))
        .route("/items", get(handler::items))
        .route("/save", post(handler::save))
        .route("/records", get(handler::records))
        .route("/record/:tno", get(handler::record))
        .route("/delete/:tno", post(handler::delete))
        .with_state(state)
}

/// Serves requests on `bind` until Ctrl-C is received.
pub async fn run(config: &Config, bind: SocketAddr) -> Res<()> {
    let app = build_router(AppState::from_config(config));
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Unable to listen on {bind}"))?;
    info!("daily-sales server listening on http://{bind}");
    info!("Ledger file: {}", config.ledger_path().display());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("The HTTP server failed")?;
    info!("HTTP server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Unable to listen for Ctrl-C, the server will run until killed: {e}");
        std::future::pending::<()>().await;
    }
}
