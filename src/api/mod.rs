//! HTTP shell: a single upload endpoint around the extraction core.

pub mod handlers;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::clean::Cleaner;
use crate::config::Settings;
use crate::error::Result;
use crate::extract::Dispatcher;

/// Shared application context passed to all handlers.
#[derive(Clone)]
pub struct AppContext {
    pub dispatcher: Arc<Dispatcher>,
    pub cleaner: Arc<Cleaner>,
    pub upload_dir: PathBuf,
}

impl AppContext {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            dispatcher: Arc::new(Dispatcher::new()),
            cleaner: Arc::new(Cleaner::new(&settings.clean)?),
            upload_dir: settings.server.upload_dir.clone(),
        })
    }
}

/// Build the application router.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(handlers::liveness))
        .route("/procesar", post(handlers::process_document))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Run the HTTP shell until the process is stopped.
pub async fn serve(settings: &Settings) -> Result<()> {
    let ctx = AppContext::new(settings)?;
    std::fs::create_dir_all(&ctx.upload_dir)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");

    axum::serve(listener, router(ctx)).await?;
    Ok(())
}
