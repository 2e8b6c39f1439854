//! HTTP layer exposing the message form and the JSON prediction API.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{config::Settings, inference::ModelSlot};

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<ModelSlot>,
}

impl AppState {
    /// State whose model loads from `settings.model_dir` on the first prediction.
    pub fn lazy(settings: &Settings) -> Self {
        Self {
            model: Arc::new(ModelSlot::lazy(settings.model_dir.clone())),
        }
    }

    pub fn with_model(model: ModelSlot) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/predict", post(routes::form_predict))
        .route("/api/predict", post(routes::api_predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let router = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving spam-classifier API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
    }
    info!("shutting down");
}
