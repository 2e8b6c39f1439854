//! `serve` sub-command: bind the HTML form and JSON API.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    api::{self, AppState},
    config::Settings,
    inference::{InferenceService, ModelSlot},
};

#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Host address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    /// Load the current model before accepting requests instead of on the first prediction.
    #[arg(long)]
    pub preload: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let state = if args.preload {
        let model_dir = settings.model_dir.clone();
        let service = tokio::task::spawn_blocking(move || InferenceService::load(&model_dir))
            .await?
            .context("preloading current model")?;
        info!(version = service.version(), "model preloaded");
        AppState::with_model(ModelSlot::preloaded(service))
    } else {
        AppState::lazy(&settings)
    };
    api::serve(state, &args.host, args.port).await
}
