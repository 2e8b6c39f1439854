//! CLI entry-point for evaluating a published model version.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{artifact::ArtifactStore, config::Settings, eval};

/// Args for the `evaluate` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// CSV with `text,label` columns; defaults to `$DATA_DIR/spam_dataset.csv`.
    #[arg(long)]
    pub dataset: Option<PathBuf>,
    /// Version directory to evaluate; defaults to `$MODEL_VERSION`.
    #[arg(long)]
    pub model_version: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let dataset = args.dataset.unwrap_or_else(|| settings.default_dataset());
    let version = args
        .model_version
        .unwrap_or_else(|| settings.model_version.clone());
    let store = ArtifactStore::new(&settings.model_dir);

    let metrics = eval::evaluate_version(&store, &version, &dataset)
        .with_context(|| format!("evaluating model {version}"))?;

    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}
