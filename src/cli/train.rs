//! CLI entry-point for training and publishing a model.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    artifact::ArtifactStore,
    config::Settings,
    nlp::classifier::ClassifierKind,
    training::{TrainOptions, Trainer, DEFAULT_FOLDS, DEFAULT_SEED},
};

/// Args for the `train` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// CSV with `text,label` columns; defaults to `$DATA_DIR/spam_dataset.csv`.
    #[arg(long)]
    pub dataset: Option<PathBuf>,
    /// Classifier family; defaults to `$CLASSIFIER` or logreg.
    #[arg(long, value_enum)]
    pub classifier: Option<ClassifierKind>,
    /// Version stamped on the artifact; defaults to `$MODEL_VERSION`.
    #[arg(long)]
    pub model_version: Option<String>,
    /// Seed for the stratified train/test split.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    /// Cross-validation folds for the grid search (at least 2).
    #[arg(
        long,
        default_value_t = DEFAULT_FOLDS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(2..)
    )]
    pub folds: usize,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let dataset = args.dataset.unwrap_or_else(|| settings.default_dataset());
    let classifier = args.classifier.unwrap_or(settings.classifier);
    let version = args
        .model_version
        .unwrap_or_else(|| settings.model_version.clone());

    let mut options = TrainOptions::new(classifier, version);
    options.seed = args.seed;
    options.folds = args.folds;

    let trainer = Trainer::new(
        ArtifactStore::new(&settings.model_dir),
        &settings.reports_dir,
        options,
    );
    let outcome = tokio::task::spawn_blocking(move || trainer.train(&dataset))
        .await
        .context("training task panicked")?
        .context("training failed")?;

    info!(
        best = ?outcome.metadata.best_params,
        f1 = outcome.metadata.metrics.f1,
        "trained model"
    );
    println!("Saved model to {}", outcome.artifact_path.display());
    println!("Saved metadata to {}", outcome.metadata_path.display());
    println!("Saved report to {}", outcome.report_path.display());
    Ok(())
}
