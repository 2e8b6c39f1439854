//! Offline evaluation of persisted artifacts.

pub mod metrics;
pub mod roc;

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    artifact::{self, ArtifactStore},
    data::Dataset,
    error::Result,
    training::evaluate_pipeline,
};

pub use metrics::{ClassScores, ClassificationReport, EvaluationMetrics};

/// Score the artifact stored under `version` against every row of a dataset.
#[instrument(skip(store))]
pub fn evaluate_version(
    store: &ArtifactStore,
    version: &str,
    dataset_path: &Path,
) -> Result<EvaluationMetrics> {
    let dataset = Dataset::load(dataset_path)?;
    let pipeline = artifact::load_pipeline(&store.version_dir(version))?;
    let metrics = evaluate_pipeline(&pipeline, &dataset);
    info!(
        rows = dataset.len(),
        f1 = metrics.f1,
        roc_auc = ?metrics.roc_auc,
        "evaluated artifact"
    );
    Ok(metrics)
}
