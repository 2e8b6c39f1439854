//! Offline training: split, search, refit, evaluate and publish.

pub mod grid;

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    artifact::{self, ArtifactStore, Metadata, TrainingReport},
    data::{stratified_split, Dataset, Split},
    error::Result,
    eval::metrics::EvaluationMetrics,
    label::Label,
    nlp::{
        classifier::ClassifierKind,
        pipeline::{SpamModel, SpamPipeline},
    },
};

pub use grid::{CandidateScore, ParamGrid, SearchOutcome};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
pub const DEFAULT_FOLDS: usize = 3;

/// Knobs of a training run.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub classifier: ClassifierKind,
    pub version: String,
    pub seed: u64,
    pub test_fraction: f64,
    pub folds: usize,
    pub grid: ParamGrid,
}

impl TrainOptions {
    pub fn new(classifier: ClassifierKind, version: impl Into<String>) -> Self {
        Self {
            classifier,
            version: version.into(),
            seed: DEFAULT_SEED,
            test_fraction: DEFAULT_TEST_FRACTION,
            folds: DEFAULT_FOLDS,
            grid: ParamGrid::for_kind(classifier),
        }
    }
}

/// Everything a training run produced.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub artifact_path: PathBuf,
    pub metadata_path: PathBuf,
    pub report_path: PathBuf,
    pub metadata: Metadata,
    pub split: Split,
    pub search: SearchOutcome,
}

/// Runs training against an artifact store and a reports directory.
#[derive(Debug, Clone)]
pub struct Trainer {
    store: ArtifactStore,
    reports_dir: PathBuf,
    options: TrainOptions,
}

impl Trainer {
    pub fn new(store: ArtifactStore, reports_dir: impl Into<PathBuf>, options: TrainOptions) -> Self {
        Self {
            store,
            reports_dir: reports_dir.into(),
            options,
        }
    }

    /// Train on the CSV at `dataset_path` and publish the fitted pipeline.
    ///
    /// Nothing is written unless loading, searching and evaluation all succeed.
    #[instrument(skip(self), fields(version = %self.options.version, classifier = %self.options.classifier))]
    pub fn train(&self, dataset_path: &Path) -> Result<TrainOutcome> {
        let opts = &self.options;
        let dataset = Dataset::load(dataset_path)?;

        let split = stratified_split(&dataset.labels, opts.test_fraction, opts.seed)?;
        let train_set = dataset.select(&split.train);
        let test_set = dataset.select(&split.test);
        info!(
            train = train_set.len(),
            test = test_set.len(),
            seed = opts.seed,
            "split dataset"
        );

        let search = grid::search(opts.classifier, &opts.grid, &train_set, opts.folds)?;
        let pipeline = SpamPipeline::fit(
            opts.classifier,
            &search.best,
            &train_set.texts,
            &train_set.labels,
        )?;

        let metrics = evaluate_pipeline(&pipeline, &test_set);
        info!(
            precision = metrics.precision,
            recall = metrics.recall,
            f1 = metrics.f1,
            roc_auc = ?metrics.roc_auc,
            "held-out evaluation"
        );

        let metadata = Metadata::new(
            opts.version.clone(),
            &pipeline,
            &search.best,
            metrics.clone(),
        );
        let published = self.store.publish(&pipeline, &metadata)?;

        let report_path = self
            .reports_dir
            .join(format!("report_{}.json", opts.version));
        artifact::write_report(
            &report_path,
            &TrainingReport {
                version: metadata.version.clone(),
                created_at: metadata.created_at.clone(),
                metrics,
            },
        )?;
        info!(
            model = %published.model_path.display(),
            metadata = %published.metadata_path.display(),
            report = %report_path.display(),
            "training complete"
        );

        Ok(TrainOutcome {
            artifact_path: published.model_path,
            metadata_path: published.metadata_path,
            report_path,
            metadata,
            split,
            search,
        })
    }
}

/// Score a fitted model on labelled rows.
pub fn evaluate_pipeline<M: SpamModel + ?Sized>(model: &M, rows: &Dataset) -> EvaluationMetrics {
    let probabilities: Vec<f64> = rows
        .texts
        .iter()
        .map(|text| model.spam_probability(text))
        .collect();
    let predicted: Vec<Label> = rows.texts.iter().map(|text| model.predict(text)).collect();
    EvaluationMetrics::compute(&rows.labels, &predicted, &probabilities)
}
