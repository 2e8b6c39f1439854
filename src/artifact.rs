//! On-disk artifact layout, metadata schema and atomic persistence.
//!
//! ```text
//! <model_dir>/<version>/model.json      versioned pipeline
//! <model_dir>/<version>/metadata.json   versioned metadata
//! <model_dir>/model.json                current pipeline
//! <model_dir>/metadata.json             current metadata
//! ```
//!
//! Every file is written to a temporary sibling first and renamed into place,
//! so a crash never leaves a half-written artifact behind.

use std::{
    collections::BTreeMap,
    fs,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use chrono::{SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::info;

use crate::{
    error::{Result, SpamError},
    eval::metrics::EvaluationMetrics,
    label::Label,
    nlp::pipeline::{HyperParams, SpamPipeline},
};

pub const MODEL_FILE: &str = "model.json";
pub const METADATA_FILE: &str = "metadata.json";

/// Sidecar describing how and when an artifact was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: String,
    pub created_at: String,
    /// Winning grid point, keyed `tfidf__*` and `clf__<C|alpha>`.
    pub best_params: BTreeMap<String, Value>,
    pub metrics: EvaluationMetrics,
    pub label_mapping: BTreeMap<String, u8>,
    pub classifier: String,
}

impl Metadata {
    pub fn new(
        version: impl Into<String>,
        pipeline: &SpamPipeline,
        best_params: &HyperParams,
        metrics: EvaluationMetrics,
    ) -> Self {
        Self {
            version: version.into(),
            created_at: utc_timestamp(),
            best_params: best_params.named(pipeline.classifier.kind()),
            metrics,
            label_mapping: Label::mapping(),
            classifier: pipeline.classifier_name().to_string(),
        }
    }

    pub fn has_expected_label_mapping(&self) -> bool {
        self.label_mapping == Label::mapping()
    }
}

/// Evaluation report written next to other reports for a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub version: String,
    pub created_at: String,
    pub metrics: EvaluationMetrics,
}

/// Paths written by [`ArtifactStore::publish`].
#[derive(Debug, Clone)]
pub struct PublishedArtifact {
    pub model_path: PathBuf,
    pub metadata_path: PathBuf,
    pub current_model_path: PathBuf,
    pub current_metadata_path: PathBuf,
}

/// Artifact directory rooted at the configured model dir.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.root.join(version)
    }

    /// Write the versioned pair, then promote both into the current slot.
    pub fn publish(&self, pipeline: &SpamPipeline, metadata: &Metadata) -> Result<PublishedArtifact> {
        let version_dir = self.version_dir(&metadata.version);
        fs::create_dir_all(&version_dir)?;

        let model_path = version_dir.join(MODEL_FILE);
        let metadata_path = version_dir.join(METADATA_FILE);
        write_json_atomic(&model_path, pipeline)?;
        write_json_atomic(&metadata_path, metadata)?;

        // stage both before replacing either current file
        let staged_model = stage_json(&self.root, pipeline)?;
        let staged_metadata = stage_json(&self.root, metadata)?;
        let current_model_path = self.root.join(MODEL_FILE);
        let current_metadata_path = self.root.join(METADATA_FILE);
        persist(staged_model, &current_model_path)?;
        persist(staged_metadata, &current_metadata_path)?;

        info!(
            version = %metadata.version,
            model = %model_path.display(),
            current = %current_model_path.display(),
            "published artifact"
        );
        Ok(PublishedArtifact {
            model_path,
            metadata_path,
            current_model_path,
            current_metadata_path,
        })
    }
}

/// Load a serialized pipeline from `dir`, failing with `ArtifactMissing` when absent.
pub fn load_pipeline(dir: &Path) -> Result<SpamPipeline> {
    let path = dir.join(MODEL_FILE);
    if !path.is_file() {
        return Err(SpamError::ArtifactMissing(path));
    }
    read_json(&path)
}

/// Load the metadata sidecar from `dir` if one exists.
pub fn load_metadata(dir: &Path) -> Result<Option<Metadata>> {
    let path = dir.join(METADATA_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    read_json(&path).map(Some)
}

pub fn write_report(path: &Path, report: &TrainingReport) -> Result<()> {
    write_json_atomic(path, report)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = fs::File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let staged = stage_json(parent, value)?;
    persist(staged, path)
}

fn stage_json<T: Serialize>(dir: &Path, value: &T) -> Result<NamedTempFile> {
    fs::create_dir_all(dir)?;
    let mut file = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.write_all(b"\n")?;
    file.as_file().sync_all()?;
    Ok(file)
}

fn persist(file: NamedTempFile, path: &Path) -> Result<()> {
    file.persist(path).map_err(|err| SpamError::Io(err.error))?;
    Ok(())
}

/// ISO-8601 UTC timestamp with a trailing `Z`.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
