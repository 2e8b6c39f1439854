//! Inference service over a loaded artifact, plus a once-only lazy slot.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    artifact,
    error::{Result, SpamError},
    label::Label,
    nlp::pipeline::SpamModel,
};

pub const UNKNOWN_VERSION: &str = "unknown";

/// Label, spam probability and the version of the model that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    pub probability: f64,
    pub model_version: String,
}

/// Owns one loaded model for the lifetime of the process.
pub struct InferenceService {
    model: Box<dyn SpamModel>,
    version: String,
}

impl std::fmt::Debug for InferenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceService")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl InferenceService {
    pub fn new(model: impl SpamModel + 'static, version: impl Into<String>) -> Self {
        Self {
            model: Box::new(model),
            version: version.into(),
        }
    }

    /// Load the current artifact from `model_dir`.
    ///
    /// The pipeline file is required. Metadata is optional; when present its
    /// label mapping must be ham=0, spam=1.
    #[instrument]
    pub fn load(model_dir: &Path) -> Result<Self> {
        let pipeline = artifact::load_pipeline(model_dir)?;
        let version = match artifact::load_metadata(model_dir)? {
            Some(metadata) if !metadata.has_expected_label_mapping() => {
                return Err(SpamError::LabelMappingMismatch);
            }
            Some(metadata) => metadata.version,
            None => UNKNOWN_VERSION.to_string(),
        };
        info!(%version, classifier = pipeline.classifier_name(), "loaded model");
        Ok(Self::new(pipeline, version))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Hard label for raw text; input length is the caller's concern.
    pub fn predict(&self, text: &str) -> Label {
        self.model.predict(text)
    }

    /// Spam probability, its thresholded label and the model version.
    pub fn predict_proba(&self, text: &str) -> Prediction {
        let probability = self.model.spam_probability(text).clamp(0.0, 1.0);
        Prediction {
            label: Label::from_probability(probability),
            probability,
            model_version: self.version.clone(),
        }
    }
}

/// Loads an [`InferenceService`] on first use and keeps it for the process lifetime.
///
/// Concurrent first callers block on a single load. A failed load is not
/// cached, so a later request retries once the artifact exists.
#[derive(Debug)]
pub struct ModelSlot {
    model_dir: PathBuf,
    cell: OnceCell<Arc<InferenceService>>,
}

impl ModelSlot {
    pub fn lazy(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn preloaded(service: InferenceService) -> Self {
        Self {
            model_dir: PathBuf::new(),
            cell: OnceCell::with_value(Arc::new(service)),
        }
    }

    pub fn get(&self) -> Result<Arc<InferenceService>> {
        self.cell
            .get_or_try_init(|| InferenceService::load(&self.model_dir).map(Arc::new))
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
