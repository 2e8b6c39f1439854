//! Error types shared by the training pipeline, artifact store and inference service.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the classification core.
#[derive(Debug, Error)]
pub enum SpamError {
    /// Training data is missing, malformed or empty after filtering.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// A serialized artifact required at inference time is absent.
    #[error("model artifact not found at {}", .0.display())]
    ArtifactMissing(PathBuf),

    /// Caller supplied input that does not satisfy the request contract.
    #[error("{0}")]
    Validation(String),

    /// Metadata sidecar records a label mapping other than ham=0, spam=1.
    #[error("label mapping in metadata does not match ham=0, spam=1")]
    LabelMappingMismatch,

    /// No n-gram survived `min_df` filtering.
    #[error("vectorizer vocabulary is empty; lower min_df or supply more text")]
    EmptyVocabulary,

    /// Classifier fitting failed.
    #[error("classifier fit failed: {0}")]
    Fit(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl SpamError {
    pub fn dataset(message: impl Into<String>) -> Self {
        Self::Dataset(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SpamError>;
