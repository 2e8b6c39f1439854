//! Runtime configuration utilities for spam-classifier.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::nlp::classifier::ClassifierKind;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder holding versioned artifacts and the current slot.
    pub model_dir: PathBuf,
    /// Root folder for labelled datasets.
    pub data_dir: PathBuf,
    /// Root folder for evaluation reports.
    pub reports_dir: PathBuf,
    /// Version string stamped on newly trained artifacts.
    pub model_version: String,
    /// Classifier family used when training.
    pub classifier: ClassifierKind,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let model_dir = env::var("MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./model"));
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let reports_dir = env::var("REPORTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./reports"));
        let model_version = env::var("MODEL_VERSION").unwrap_or_else(|_| "v1.0".to_string());
        let classifier = match env::var("CLASSIFIER") {
            Ok(value) => value
                .parse()
                .map_err(anyhow::Error::msg)
                .context("parsing CLASSIFIER")?,
            Err(_) => ClassifierKind::default(),
        };

        std::fs::create_dir_all(&model_dir).context("creating model dir")?;
        std::fs::create_dir_all(&reports_dir).context("creating reports dir")?;

        Ok(Self {
            model_dir,
            data_dir,
            reports_dir,
            model_version,
            classifier,
        })
    }

    /// Settings rooted under a single directory, used by tests and tooling.
    pub fn rooted<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            model_dir: root.join("model"),
            data_dir: root.join("data"),
            reports_dir: root.join("reports"),
            model_version: "v1.0".to_string(),
            classifier: ClassifierKind::default(),
        }
    }

    /// Default dataset location inside the data folder.
    pub fn default_dataset(&self) -> PathBuf {
        self.data_dir.join("spam_dataset.csv")
    }
}
