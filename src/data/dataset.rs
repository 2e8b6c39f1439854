//! Labelled CSV dataset loading.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    error::{Result, SpamError},
    label::Label,
};

/// Raw messages and their labels, row-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub texts: Vec<String>,
    pub labels: Vec<Label>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

fn malformed(path: &Path, err: &csv::Error) -> SpamError {
    match err.position() {
        Some(pos) => SpamError::dataset(format!(
            "unreadable row at {}:{}: {err}",
            path.display(),
            pos.line()
        )),
        None => SpamError::dataset(format!("cannot read {}: {err}", path.display())),
    }
}

impl Dataset {
    /// Load a CSV with a `text,label` header.
    ///
    /// Rows whose text is blank are skipped. Labels follow
    /// [`Label::parse_lenient`], so unknown values count as ham.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SpamError::dataset(format!(
                "dataset not found at {}",
                path.display()
            )));
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(path)
            .map_err(|err| malformed(path, &err))?;
        let headers = reader.headers().map_err(|err| malformed(path, &err))?.clone();
        for column in ["text", "label"] {
            if !headers.iter().any(|h| h == column) {
                return Err(SpamError::dataset(
                    "CSV must contain 'text' and 'label' columns",
                ));
            }
        }

        let mut dataset = Dataset::default();
        let mut skipped = 0usize;
        for row in reader.deserialize::<RawRow>() {
            let row = row.map_err(|err| malformed(path, &err))?;
            let text = row.text.unwrap_or_default().trim().to_string();
            if text.is_empty() {
                skipped += 1;
                continue;
            }
            let label = Label::parse_lenient(row.label.as_deref().unwrap_or_default());
            dataset.texts.push(text);
            dataset.labels.push(label);
        }

        if dataset.is_empty() {
            return Err(SpamError::dataset(
                "dataset is empty or contains no valid rows",
            ));
        }
        info!(
            rows = dataset.len(),
            spam = dataset.count(Label::Spam),
            skipped,
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn count(&self, label: Label) -> usize {
        self.labels.iter().filter(|l| **l == label).count()
    }

    /// Rows at `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            texts: indices.iter().map(|&i| self.texts[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}
