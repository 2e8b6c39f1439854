//! Self-contained fitted pipeline: normalise, vectorise, classify.

use std::collections::BTreeMap;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::Result,
    label::Label,
    nlp::{
        classifier::{Classifier, ClassifierKind, FittedClassifier},
        features::{TfidfParams, TfidfVectorizer},
        normalize::{normalize, normalize_all},
    },
};

/// Text-level prediction capability consumed by the inference service.
pub trait SpamModel: Send + Sync {
    /// Hard label for raw message text.
    fn predict(&self, text: &str) -> Label;

    /// Probability in `[0, 1]` that raw message text is spam.
    fn spam_probability(&self, text: &str) -> f64;
}

/// One point of the hyper-parameter grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HyperParams {
    pub ngram_range: (usize, usize),
    pub min_df: usize,
    /// `C` for logistic regression, `alpha` for naive Bayes.
    pub strength: f64,
}

impl HyperParams {
    pub fn tfidf(&self) -> TfidfParams {
        TfidfParams {
            ngram_range: self.ngram_range,
            min_df: self.min_df,
        }
    }

    /// Parameters keyed by pipeline step, naming the strength after `kind`.
    pub fn named(&self, kind: ClassifierKind) -> BTreeMap<String, Value> {
        BTreeMap::from([
            (
                "tfidf__ngram_range".to_string(),
                json!([self.ngram_range.0, self.ngram_range.1]),
            ),
            ("tfidf__min_df".to_string(), json!(self.min_df)),
            (format!("clf__{}", kind.strength_name()), json!(self.strength)),
        ])
    }
}

/// Vectorizer and classifier fitted together on normalised text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpamPipeline {
    pub vectorizer: TfidfVectorizer,
    pub classifier: FittedClassifier,
}

impl SpamPipeline {
    /// Fit on raw texts; normalisation happens here so callers never pre-process.
    pub fn fit<S: AsRef<str>>(
        kind: ClassifierKind,
        params: &HyperParams,
        texts: &[S],
        labels: &[Label],
    ) -> Result<Self> {
        let normalized = normalize_all(texts);
        Self::fit_normalized(kind, params, &normalized, labels)
    }

    /// Fit on texts that already went through [`normalize`].
    pub fn fit_normalized(
        kind: ClassifierKind,
        params: &HyperParams,
        normalized: &[String],
        labels: &[Label],
    ) -> Result<Self> {
        let vectorizer = params.tfidf().fit(normalized)?;
        let x = vectorizer.transform_dense(normalized);
        let y: Array1<usize> = labels.iter().map(|label| label.index()).collect();
        let classifier = kind.fit(params.strength, &x, &y)?;
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn predict_normalized(&self, normalized: &str) -> Label {
        self.classifier.predict(&self.vectorizer.transform(normalized))
    }

    pub fn spam_probability_normalized(&self, normalized: &str) -> f64 {
        self.classifier
            .spam_probability(&self.vectorizer.transform(normalized))
    }

    /// Classifier class name for metadata.
    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }
}

impl SpamModel for SpamPipeline {
    fn predict(&self, text: &str) -> Label {
        self.predict_normalized(&normalize(text))
    }

    fn spam_probability(&self, text: &str) -> f64 {
        self.spam_probability_normalized(&normalize(text))
    }
}
