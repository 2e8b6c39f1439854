//! Binary spam classifiers over TF-IDF feature vectors.
//!
//! Two families share the [`Classifier`] capability set: L2-regularised
//! logistic regression (fitted with linfa) and multinomial naive Bayes.
//! Both persist as plain weight tables so a loaded artifact needs no solver.

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use linfa::{dataset::DatasetBase, prelude::Fit};
use linfa_logistic::LogisticRegression;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Result, SpamError},
    label::{Label, SPAM_THRESHOLD},
    nlp::features::SparseVector,
};

const LOGISTIC_MAX_ITERATIONS: u64 = 1000;

/// Scoring and prediction over a single feature vector.
pub trait Classifier {
    /// Probability that the message behind `features` is spam.
    fn spam_probability(&self, features: &SparseVector) -> f64;

    /// Hard decision; a probability of exactly one half is ham.
    fn predict(&self, features: &SparseVector) -> Label {
        if self.spam_probability(features) > SPAM_THRESHOLD {
            Label::Spam
        } else {
            Label::Ham
        }
    }
}

/// Classifier family selected at training time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ClassifierKind {
    /// Logistic regression, regularised by inverse strength `C`.
    #[default]
    #[value(name = "logreg")]
    #[serde(rename = "logreg")]
    LogReg,
    /// Multinomial naive Bayes, smoothed by `alpha`.
    #[value(name = "nb")]
    #[serde(rename = "nb")]
    NaiveBayes,
}

impl ClassifierKind {
    /// Regularisation values explored by the grid search.
    pub fn strength_grid(self) -> &'static [f64] {
        match self {
            Self::LogReg => &[0.5, 1.0, 2.0],
            Self::NaiveBayes => &[0.1, 0.5, 1.0],
        }
    }

    /// Name of the regularisation parameter in reports.
    pub fn strength_name(self) -> &'static str {
        match self {
            Self::LogReg => "C",
            Self::NaiveBayes => "alpha",
        }
    }

    /// Fit on a dense design matrix with labels encoded as ham=0, spam=1.
    pub fn fit(self, strength: f64, x: &Array2<f64>, y: &Array1<usize>) -> Result<FittedClassifier> {
        if x.nrows() != y.len() {
            return Err(SpamError::Fit(format!(
                "{} feature rows for {} labels",
                x.nrows(),
                y.len()
            )));
        }
        match self {
            Self::LogReg => LogisticModel::fit(strength, x, y).map(FittedClassifier::Logistic),
            Self::NaiveBayes => NaiveBayesModel::fit(strength, x, y).map(FittedClassifier::NaiveBayes),
        }
    }
}

impl FromStr for ClassifierKind {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(value, true)
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogReg => f.write_str("logreg"),
            Self::NaiveBayes => f.write_str("nb"),
        }
    }
}

/// A fitted classifier of either family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedClassifier {
    Logistic(LogisticModel),
    NaiveBayes(NaiveBayesModel),
}

impl FittedClassifier {
    /// Class name recorded in artifact metadata.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Logistic(_) => "LogisticRegression",
            Self::NaiveBayes(_) => "MultinomialNB",
        }
    }

    pub fn kind(&self) -> ClassifierKind {
        match self {
            Self::Logistic(_) => ClassifierKind::LogReg,
            Self::NaiveBayes(_) => ClassifierKind::NaiveBayes,
        }
    }
}

impl Classifier for FittedClassifier {
    fn spam_probability(&self, features: &SparseVector) -> f64 {
        match self {
            Self::Logistic(model) => model.spam_probability(features),
            Self::NaiveBayes(model) => model.spam_probability(features),
        }
    }
}

/// Logistic regression coefficients for the spam class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    fn fit(c: f64, x: &Array2<f64>, y: &Array1<usize>) -> Result<Self> {
        if c <= 0.0 {
            return Err(SpamError::Fit(format!("C must be positive, got {c}")));
        }
        let dataset = DatasetBase::new(x.clone(), y.clone());
        let fitted = LogisticRegression::default()
            .alpha(1.0 / c)
            .max_iterations(LOGISTIC_MAX_ITERATIONS)
            .fit(&dataset)
            .map_err(|err| SpamError::Fit(err.to_string()))?;
        debug!(c, features = x.ncols(), "fitted logistic regression");
        Ok(Self {
            weights: fitted.params().to_vec(),
            intercept: fitted.intercept(),
        })
    }
}

impl Classifier for LogisticModel {
    fn spam_probability(&self, features: &SparseVector) -> f64 {
        sigmoid(features.dot(&self.weights) + self.intercept)
    }
}

/// Multinomial naive Bayes tables, indexed ham=0, spam=1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    pub class_log_prior: [f64; 2],
    pub feature_log_prob: [Vec<f64>; 2],
}

impl NaiveBayesModel {
    fn fit(alpha: f64, x: &Array2<f64>, y: &Array1<usize>) -> Result<Self> {
        if alpha <= 0.0 {
            return Err(SpamError::Fit(format!("alpha must be positive, got {alpha}")));
        }
        let n_features = x.ncols();
        let mut class_count = [0.0f64; 2];
        let mut feature_count = [vec![0.0f64; n_features], vec![0.0f64; n_features]];
        for (row, &label) in x.outer_iter().zip(y.iter()) {
            let class = Label::from_index(label).index();
            class_count[class] += 1.0;
            for (acc, value) in feature_count[class].iter_mut().zip(row.iter()) {
                *acc += value;
            }
        }
        if class_count.iter().any(|&count| count == 0.0) {
            return Err(SpamError::Fit(
                "naive Bayes needs at least one ham and one spam sample".to_string(),
            ));
        }

        let total = class_count[0] + class_count[1];
        let class_log_prior = [
            (class_count[0] / total).ln(),
            (class_count[1] / total).ln(),
        ];
        let feature_log_prob = feature_count.map(|counts| {
            let denom = counts.iter().sum::<f64>() + alpha * n_features as f64;
            counts
                .iter()
                .map(|count| ((count + alpha) / denom).ln())
                .collect::<Vec<_>>()
        });
        debug!(alpha, features = n_features, "fitted multinomial naive Bayes");
        Ok(Self {
            class_log_prior,
            feature_log_prob,
        })
    }

    fn joint_log_likelihood(&self, features: &SparseVector) -> [f64; 2] {
        [
            self.class_log_prior[0] + features.dot(&self.feature_log_prob[0]),
            self.class_log_prior[1] + features.dot(&self.feature_log_prob[1]),
        ]
    }
}

impl Classifier for NaiveBayesModel {
    fn spam_probability(&self, features: &SparseVector) -> f64 {
        let [ham, spam] = self.joint_log_likelihood(features);
        sigmoid(spam - ham)
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
