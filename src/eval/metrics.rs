//! Classification metrics for the spam (positive) class.

use serde::{Deserialize, Serialize};

use crate::{eval::roc, label::Label};

/// Precision, recall, F1 and support for one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1: f64,
    pub support: usize,
}

/// Per-class report with accuracy and macro/weighted averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub ham: ClassScores,
    pub spam: ClassScores,
    pub accuracy: f64,
    #[serde(rename = "macro avg")]
    pub macro_avg: ClassScores,
    #[serde(rename = "weighted avg")]
    pub weighted_avg: ClassScores,
}

/// Held-out evaluation recorded in metadata and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Undefined (null) when the evaluated rows contain a single class.
    pub roc_auc: Option<f64>,
    /// `[[tn, fp], [fn, tp]]`, rows are true labels.
    pub confusion_matrix: [[usize; 2]; 2],
    pub classification_report: ClassificationReport,
}

impl EvaluationMetrics {
    pub fn compute(truth: &[Label], predicted: &[Label], spam_probability: &[f64]) -> Self {
        let confusion_matrix = confusion_matrix(truth, predicted);
        let spam = class_scores(&confusion_matrix, Label::Spam);
        let classification_report = classification_report(&confusion_matrix);
        Self {
            precision: spam.precision,
            recall: spam.recall,
            f1: spam.f1,
            roc_auc: roc::roc_auc(truth, spam_probability),
            confusion_matrix,
            classification_report,
        }
    }
}

pub fn confusion_matrix(truth: &[Label], predicted: &[Label]) -> [[usize; 2]; 2] {
    let mut matrix = [[0usize; 2]; 2];
    for (actual, guess) in truth.iter().zip(predicted) {
        matrix[actual.index()][guess.index()] += 1;
    }
    matrix
}

/// F1 of the spam class; zero when undefined.
pub fn f1_score(truth: &[Label], predicted: &[Label]) -> f64 {
    class_scores(&confusion_matrix(truth, predicted), Label::Spam).f1
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn class_scores(matrix: &[[usize; 2]; 2], class: Label) -> ClassScores {
    let c = class.index();
    let other = 1 - c;
    let tp = matrix[c][c];
    let predicted = tp + matrix[other][c];
    let support = tp + matrix[c][other];
    let precision = ratio(tp, predicted);
    let recall = ratio(tp, support);
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };
    ClassScores {
        precision,
        recall,
        f1,
        support,
    }
}

fn classification_report(matrix: &[[usize; 2]; 2]) -> ClassificationReport {
    let ham = class_scores(matrix, Label::Ham);
    let spam = class_scores(matrix, Label::Spam);
    let total = ham.support + spam.support;
    let accuracy = ratio(matrix[0][0] + matrix[1][1], total);

    let macro_avg = ClassScores {
        precision: (ham.precision + spam.precision) / 2.0,
        recall: (ham.recall + spam.recall) / 2.0,
        f1: (ham.f1 + spam.f1) / 2.0,
        support: total,
    };
    let weight = |h: f64, s: f64| {
        if total == 0 {
            0.0
        } else {
            (h * ham.support as f64 + s * spam.support as f64) / total as f64
        }
    };
    let weighted_avg = ClassScores {
        precision: weight(ham.precision, spam.precision),
        recall: weight(ham.recall, spam.recall),
        f1: weight(ham.f1, spam.f1),
        support: total,
    };

    ClassificationReport {
        ham,
        spam,
        accuracy,
        macro_avg,
        weighted_avg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use Label::{Ham, Spam};

    #[test]
    fn spam_scores_match_hand_count() {
        let truth = [Spam, Spam, Spam, Ham, Ham];
        let predicted = [Spam, Spam, Ham, Spam, Ham];
        let metrics = EvaluationMetrics::compute(&truth, &predicted, &[0.9, 0.8, 0.3, 0.6, 0.1]);
        assert_eq!(metrics.confusion_matrix, [[1, 1], [1, 2]]);
        assert!((metrics.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics.f1 - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics.classification_report.accuracy - 0.6).abs() < 1e-12);
        assert_eq!(metrics.classification_report.ham.support, 2);
        assert_eq!(metrics.classification_report.spam.support, 3);
    }

    #[test]
    fn no_predicted_spam_gives_zero_f1() {
        assert_eq!(f1_score(&[Spam, Ham], &[Ham, Ham]), 0.0);
    }

    #[test]
    fn report_uses_sklearn_key_names() {
        let metrics = EvaluationMetrics::compute(&[Spam, Ham], &[Spam, Ham], &[0.9, 0.1]);
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json["classification_report"]["macro avg"]["f1-score"].is_number());
        assert_eq!(json["confusion_matrix"], serde_json::json!([[1, 0], [0, 1]]));
    }
}
