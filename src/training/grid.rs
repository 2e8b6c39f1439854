//! Exhaustive hyper-parameter search scored by stratified cross-validation.

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    data::{split::stratified_k_fold, Dataset, Split},
    error::{Result, SpamError},
    eval::metrics::f1_score,
    label::Label,
    nlp::{
        classifier::ClassifierKind,
        normalize::normalize_all,
        pipeline::{HyperParams, SpamPipeline},
    },
};

/// Axes of the search grid; the product is explored in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct ParamGrid {
    pub ngram_ranges: Vec<(usize, usize)>,
    pub min_dfs: Vec<usize>,
    pub strengths: Vec<f64>,
}

impl ParamGrid {
    /// Default grid for a classifier family.
    pub fn for_kind(kind: ClassifierKind) -> Self {
        Self {
            ngram_ranges: vec![(1, 1), (1, 2)],
            min_dfs: vec![1, 2],
            strengths: kind.strength_grid().to_vec(),
        }
    }

    pub fn candidates(&self) -> Vec<HyperParams> {
        let mut out = Vec::new();
        for &ngram_range in &self.ngram_ranges {
            for &min_df in &self.min_dfs {
                for &strength in &self.strengths {
                    out.push(HyperParams {
                        ngram_range,
                        min_df,
                        strength,
                    });
                }
            }
        }
        out
    }
}

/// Mean cross-validated F1 of one grid point; NaN when any fold failed to fit.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateScore {
    pub params: HyperParams,
    pub mean_f1: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub best: HyperParams,
    pub best_score: f64,
    pub candidates: Vec<CandidateScore>,
}

/// Score every grid point with `folds`-fold CV and keep the first best mean F1.
pub fn search(
    kind: ClassifierKind,
    grid: &ParamGrid,
    train: &Dataset,
    folds: usize,
) -> Result<SearchOutcome> {
    let normalized = normalize_all(&train.texts);
    let splits = stratified_k_fold(&train.labels, folds)?;

    let mut candidates = Vec::new();
    let mut best: Option<(HyperParams, f64)> = None;
    for params in grid.candidates() {
        let mean_f1 = match cross_validate(kind, &params, &normalized, &train.labels, &splits) {
            Ok(score) => score,
            Err(err) => {
                warn!(?params, %err, "candidate failed; scoring as NaN");
                f64::NAN
            }
        };
        info!(?params, mean_f1, "scored candidate");
        if !mean_f1.is_nan() && best.map_or(true, |(_, score)| mean_f1 > score) {
            best = Some((params, mean_f1));
        }
        candidates.push(CandidateScore { params, mean_f1 });
    }

    let (best, best_score) = best.ok_or_else(|| {
        SpamError::Fit("every grid candidate failed during cross-validation".to_string())
    })?;
    info!(?best, best_score, "selected hyper-parameters");
    Ok(SearchOutcome {
        best,
        best_score,
        candidates,
    })
}

fn cross_validate(
    kind: ClassifierKind,
    params: &HyperParams,
    normalized: &[String],
    labels: &[Label],
    splits: &[Split],
) -> Result<f64> {
    let mut total = 0.0;
    for split in splits {
        let fit_texts: Vec<String> = split.train.iter().map(|&i| normalized[i].clone()).collect();
        let fit_labels: Vec<Label> = split.train.iter().map(|&i| labels[i]).collect();
        let pipeline = SpamPipeline::fit_normalized(kind, params, &fit_texts, &fit_labels)?;

        let truth: Vec<Label> = split.test.iter().map(|&i| labels[i]).collect();
        let predicted: Vec<Label> = split
            .test
            .iter()
            .map(|&i| pipeline.predict_normalized(&normalized[i]))
            .collect();
        total += f1_score(&truth, &predicted);
    }
    Ok(total / splits.len().max(1) as f64)
}
