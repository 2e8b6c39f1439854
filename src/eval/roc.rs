//! Area under the ROC curve from predicted spam probabilities.

use std::cmp::Ordering;

use crate::label::Label;

/// ROC-AUC via the Mann-Whitney rank statistic, averaging ranks over ties.
///
/// Returns `None` when either class is absent, where the curve is undefined.
pub fn roc_auc(truth: &[Label], scores: &[f64]) -> Option<f64> {
    let n_pos = truth.iter().filter(|l| **l == Label::Spam).count();
    let n_neg = truth.len().saturating_sub(n_pos);
    if n_pos == 0 || n_neg == 0 || truth.len() != scores.len() {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0f64; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // 1-based ranks start+1..=end share their mean
        let mean_rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = mean_rank;
        }
        start = end;
    }

    let pos_rank_sum: f64 = truth
        .iter()
        .zip(&ranks)
        .filter(|(label, _)| **label == Label::Spam)
        .map(|(_, rank)| rank)
        .sum();
    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    Some((pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg))
}
