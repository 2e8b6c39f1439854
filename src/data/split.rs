//! Stratified train/test split and stratified k-fold partitioning.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::Serialize;

use crate::{
    error::{Result, SpamError},
    label::Label,
};

/// Row indices of each side of a split, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

fn indices_by_class(labels: &[Label]) -> [Vec<usize>; 2] {
    let mut classes = [Vec::new(), Vec::new()];
    for (idx, label) in labels.iter().enumerate() {
        classes[label.index()].push(idx);
    }
    classes
}

/// Hold out `test_fraction` of each class; identical inputs and seed give identical splits.
///
/// Every class present in `labels` must land on both sides; a class too small
/// for that is a dataset error.
pub fn stratified_split(labels: &[Label], test_fraction: f64, seed: u64) -> Result<Split> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for (class, mut members) in indices_by_class(labels).into_iter().enumerate() {
        if members.is_empty() {
            continue;
        }
        members.shuffle(&mut rng);
        let n_test = ((members.len() as f64) * test_fraction).round() as usize;
        if n_test == 0 || n_test >= members.len() {
            return Err(SpamError::dataset(format!(
                "class '{}' has {} rows; too few to hold out {:.0}% for testing",
                Label::from_index(class),
                members.len(),
                test_fraction * 100.0
            )));
        }
        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
    }
    if train.is_empty() || test.is_empty() {
        return Err(SpamError::dataset("dataset is too small to split"));
    }
    train.sort_unstable();
    test.sort_unstable();
    Ok(Split { train, test })
}

/// Stratified folds without shuffling: the i-th member of each class lands in fold `i % k`.
///
/// Returned indices are positions into `labels`. Fewer than two folds is a
/// validation error.
pub fn stratified_k_fold(labels: &[Label], k: usize) -> Result<Vec<Split>> {
    if k < 2 {
        return Err(SpamError::validation(format!(
            "cross-validation needs at least 2 folds, got {k}"
        )));
    }
    let mut fold_of = vec![0usize; labels.len()];
    for members in indices_by_class(labels) {
        for (i, idx) in members.into_iter().enumerate() {
            fold_of[idx] = i % k;
        }
    }
    let folds = (0..k)
        .map(|fold| {
            let (test, train): (Vec<usize>, Vec<usize>) =
                (0..labels.len()).partition(|&idx| fold_of[idx] == fold);
            Split { train, test }
        })
        .collect::<Vec<_>>();
    Ok(folds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(spam: usize, ham: usize) -> Vec<Label> {
        let mut out = vec![Label::Spam; spam];
        out.extend(vec![Label::Ham; ham]);
        out
    }

    #[test]
    fn split_is_stratified_and_reproducible() {
        let y = labels(10, 30);
        let first = stratified_split(&y, 0.2, 42).unwrap();
        let second = stratified_split(&y, 0.2, 42).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.test.len(), 8);
        assert_eq!(first.train.len(), 32);
        let spam_in_test = first.test.iter().filter(|&&i| y[i] == Label::Spam).count();
        assert_eq!(spam_in_test, 2);
    }

    #[test]
    fn split_covers_every_row_once() {
        let y = labels(7, 13);
        let split = stratified_split(&y, 0.2, 7).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn folds_keep_both_classes() {
        let y = labels(6, 9);
        let folds = stratified_k_fold(&y, 3).unwrap();
        assert_eq!(folds.len(), 3);
        for fold in &folds {
            assert_eq!(fold.test.len(), 5);
            assert!(fold.test.iter().any(|&i| y[i] == Label::Spam));
            assert!(fold.test.iter().any(|&i| y[i] == Label::Ham));
            assert_eq!(fold.train.len() + fold.test.len(), y.len());
        }
    }

    #[test]
    fn tiny_classes_cannot_be_split() {
        let err = stratified_split(&labels(2, 2), 0.2, 42).unwrap_err();
        assert!(matches!(err, SpamError::Dataset(_)));
        let err = stratified_split(&labels(10, 1), 0.2, 42).unwrap_err();
        assert!(matches!(err, SpamError::Dataset(_)));
    }

    #[test]
    fn single_class_still_splits() {
        let split = stratified_split(&labels(10, 0), 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 2);
    }

    #[test]
    fn fewer_than_two_folds_is_rejected() {
        for k in [0, 1] {
            let err = stratified_k_fold(&labels(6, 6), k).unwrap_err();
            assert!(matches!(err, SpamError::Validation(_)));
        }
    }
}
