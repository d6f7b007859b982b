//! Deterministic stratified splitting
//!
//! Every shuffle uses a ChaCha8 RNG seeded from the pipeline config, and
//! classes are visited in sorted order, so identical input data and seed
//! produce identical partitions across runs and processes.

use crate::error::{Result, SentimentyError};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single train/test index split
#[derive(Debug, Clone)]
pub struct CVSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub fold_idx: usize,
}

/// Group sample indices by class id, in sorted class order
fn indices_by_class(labels: &[i64]) -> BTreeMap<i64, Vec<usize>> {
    let mut by_class: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }
    by_class
}

/// Stratified holdout split preserving per-class proportions.
///
/// Each class contributes `round(n_class * test_fraction)` samples to the
/// test partition, clamped so both partitions keep at least one sample per
/// class. Returns `(train_indices, test_indices)`.
pub fn train_test_split(
    labels: &[i64],
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if labels.is_empty() {
        return Err(SentimentyError::ValidationError(
            "cannot split an empty dataset".to_string(),
        ));
    }
    if !(0.0..1.0).contains(&test_fraction) || test_fraction <= 0.0 {
        return Err(SentimentyError::ValidationError(format!(
            "test_fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for (_class, mut indices) in indices_by_class(labels) {
        if indices.len() < 2 {
            return Err(SentimentyError::ValidationError(
                "each class needs at least 2 samples for a stratified split".to_string(),
            ));
        }
        indices.shuffle(&mut rng);

        let n_test = ((indices.len() as f64) * test_fraction).round() as usize;
        let n_test = n_test.clamp(1, indices.len() - 1);

        test_indices.extend_from_slice(&indices[..n_test]);
        train_indices.extend_from_slice(&indices[n_test..]);
    }

    // Stable output order regardless of class interleaving
    train_indices.sort_unstable();
    test_indices.sort_unstable();

    Ok((train_indices, test_indices))
}

/// Stratified K-fold splitter (shuffled, seeded)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StratifiedKFold {
    n_splits: usize,
    seed: u64,
}

impl StratifiedKFold {
    pub fn new(n_splits: usize, seed: u64) -> Self {
        Self { n_splits, seed }
    }

    /// Generate train/test splits maintaining class distribution per fold
    pub fn split(&self, labels: &[i64]) -> Result<Vec<CVSplit>> {
        if self.n_splits < 2 {
            return Err(SentimentyError::ValidationError(
                "n_splits must be at least 2".to_string(),
            ));
        }

        let by_class = indices_by_class(labels);
        for (class, indices) in &by_class {
            if indices.len() < self.n_splits {
                return Err(SentimentyError::ValidationError(format!(
                    "class {} has {} samples, fewer than n_splits ({})",
                    class,
                    indices.len(),
                    self.n_splits
                )));
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        // Distribute each class round-robin over the folds after shuffling
        let mut folds: Vec<Vec<usize>> = vec![Vec::new(); self.n_splits];
        for (_class, mut indices) in by_class {
            indices.shuffle(&mut rng);
            for (i, idx) in indices.into_iter().enumerate() {
                folds[i % self.n_splits].push(idx);
            }
        }

        let mut splits = Vec::with_capacity(self.n_splits);
        for fold_idx in 0..self.n_splits {
            let mut test_indices = folds[fold_idx].clone();
            let mut train_indices: Vec<usize> = folds
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != fold_idx)
                .flat_map(|(_, f)| f.iter().copied())
                .collect();
            test_indices.sort_unstable();
            train_indices.sort_unstable();

            splits.push(CVSplit {
                train_indices,
                test_indices,
                fold_idx,
            });
        }

        Ok(splits)
    }
}

/// Cross-validation fold scores with summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CVResults {
    pub scores: Vec<f64>,
    pub mean_score: f64,
    pub std_score: f64,
    pub n_folds: usize,
}

impl CVResults {
    pub fn from_scores(scores: Vec<f64>) -> Self {
        let n_folds = scores.len();
        let mean_score = scores.iter().sum::<f64>() / n_folds as f64;
        let variance =
            scores.iter().map(|s| (s - mean_score).powi(2)).sum::<f64>() / n_folds as f64;
        Self {
            scores,
            mean_score,
            std_score: variance.sqrt(),
            n_folds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced_labels() -> Vec<i64> {
        // 10 samples per class, interleaved
        (0..30).map(|i| (i % 3) as i64).collect()
    }

    #[test]
    fn test_holdout_is_deterministic() {
        let labels = balanced_labels();
        let (train_a, test_a) = train_test_split(&labels, 0.2, 42).unwrap();
        let (train_b, test_b) = train_test_split(&labels, 0.2, 42).unwrap();
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
    }

    #[test]
    fn test_holdout_differs_across_seeds() {
        let labels = balanced_labels();
        let (_, test_a) = train_test_split(&labels, 0.2, 42).unwrap();
        let (_, test_b) = train_test_split(&labels, 0.2, 43).unwrap();
        assert_ne!(test_a, test_b);
    }

    #[test]
    fn test_holdout_preserves_class_proportions() {
        // 30 rows, 10 per class, fraction 0.2: 6 test rows, 2 per class
        let labels = balanced_labels();
        let (train, test) = train_test_split(&labels, 0.2, 42).unwrap();
        assert_eq!(test.len(), 6);
        assert_eq!(train.len(), 24);

        for class in 0..3i64 {
            let in_test = test.iter().filter(|&&i| labels[i] == class).count();
            assert_eq!(in_test, 2, "class {class} should hold out exactly 2 rows");
        }

        // Partitions are disjoint and cover everything
        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_holdout_rejects_singleton_class() {
        let labels = vec![0, 0, 0, 1];
        assert!(train_test_split(&labels, 0.2, 42).is_err());
    }

    #[test]
    fn test_stratified_k_fold_balance() {
        let labels = balanced_labels();
        let splits = StratifiedKFold::new(5, 42).split(&labels).unwrap();
        assert_eq!(splits.len(), 5);

        for split in &splits {
            assert_eq!(split.test_indices.len(), 6);
            assert_eq!(split.train_indices.len(), 24);
            for class in 0..3i64 {
                let in_test = split
                    .test_indices
                    .iter()
                    .filter(|&&i| labels[i] == class)
                    .count();
                assert_eq!(in_test, 2);
            }
        }

        // Every index appears in exactly one test fold
        let mut all_test: Vec<usize> = splits
            .iter()
            .flat_map(|s| s.test_indices.iter().copied())
            .collect();
        all_test.sort_unstable();
        assert_eq!(all_test, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_k_fold_rejects_small_class() {
        let labels = vec![0, 0, 0, 1, 1, 1, 2, 2];
        let result = StratifiedKFold::new(5, 42).split(&labels);
        assert!(result.is_err());
    }

    #[test]
    fn test_cv_results_summary() {
        let results = CVResults::from_scores(vec![0.8, 0.9, 1.0]);
        assert_eq!(results.n_folds, 3);
        assert!((results.mean_score - 0.9).abs() < 1e-12);
        assert!(results.std_score > 0.0);
    }
}
