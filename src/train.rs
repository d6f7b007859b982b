//! Training: cross-validate, split, fit, persist

use crate::config::PipelineConfig;
use crate::dataset::{prepare_training_data, PreparedDataset};
use crate::error::Result;
use crate::io;
use crate::pipeline::SentimentPipeline;
use crate::split::{train_test_split, CVResults, StratifiedKFold};
use tracing::info;

/// What training reported and persisted
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    /// Stratified cross-validation accuracy (informational only)
    pub cv: CVResults,
    /// Accuracy on the stratified holdout partition
    pub holdout_accuracy: f64,
    pub n_train: usize,
    pub n_test: usize,
    pub vocabulary_size: usize,
}

/// Select texts and labels at the given indices
fn subset(prepared: &PreparedDataset, indices: &[usize]) -> (Vec<String>, Vec<i64>) {
    let texts = indices.iter().map(|&i| prepared.texts[i].clone()).collect();
    let labels = indices.iter().map(|&i| prepared.label_ids[i]).collect();
    (texts, labels)
}

/// Cross-validated accuracy over the full prepared dataset.
///
/// The score is a reporting signal only; it never alters model selection.
fn cross_validate(prepared: &PreparedDataset, folds: usize, seed: u64) -> Result<CVResults> {
    let splits = StratifiedKFold::new(folds, seed).split(&prepared.label_ids)?;

    let mut scores = Vec::with_capacity(splits.len());
    for split in &splits {
        let (train_texts, train_labels) = subset(prepared, &split.train_indices);
        let (test_texts, test_labels) = subset(prepared, &split.test_indices);

        let mut pipeline = SentimentPipeline::new();
        pipeline.fit(&train_texts, &train_labels)?;
        scores.push(pipeline.score(&test_texts, &test_labels)?);
    }

    Ok(CVResults::from_scores(scores))
}

/// Train the sentiment model and persist the pipeline + label map artifacts.
///
/// Given identical input data and the configured seed, the holdout
/// partition and every reported metric are reproducible across runs.
pub fn train_model(config: &PipelineConfig) -> Result<TrainingSummary> {
    let df = io::read_csv(&config.labeled_data_path())?;
    let prepared = prepare_training_data(&df)?;
    info!(rows = prepared.len(), "prepared training data");

    let cv = cross_validate(&prepared, config.cv_folds, config.random_seed)?;
    info!(
        folds = cv.n_folds,
        mean = cv.mean_score,
        "cross-validated accuracy"
    );

    let (train_indices, test_indices) =
        train_test_split(&prepared.label_ids, config.test_fraction, config.random_seed)?;
    let (train_texts, train_labels) = subset(&prepared, &train_indices);
    let (test_texts, test_labels) = subset(&prepared, &test_indices);

    let mut pipeline = SentimentPipeline::new();
    pipeline.fit(&train_texts, &train_labels)?;
    let holdout_accuracy = pipeline.score(&test_texts, &test_labels)?;
    info!(accuracy = holdout_accuracy, "holdout accuracy");

    pipeline.save(&config.model_path())?;
    prepared.mapping.save(&config.label_map_path())?;
    info!(
        model = %config.model_path().display(),
        label_map = %config.label_map_path().display(),
        "persisted artifacts"
    );

    Ok(TrainingSummary {
        cv,
        holdout_accuracy,
        n_train: train_texts.len(),
        n_test: test_texts.len(),
        vocabulary_size: pipeline.vocabulary_size(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelMapping;

    fn balanced_prepared() -> PreparedDataset {
        let phrases = [
            ("kargo çok geç geldi berbat", 0),
            ("hizmet berbat ve kaba", 0),
            ("telefon bugün geldi", 1),
            ("paket yarın gelecek", 1),
            ("harika ürün çok beğendim", 2),
            ("mükemmel hizmet teşekkürler", 2),
        ];
        let mut texts = Vec::new();
        let mut label_ids = Vec::new();
        for repeat in 0..5 {
            for (text, label) in phrases {
                texts.push(format!("{text} {repeat}"));
                label_ids.push(label);
            }
        }
        PreparedDataset {
            texts,
            label_ids,
            mapping: LabelMapping::canonical(),
        }
    }

    #[test]
    fn test_cross_validate_reports_all_folds() {
        let prepared = balanced_prepared();
        let cv = cross_validate(&prepared, 5, 42).unwrap();
        assert_eq!(cv.n_folds, 5);
        assert!(cv.scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_cross_validate_is_deterministic() {
        let prepared = balanced_prepared();
        let a = cross_validate(&prepared, 5, 42).unwrap();
        let b = cross_validate(&prepared, 5, 42).unwrap();
        assert_eq!(a.scores, b.scores);
    }
}
