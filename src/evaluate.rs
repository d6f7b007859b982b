//! Evaluation: reload the persisted model, reproduce the holdout, report

use crate::config::PipelineConfig;
use crate::dataset::prepare_training_data;
use crate::error::Result;
use crate::io;
use crate::metrics::{ClassificationReport, ConfusionMatrix};
use crate::pipeline::SentimentPipeline;
use crate::split::train_test_split;
use tracing::info;

/// Evaluation output: per-class report and confusion matrix on the holdout
#[derive(Debug, Clone)]
pub struct EvaluationSummary {
    pub report: ClassificationReport,
    pub confusion: ConfusionMatrix,
    pub n_test: usize,
}

/// Evaluate the persisted pipeline on the reproduced holdout partition.
///
/// The same seed and test fraction as training reproduce the identical
/// split, so the metrics describe exactly the data withheld from fitting.
pub fn evaluate_model(config: &PipelineConfig) -> Result<EvaluationSummary> {
    let pipeline = SentimentPipeline::load(&config.model_path())?;

    let df = io::read_csv(&config.labeled_data_path())?;
    let prepared = prepare_training_data(&df)?;

    let (_, test_indices) =
        train_test_split(&prepared.label_ids, config.test_fraction, config.random_seed)?;

    let test_texts: Vec<String> = test_indices
        .iter()
        .map(|&i| prepared.texts[i].clone())
        .collect();
    let y_true: Vec<i64> = test_indices.iter().map(|&i| prepared.label_ids[i]).collect();

    let y_pred = pipeline.predict(&test_texts)?;

    // Canonical label order keys both the report and the confusion matrix
    let classes: Vec<(i64, String)> = prepared
        .mapping
        .labels_in_id_order()
        .into_iter()
        .enumerate()
        .map(|(id, name)| (id as i64, name.to_string()))
        .collect();

    let report = ClassificationReport::compute(&y_true, &y_pred, &classes);
    let confusion = ConfusionMatrix::compute(&y_true, &y_pred, &classes);

    let confusion_path = config.report_path("confusion_matrix.csv");
    let mut confusion_df = confusion.to_dataframe()?;
    io::write_csv(&mut confusion_df, &confusion_path)?;
    info!(path = %confusion_path.display(), "wrote confusion matrix");

    Ok(EvaluationSummary {
        report,
        confusion,
        n_test: test_texts.len(),
    })
}
