//! Batch prediction on unlabeled data

use crate::config::PipelineConfig;
use crate::dataset::TEXT_COLUMN;
use crate::error::{Result, SentimentyError};
use crate::io;
use crate::labels::{LabelMapping, UNKNOWN_LABEL};
use crate::pipeline::SentimentPipeline;
use crate::text::normalize_text_column;
use polars::prelude::*;
use tracing::info;

/// Predict labels for the unlabeled corpus and write the output table.
///
/// The output keeps every original column and adds `pred_label_id`,
/// `pred_label`, and one `proba_<label>` column per class known to the
/// fitted model. Predicted ids absent from the loaded label map get the
/// "unknown" sentinel instead of failing the batch.
pub fn predict_batch(config: &PipelineConfig) -> Result<DataFrame> {
    let pipeline = SentimentPipeline::load(&config.model_path())?;
    let mapping = LabelMapping::load(&config.label_map_path())?;

    let df = io::read_csv(&config.unlabeled_data_path())?;
    let augmented = predict_frame(&pipeline, &mapping, &df)?;

    let mut out = augmented.clone();
    let output_path = config.predictions_path();
    io::write_csv(&mut out, &output_path)?;
    info!(
        rows = augmented.height(),
        path = %output_path.display(),
        "saved predictions"
    );

    Ok(augmented)
}

/// Predict on an in-memory table, returning the augmented table.
///
/// Text normalization is the same routine the trainer used, applied to the
/// same column.
pub fn predict_frame(
    pipeline: &SentimentPipeline,
    mapping: &LabelMapping,
    df: &DataFrame,
) -> Result<DataFrame> {
    let text_column = df.column(TEXT_COLUMN).map_err(|_| {
        SentimentyError::SchemaError(format!(
            "missing '{TEXT_COLUMN}' column in prediction data"
        ))
    })?;

    let texts: Vec<String> = normalize_text_column(text_column)?
        .into_iter()
        .map(|v| v.unwrap_or_default())
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(TEXT_COLUMN.into(), texts.clone()))?;

    let preds = pipeline.predict(&texts)?;
    let names: Vec<String> = preds
        .iter()
        .map(|&id| {
            mapping
                .label_of(id)
                .unwrap_or(UNKNOWN_LABEL)
                .to_string()
        })
        .collect();

    out.with_column(Series::new("pred_label_id".into(), preds))?;
    out.with_column(Series::new("pred_label".into(), names))?;

    // One probability column per class the fitted model can emit, named by
    // the mapped label or the raw id when the mapping lacks an entry.
    let probs = pipeline.predict_proba(&texts)?;
    for (col_idx, &class_id) in pipeline.classes().iter().enumerate() {
        let name = mapping
            .label_of(class_id)
            .map(|s| s.to_string())
            .unwrap_or_else(|| class_id.to_string());
        let values: Vec<f64> = probs.column(col_idx).to_vec();
        out.with_column(Series::new(format!("proba_{name}").into(), values))?;
    }

    Ok(out)
}
