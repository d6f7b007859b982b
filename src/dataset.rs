//! Dataset preparation: schema validation, normalization, label encoding

use crate::error::{Result, SentimentyError};
use crate::labels::{LabelMapping, RawLabelColumn};
use crate::text::normalize_text_column;
use polars::prelude::*;

/// Required text column
pub const TEXT_COLUMN: &str = "tweet";
/// Recognized label column
pub const LABEL_COLUMN: &str = "label";
/// Legacy label column name accepted for backward compatibility
pub const LEGACY_LABEL_COLUMN: &str = "Durum";

/// Cleaned training data: normalized texts with parallel encoded labels
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub texts: Vec<String>,
    pub label_ids: Vec<i64>,
    pub mapping: LabelMapping,
}

impl PreparedDataset {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Find the label column, accepting the current or legacy name
pub fn resolve_label_column(df: &DataFrame) -> Result<&'static str> {
    if df.column(LABEL_COLUMN).is_ok() {
        Ok(LABEL_COLUMN)
    } else if df.column(LEGACY_LABEL_COLUMN).is_ok() {
        Ok(LEGACY_LABEL_COLUMN)
    } else {
        Err(SentimentyError::SchemaError(format!(
            "missing label column (expected '{LABEL_COLUMN}' or '{LEGACY_LABEL_COLUMN}')"
        )))
    }
}

/// Validate schema, normalize text and labels, drop incomplete rows, and
/// encode labels to stable integer ids.
///
/// Label normalization is optimistic: unmapped text survives lowercased
/// until this function's encoding step rejects it. Unmapped numeric codes
/// become nulls and are dropped with the other incomplete rows.
pub fn prepare_training_data(df: &DataFrame) -> Result<PreparedDataset> {
    let text_column = df.column(TEXT_COLUMN).map_err(|_| {
        SentimentyError::SchemaError(format!("missing '{TEXT_COLUMN}' column in training data"))
    })?;
    let label_name = resolve_label_column(df)?;
    let label_column = df.column(label_name)?;

    let texts = normalize_text_column(text_column)?;
    let labels = RawLabelColumn::classify(label_column)?.normalize();

    let mapping = LabelMapping::canonical();

    // Drop rows with missing text or missing label, then encode
    let mut kept_texts = Vec::new();
    let mut label_ids = Vec::new();
    let mut invalid = std::collections::BTreeSet::new();

    for (text, label) in texts.into_iter().zip(labels.into_iter()) {
        let (Some(text), Some(label)) = (text, label) else {
            continue;
        };
        match mapping.id_of(&label) {
            Some(id) => {
                kept_texts.push(text);
                label_ids.push(id);
            }
            None => {
                invalid.insert(label);
            }
        }
    }

    if !invalid.is_empty() {
        return Err(SentimentyError::LabelDomain(format!(
            "found labels outside the expected set: negative/neutral/positive (got {:?})",
            invalid.into_iter().collect::<Vec<_>>()
        )));
    }

    debug_assert_eq!(kept_texts.len(), label_ids.len());
    debug_assert!(label_ids.iter().all(|id| (0..3i64).contains(id)));

    Ok(PreparedDataset {
        texts: kept_texts,
        label_ids,
        mapping,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_numeric_labels() {
        let df = df!(
            "tweet" => &["  GOOD day ", "Bad Day", "meh"],
            "label" => &[1i64, -1, 0],
        )
        .unwrap();

        let prepared = prepare_training_data(&df).unwrap();
        assert_eq!(prepared.texts, vec!["good day", "bad day", "meh"]);
        assert_eq!(prepared.label_ids, vec![2, 0, 1]);
    }

    #[test]
    fn test_prepare_textual_labels_with_aliases() {
        let df = df!(
            "tweet" => &["harika", "berbat", "idare eder"],
            "label" => &["Pozitif", "NEGATIF", "notr"],
        )
        .unwrap();

        let prepared = prepare_training_data(&df).unwrap();
        assert_eq!(prepared.label_ids, vec![2, 0, 1]);
    }

    #[test]
    fn test_legacy_label_column_accepted() {
        let df = df!(
            "tweet" => &["iyi", "kötü"],
            "Durum" => &[1i64, -1],
        )
        .unwrap();

        let prepared = prepare_training_data(&df).unwrap();
        assert_eq!(prepared.label_ids, vec![2, 0]);
    }

    #[test]
    fn test_missing_text_column_is_schema_error() {
        let df = df!(
            "body" => &["hello"],
            "label" => &[1i64],
        )
        .unwrap();

        let result = prepare_training_data(&df);
        match result {
            Err(SentimentyError::SchemaError(msg)) => assert!(msg.contains("tweet")),
            other => panic!("expected SchemaError, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_label_column_is_schema_error() {
        let df = df!("tweet" => &["hello"]).unwrap();

        let result = prepare_training_data(&df);
        match result {
            Err(SentimentyError::SchemaError(msg)) => {
                assert!(msg.contains("label"));
                assert!(msg.contains("Durum"));
            }
            other => panic!("expected SchemaError, got {other:?}"),
        }
    }

    #[test]
    fn test_rows_with_missing_values_dropped() {
        let df = df!(
            "tweet" => &[Some("keep me"), None, Some("also keep")],
            "label" => &[Some(1i64), Some(0), Some(-1)],
        )
        .unwrap();

        let prepared = prepare_training_data(&df).unwrap();
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared.texts, vec!["keep me", "also keep"]);
    }

    #[test]
    fn test_unmapped_numeric_codes_are_dropped_not_rejected() {
        let df = df!(
            "tweet" => &["ok", "odd"],
            "label" => &[1i64, 7],
        )
        .unwrap();

        let prepared = prepare_training_data(&df).unwrap();
        assert_eq!(prepared.len(), 1);
    }

    #[test]
    fn test_unmapped_text_labels_fail_at_encoding() {
        // Two-phase contract: normalization passes "Garbage" through
        // lowercased, and only the encoding step here rejects it.
        let df = df!(
            "tweet" => &["ok", "odd"],
            "label" => &["pozitif", "Garbage"],
        )
        .unwrap();

        let result = prepare_training_data(&df);
        match result {
            Err(SentimentyError::LabelDomain(msg)) => {
                assert!(msg.contains("negative/neutral/positive"));
                assert!(msg.contains("garbage"));
            }
            other => panic!("expected LabelDomain, got {other:?}"),
        }
    }
}
