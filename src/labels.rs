//! Label domain: canonical classes, normalization, and the id mapping
//!
//! Raw labels arrive either as numeric codes (`1`, `-1`, `0`) or as free-text
//! spellings in Turkish or English. Normalization is optimistic: an unmapped
//! text value passes through lowercased and is only rejected later when the
//! dataset preparer encodes labels. That two-phase contract is intentional
//! and covered by tests.

use crate::error::{Result, SentimentyError};
use crate::io;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Sentinel label name for predicted ids absent from the loaded mapping
pub const UNKNOWN_LABEL: &str = "unknown";

/// The three canonical sentiment classes, in fixed total order.
///
/// The declaration order is the single source of truth for label-id
/// assignment: ids are identical across every dataset and run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Negative,
    Neutral,
    Positive,
}

impl Label {
    /// Canonical class order used for ids, reports, and confusion matrices
    pub const ORDER: [Label; 3] = [Label::Negative, Label::Neutral, Label::Positive];

    /// Canonical string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Negative => "negative",
            Label::Neutral => "neutral",
            Label::Positive => "positive",
        }
    }

    /// Parse a canonical label string
    pub fn from_canonical(s: &str) -> Option<Label> {
        match s {
            "negative" => Some(Label::Negative),
            "neutral" => Some(Label::Neutral),
            "positive" => Some(Label::Positive),
            _ => None,
        }
    }

    /// Map an original numeric code to its class
    pub fn from_numeric(code: i64) -> Option<Label> {
        match code {
            1 => Some(Label::Positive),
            -1 => Some(Label::Negative),
            0 => Some(Label::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a free-text label: lowercase, resolve known spellings, and fall
/// back to the lowercased value itself when no alias matches.
///
/// The fallback is deliberate: validation happens at encode time, not here.
pub fn normalize_text_label(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    match lowered.as_str() {
        "pozitif" | "positive" => "positive".to_string(),
        "negatif" | "negative" => "negative".to_string(),
        "nötr" | "notr" | "neutral" => "neutral".to_string(),
        _ => lowered,
    }
}

/// A label column classified once at ingestion as numeric or textual.
///
/// The dtype decision is made a single time here; every later stage
/// dispatches on the variant instead of re-inspecting the column.
#[derive(Debug, Clone)]
pub enum RawLabelColumn {
    Numeric(Vec<Option<i64>>),
    Textual(Vec<Option<String>>),
}

impl RawLabelColumn {
    /// Classify a polars column by its dtype
    pub fn classify(column: &Column) -> Result<Self> {
        if column.dtype().is_primitive_numeric() {
            let as_i64 = column.cast(&DataType::Int64)?;
            let values = as_i64.i64()?.into_iter().collect();
            Ok(RawLabelColumn::Numeric(values))
        } else {
            let as_str = column.cast(&DataType::String)?;
            let values = as_str
                .str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect();
            Ok(RawLabelColumn::Textual(values))
        }
    }

    /// Normalize every value to a canonical label string where possible.
    ///
    /// Numeric codes outside the fixed table become `None` and are dropped
    /// downstream; unmapped text passes through lowercased and is rejected
    /// at encode time.
    pub fn normalize(self) -> Vec<Option<String>> {
        match self {
            RawLabelColumn::Numeric(values) => values
                .into_iter()
                .map(|v| v.and_then(Label::from_numeric).map(|l| l.as_str().to_string()))
                .collect(),
            RawLabelColumn::Textual(values) => values
                .into_iter()
                .map(|v| v.map(|s| normalize_text_label(&s)))
                .collect(),
        }
    }
}

/// On-disk shape of the label map artifact.
///
/// `id_to_label` keys are strings purely as a serialization-format
/// constraint; the coercion back to integers lives entirely in
/// [`LabelMapping::load`].
#[derive(Debug, Serialize, Deserialize)]
struct LabelMapFile {
    label_to_id: BTreeMap<String, i64>,
    id_to_label: BTreeMap<String, String>,
}

/// Bijection between canonical label strings and contiguous integer ids.
///
/// Derived solely from [`Label::ORDER`], never from observed data. Owned by
/// the trainer at creation, persisted as an artifact, loaded read-only by
/// the evaluator and predictor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMapping {
    label_to_id: BTreeMap<String, i64>,
    id_to_label: BTreeMap<i64, String>,
}

impl LabelMapping {
    /// Build the canonical mapping from the fixed class order
    pub fn canonical() -> Self {
        let mut label_to_id = BTreeMap::new();
        let mut id_to_label = BTreeMap::new();
        for (idx, label) in Label::ORDER.iter().enumerate() {
            label_to_id.insert(label.as_str().to_string(), idx as i64);
            id_to_label.insert(idx as i64, label.as_str().to_string());
        }
        Self { label_to_id, id_to_label }
    }

    /// Look up the id for a label string
    pub fn id_of(&self, label: &str) -> Option<i64> {
        self.label_to_id.get(label).copied()
    }

    /// Look up the label string for an id
    pub fn label_of(&self, id: i64) -> Option<&str> {
        self.id_to_label.get(&id).map(|s| s.as_str())
    }

    /// Number of mapped classes
    pub fn len(&self) -> usize {
        self.label_to_id.len()
    }

    /// Whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.label_to_id.is_empty()
    }

    /// Label strings in ascending id order
    pub fn labels_in_id_order(&self) -> Vec<&str> {
        self.id_to_label.values().map(|s| s.as_str()).collect()
    }

    /// Persist both mapping directions as a UTF-8 JSON artifact
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = LabelMapFile {
            label_to_id: self.label_to_id.clone(),
            id_to_label: self
                .id_to_label
                .iter()
                .map(|(id, label)| (id.to_string(), label.clone()))
                .collect(),
        };
        io::save_json(&file, path)
    }

    /// Load a persisted mapping, converting string keys back to integers
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SentimentyError::ArtifactMissing {
                path: path.to_path_buf(),
            });
        }
        let file: LabelMapFile = io::load_json(path)?;
        let mut id_to_label = BTreeMap::new();
        for (key, label) in file.id_to_label {
            let id: i64 = key.parse().map_err(|_| {
                SentimentyError::SerializationError(format!(
                    "non-integer id key in label map: {key:?}"
                ))
            })?;
            id_to_label.insert(id, label);
        }
        Ok(Self {
            label_to_id: file.label_to_id,
            id_to_label,
        })
    }
}
