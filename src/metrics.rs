//! Classification metrics: accuracy, per-class report, confusion matrix

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Fraction of predictions matching the true labels
pub fn accuracy(y_true: &[i64], y_pred: &[i64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Precision/recall/F1 for one class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class breakdown plus overall accuracy, in canonical label order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub per_class: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_f1: f64,
}

impl ClassificationReport {
    /// Compute the report over `(id, name)` classes in the given order
    pub fn compute(y_true: &[i64], y_pred: &[i64], classes: &[(i64, String)]) -> Self {
        let mut per_class = Vec::with_capacity(classes.len());

        for (class_id, name) in classes {
            let class_id = *class_id;
            let tp = y_true
                .iter()
                .zip(y_pred.iter())
                .filter(|&(&t, &p)| t == class_id && p == class_id)
                .count();
            let fp = y_true
                .iter()
                .zip(y_pred.iter())
                .filter(|&(&t, &p)| t != class_id && p == class_id)
                .count();
            let fn_ = y_true
                .iter()
                .zip(y_pred.iter())
                .filter(|&(&t, &p)| t == class_id && p != class_id)
                .count();
            let support = y_true.iter().filter(|&&t| t == class_id).count();

            let precision = if tp + fp > 0 {
                tp as f64 / (tp + fp) as f64
            } else {
                0.0
            };
            let recall = if tp + fn_ > 0 {
                tp as f64 / (tp + fn_) as f64
            } else {
                0.0
            };
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            per_class.push(ClassMetrics {
                label: name.clone(),
                precision,
                recall,
                f1,
                support,
            });
        }

        let macro_f1 = if per_class.is_empty() {
            0.0
        } else {
            per_class.iter().map(|c| c.f1).sum::<f64>() / per_class.len() as f64
        };

        Self {
            per_class,
            accuracy: accuracy(y_true, y_pred),
            macro_f1,
        }
    }

    /// Render a text table in the familiar report layout
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:>12} {:>10} {:>10} {:>10} {:>10}\n",
            "", "precision", "recall", "f1-score", "support"
        ));
        out.push('\n');
        for class in &self.per_class {
            out.push_str(&format!(
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
                class.label, class.precision, class.recall, class.f1, class.support
            ));
        }
        let total: usize = self.per_class.iter().map(|c| c.support).sum();
        out.push('\n');
        out.push_str(&format!(
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}\n",
            "accuracy", "", "", self.accuracy, total
        ));
        out.push_str(&format!(
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}\n",
            "macro f1", "", "", self.macro_f1, total
        ));
        out
    }
}

/// Confusion matrix keyed by canonical label order (rows: true, cols: predicted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub labels: Vec<String>,
    pub counts: Vec<Vec<u32>>,
}

impl ConfusionMatrix {
    pub fn compute(y_true: &[i64], y_pred: &[i64], classes: &[(i64, String)]) -> Self {
        let index_of = |id: i64| classes.iter().position(|(c, _)| *c == id);

        let n = classes.len();
        let mut counts = vec![vec![0u32; n]; n];
        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            if let (Some(i), Some(j)) = (index_of(*t), index_of(*p)) {
                counts[i][j] += 1;
            }
        }

        Self {
            labels: classes.iter().map(|(_, name)| name.clone()).collect(),
            counts,
        }
    }

    /// Tabular form: one row per true label, one column per predicted label
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.labels.len() + 1);
        columns.push(Series::new("true_label".into(), self.labels.clone()).into());
        for (j, label) in self.labels.iter().enumerate() {
            let col: Vec<u32> = self.counts.iter().map(|row| row[j]).collect();
            columns.push(Series::new(format!("pred_{label}").into(), col).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}
