//! Sentimenty - Offline tweet sentiment pipeline
//!
//! Trains, evaluates, and applies a text sentiment classifier over short
//! social-media posts, and reports temporal distributions of negative
//! posts. Four batch operations, each runnable standalone:
//!
//! - **train** - normalize labels, fit the TF-IDF + logistic pipeline with
//!   a stratified holdout, persist model + label map artifacts
//! - **evaluate** - reload the artifacts, reproduce the holdout split, and
//!   report per-class metrics with a confusion matrix
//! - **predict** - label a fresh unlabeled corpus with ids, names, and
//!   per-class probabilities
//! - **analyze** - time-of-day / weekday / season distributions of
//!   negative tweets
//!
//! # Modules
//!
//! - [`labels`] - canonical classes, normalization, label-id mapping
//! - [`text`] - shared text normalization
//! - [`pipeline`] - TF-IDF vectorizer + multinomial logistic classifier
//! - [`dataset`] - schema validation and label encoding
//! - [`split`] - deterministic stratified splitting
//! - [`train`], [`evaluate`], [`predict`] - the core operations
//! - [`analysis`] - negative-tweet time distributions
//! - [`metrics`] - accuracy, classification report, confusion matrix
//! - [`config`] - explicit per-operation configuration
//! - [`fetch`] - offline-first API placeholder
//! - [`cli`] - command-line interface

pub mod error;

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod evaluate;
pub mod fetch;
pub mod io;
pub mod labels;
pub mod metrics;
pub mod pipeline;
pub mod predict;
pub mod split;
pub mod text;
pub mod train;

pub use error::{Result, SentimentyError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::PipelineConfig;
    pub use crate::dataset::{prepare_training_data, PreparedDataset};
    pub use crate::error::{Result, SentimentyError};
    pub use crate::evaluate::{evaluate_model, EvaluationSummary};
    pub use crate::labels::{Label, LabelMapping};
    pub use crate::metrics::{ClassificationReport, ConfusionMatrix};
    pub use crate::pipeline::SentimentPipeline;
    pub use crate::predict::predict_batch;
    pub use crate::split::{train_test_split, CVResults, StratifiedKFold};
    pub use crate::text::normalize_text;
    pub use crate::train::{train_model, TrainingSummary};
}
