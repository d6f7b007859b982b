//! Pipeline configuration
//!
//! A single `PipelineConfig` value is passed explicitly into every operation.
//! Keeping paths, seeds, and evaluation defaults together avoids scattered
//! magic values and lets tests run against temporary directories with
//! alternate seeds.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the train/evaluate/predict/analyze operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding input CSV files
    pub data_dir: PathBuf,
    /// Directory for persisted model artifacts
    pub models_dir: PathBuf,
    /// Directory for prediction and analysis outputs
    pub reports_dir: PathBuf,
    /// Labeled corpus file name
    pub labeled_file: String,
    /// Unlabeled corpus file name (prediction input)
    pub unlabeled_file: String,
    /// Fitted pipeline artifact file name
    pub model_file: String,
    /// Label map artifact file name
    pub label_map_file: String,
    /// Prediction output file name
    pub predictions_file: String,
    /// Seed for every shuffle in the pipeline
    pub random_seed: u64,
    /// Holdout fraction for the stratified split
    pub test_fraction: f64,
    /// Number of stratified cross-validation folds
    pub cv_folds: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            models_dir: PathBuf::from("models"),
            reports_dir: PathBuf::from("reports"),
            labeled_file: "tweets_labeled.csv".to_string(),
            unlabeled_file: "tweets_21.csv".to_string(),
            model_file: "sentiment_model.bin".to_string(),
            label_map_file: "label_map.json".to_string(),
            predictions_file: "predictions_2021.csv".to_string(),
            random_seed: 42,
            test_fraction: 0.2,
            cv_folds: 5,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default file names rooted at the given directories
    pub fn new(
        data_dir: impl Into<PathBuf>,
        models_dir: impl Into<PathBuf>,
        reports_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            models_dir: models_dir.into(),
            reports_dir: reports_dir.into(),
            ..Default::default()
        }
    }

    /// Set the random seed
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Set the holdout test fraction
    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Set the number of cross-validation folds
    pub fn with_cv_folds(mut self, folds: usize) -> Self {
        self.cv_folds = folds;
        self
    }

    /// Set the labeled corpus file name
    pub fn with_labeled_file(mut self, name: impl Into<String>) -> Self {
        self.labeled_file = name.into();
        self
    }

    /// Set the unlabeled corpus file name
    pub fn with_unlabeled_file(mut self, name: impl Into<String>) -> Self {
        self.unlabeled_file = name.into();
        self
    }

    /// Path to the labeled corpus
    pub fn labeled_data_path(&self) -> PathBuf {
        self.data_dir.join(&self.labeled_file)
    }

    /// Path to the unlabeled corpus
    pub fn unlabeled_data_path(&self) -> PathBuf {
        self.data_dir.join(&self.unlabeled_file)
    }

    /// Path to the fitted pipeline artifact
    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(&self.model_file)
    }

    /// Path to the label map artifact
    pub fn label_map_path(&self) -> PathBuf {
        self.models_dir.join(&self.label_map_file)
    }

    /// Path to the prediction output table
    pub fn predictions_path(&self) -> PathBuf {
        self.reports_dir.join(&self.predictions_file)
    }

    /// Path for an analysis report file
    pub fn report_path(&self, name: &str) -> PathBuf {
        self.reports_dir.join(name)
    }

    /// Override the data directory if a value is given
    pub fn override_data_dir(mut self, dir: Option<&Path>) -> Self {
        if let Some(d) = dir {
            self.data_dir = d.to_path_buf();
        }
        self
    }

    /// Override the models directory if a value is given
    pub fn override_models_dir(mut self, dir: Option<&Path>) -> Self {
        if let Some(d) = dir {
            self.models_dir = d.to_path_buf();
        }
        self
    }

    /// Override the reports directory if a value is given
    pub fn override_reports_dir(mut self, dir: Option<&Path>) -> Self {
        if let Some(d) = dir {
            self.reports_dir = d.to_path_buf();
        }
        self
    }
}
