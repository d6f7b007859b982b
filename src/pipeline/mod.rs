//! Feature/model pipeline
//!
//! A composed transform: TF-IDF n-gram vectorization feeding a multinomial
//! logistic classifier. The pipeline is the unit of persistence: vectorizer
//! vocabulary and classifier weights are serialized together so inference
//! never needs to re-fit vocabulary.

pub mod classifier;
pub mod vectorizer;

pub use classifier::SoftmaxRegression;
pub use vectorizer::{CountVectorizer, TextTokenizer, TfidfVectorizer};

use crate::error::{Result, SentimentyError};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// The fitted unit: vectorizer + classifier, persisted as one artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentPipeline {
    vectorizer: TfidfVectorizer,
    classifier: SoftmaxRegression,
    is_fitted: bool,
}

impl SentimentPipeline {
    /// Build the pipeline with its fixed hyperparameters:
    /// unigrams + bigrams, document-frequency floor of 2.
    pub fn new() -> Self {
        Self {
            vectorizer: TfidfVectorizer::new().with_ngram_range(1, 2).with_min_df(2),
            classifier: SoftmaxRegression::new(),
            is_fitted: false,
        }
    }

    /// Fit vectorizer and classifier on normalized texts and label ids
    pub fn fit(&mut self, texts: &[String], label_ids: &[i64]) -> Result<&mut Self> {
        let x = self.vectorizer.fit_transform(texts)?;
        self.classifier.fit(&x, label_ids)?;
        self.is_fitted = true;
        Ok(self)
    }

    /// Predict label ids for normalized texts
    pub fn predict(&self, texts: &[String]) -> Result<Vec<i64>> {
        if !self.is_fitted {
            return Err(SentimentyError::ModelNotFitted);
        }
        let x = self.vectorizer.transform(texts)?;
        self.classifier.predict(&x)
    }

    /// Per-class probabilities, columns in `classes()` order
    pub fn predict_proba(&self, texts: &[String]) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(SentimentyError::ModelNotFitted);
        }
        let x = self.vectorizer.transform(texts)?;
        self.classifier.predict_proba(&x)
    }

    /// Accuracy on labeled data
    pub fn score(&self, texts: &[String], label_ids: &[i64]) -> Result<f64> {
        if !self.is_fitted {
            return Err(SentimentyError::ModelNotFitted);
        }
        let x = self.vectorizer.transform(texts)?;
        self.classifier.score(&x, label_ids)
    }

    /// Class ids known to the fitted classifier
    pub fn classes(&self) -> &[i64] {
        self.classifier.classes()
    }

    /// Size of the fitted vocabulary
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Persist the fitted pipeline as an opaque binary artifact
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            crate::io::ensure_dir(parent)?;
        }
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Load a persisted pipeline, failing with a "train first" error when absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SentimentyError::ArtifactMissing {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let pipeline: Self = bincode::deserialize_from(reader)?;
        Ok(pipeline)
    }
}

impl Default for SentimentPipeline {
    fn default() -> Self {
        Self::new()
    }
}
