//! Multinomial logistic regression

use crate::error::{Result, SentimentyError};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Linear classifier with softmax outputs, fitted by gradient descent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxRegression {
    /// Fitted weights, one row per class
    weights: Option<Array2<f64>>,
    /// Fitted intercepts, one per class
    intercepts: Option<Array1<f64>>,
    /// Class ids observed during fitting, ascending
    classes: Vec<i64>,
    /// Regularization strength (L2)
    pub alpha: f64,
    /// Learning rate
    pub learning_rate: f64,
    /// Maximum iterations
    pub max_iter: usize,
    /// Convergence tolerance on the gradient norm
    pub tol: f64,
    /// Whether the model is fitted
    pub is_fitted: bool,
}

impl Default for SoftmaxRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftmaxRegression {
    pub fn new() -> Self {
        Self {
            weights: None,
            intercepts: None,
            classes: Vec::new(),
            alpha: 0.01,
            learning_rate: 0.1,
            max_iter: 10_000,
            tol: 1e-6,
            is_fitted: false,
        }
    }

    /// Set regularization strength
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set learning rate
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Class ids observed during fitting, in ascending order
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Row-wise softmax with max-subtraction for numeric stability
    fn softmax(mut scores: Array2<f64>) -> Array2<f64> {
        for mut row in scores.rows_mut() {
            let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            row.mapv_inplace(|v| (v - max).exp());
            let sum: f64 = row.sum();
            if sum > 0.0 {
                row.mapv_inplace(|v| v / sum);
            }
        }
        scores
    }

    fn scores(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let weights = self.weights.as_ref().ok_or(SentimentyError::ModelNotFitted)?;
        let intercepts = self
            .intercepts
            .as_ref()
            .ok_or(SentimentyError::ModelNotFitted)?;

        let mut scores = x.dot(&weights.t());
        for mut row in scores.rows_mut() {
            row += intercepts;
        }
        Ok(scores)
    }

    /// Fit the model using batch gradient descent
    pub fn fit(&mut self, x: &Array2<f64>, y: &[i64]) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(SentimentyError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(SentimentyError::ValidationError(
                "cannot fit on an empty matrix".to_string(),
            ));
        }

        // Observed classes, ascending
        let mut classes: Vec<i64> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        let class_index: HashMap<i64, usize> =
            classes.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        let n_classes = classes.len();

        // One-hot targets
        let mut targets = Array2::zeros((n_samples, n_classes));
        for (i, label) in y.iter().enumerate() {
            targets[[i, class_index[label]]] = 1.0;
        }

        let mut weights: Array2<f64> = Array2::zeros((n_classes, n_features));
        let mut intercepts: Array1<f64> = Array1::zeros(n_classes);

        let lr = self.learning_rate;
        let alpha = self.alpha;

        for _iter in 0..self.max_iter {
            // Forward pass
            let mut scores = x.dot(&weights.t());
            for mut row in scores.rows_mut() {
                row += &intercepts;
            }
            let probs = Self::softmax(scores);

            // Gradients
            let errors = &probs - &targets;
            let grad_w = errors.t().dot(x) / n_samples as f64 + alpha * &weights;
            let grad_b = errors.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(n_classes));

            // Convergence check
            let grad_norm = (grad_w.iter().map(|v| v * v).sum::<f64>()
                + grad_b.iter().map(|v| v * v).sum::<f64>())
            .sqrt();
            if grad_norm < self.tol {
                break;
            }

            weights = weights - lr * &grad_w;
            intercepts = intercepts - lr * &grad_b;
        }

        self.weights = Some(weights);
        self.intercepts = Some(intercepts);
        self.classes = classes;
        self.is_fitted = true;

        Ok(self)
    }

    /// Per-class probabilities, rows summing to 1, columns in `classes()` order
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(SentimentyError::ModelNotFitted);
        }
        Ok(Self::softmax(self.scores(x)?))
    }

    /// Predicted class ids
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<i64>> {
        let probs = self.predict_proba(x)?;
        Ok(probs
            .rows()
            .into_iter()
            .map(|row| {
                let best = row
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.classes[best]
            })
            .collect())
    }

    /// Accuracy on labeled data
    pub fn score(&self, x: &Array2<f64>, y: &[i64]) -> Result<f64> {
        let preds = self.predict(x)?;
        let correct = preds.iter().zip(y.iter()).filter(|(p, t)| p == t).count();
        Ok(correct as f64 / y.len() as f64)
    }
}
