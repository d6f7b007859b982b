//! N-gram text vectorization
//!
//! Tokenization is intentionally minimal: no stopword removal, no stemming.
//! The baseline model was validated on the raw lowercased signal, so any
//! enhancement must be an explicit separate configuration rather than a
//! default change here.

use crate::error::{Result, SentimentyError};
use ndarray::{Array1, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Simple text tokenizer: lowercase, split on non-alphanumeric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextTokenizer {
    lowercase: bool,
    min_token_length: usize,
}

impl TextTokenizer {
    pub fn new() -> Self {
        Self {
            lowercase: true,
            min_token_length: 2,
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let processed = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        processed
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .filter(|s| s.chars().count() >= self.min_token_length)
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for TextTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Count-based n-gram vectorizer with a document-frequency floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountVectorizer {
    tokenizer: TextTokenizer,
    vocabulary: HashMap<String, usize>,
    min_df: usize,
    ngram_range: (usize, usize),
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self {
            tokenizer: TextTokenizer::new(),
            vocabulary: HashMap::new(),
            min_df: 1,
            ngram_range: (1, 1),
        }
    }

    /// Discard terms occurring in fewer than `n` documents
    pub fn with_min_df(mut self, n: usize) -> Self {
        self.min_df = n.max(1);
        self
    }

    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        self.ngram_range = (min.max(1), max.max(min));
        self
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn generate_ngrams(&self, tokens: &[String]) -> Vec<String> {
        let mut ngrams = Vec::new();
        for n in self.ngram_range.0..=self.ngram_range.1 {
            if tokens.len() >= n {
                for i in 0..=(tokens.len() - n) {
                    ngrams.push(tokens[i..i + n].join(" "));
                }
            }
        }
        ngrams
    }

    /// Build the vocabulary from the corpus.
    ///
    /// Terms surviving the document-frequency floor are indexed in sorted
    /// order, so the vocabulary is identical for identical input data.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = self.tokenizer.tokenize(doc);
            let ngrams = self.generate_ngrams(&tokens);
            let unique: HashSet<&String> = ngrams.iter().collect();
            for ngram in unique {
                *doc_freq.entry(ngram.clone()).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<String> = doc_freq
            .into_iter()
            .filter(|(_, count)| *count >= self.min_df)
            .map(|(term, _)| term)
            .collect();
        terms.sort_unstable();

        self.vocabulary.clear();
        for (idx, term) in terms.into_iter().enumerate() {
            self.vocabulary.insert(term, idx);
        }

        Ok(())
    }

    fn count_row(&self, doc: &str) -> Vec<f64> {
        let tokens = self.tokenizer.tokenize(doc);
        let ngrams = self.generate_ngrams(&tokens);

        let mut row = vec![0.0; self.vocabulary.len()];
        for ngram in &ngrams {
            if let Some(&idx) = self.vocabulary.get(ngram.as_str()) {
                row[idx] += 1.0;
            }
        }
        row
    }

    /// Map documents to term-count rows
    pub fn transform(&self, documents: &[String]) -> Result<Array2<f64>> {
        if self.vocabulary.is_empty() {
            return Err(SentimentyError::ModelNotFitted);
        }

        let n_features = self.vocabulary.len();
        let rows: Vec<Vec<f64>> = documents.par_iter().map(|doc| self.count_row(doc)).collect();

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((documents.len(), n_features), flat).map_err(|e| {
            SentimentyError::ShapeError {
                expected: format!("{} x {}", documents.len(), n_features),
                actual: e.to_string(),
            }
        })
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Array2<f64>> {
        self.fit(documents)?;
        self.transform(documents)
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// TF-IDF vectorizer: counts scaled by smoothed idf, L2-normalized rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    count_vectorizer: CountVectorizer,
    idf: Option<Array1<f64>>,
    normalize: bool,
    smooth_idf: bool,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            count_vectorizer: CountVectorizer::new(),
            idf: None,
            normalize: true,
            smooth_idf: true,
        }
    }

    pub fn with_min_df(mut self, n: usize) -> Self {
        self.count_vectorizer = self.count_vectorizer.with_min_df(n);
        self
    }

    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        self.count_vectorizer = self.count_vectorizer.with_ngram_range(min, max);
        self
    }

    pub fn vocabulary_size(&self) -> usize {
        self.count_vectorizer.vocabulary_size()
    }

    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        self.count_vectorizer.fit(documents)?;

        let count_matrix = self.count_vectorizer.transform(documents)?;
        let n_docs = documents.len() as f64;
        let n_features = count_matrix.ncols();

        let mut idf = Array1::zeros(n_features);
        for j in 0..n_features {
            let df = count_matrix
                .column(j)
                .iter()
                .filter(|&&v| v > 0.0)
                .count() as f64;

            idf[j] = if self.smooth_idf {
                ((n_docs + 1.0) / (df + 1.0)).ln() + 1.0
            } else {
                (n_docs / df.max(1.0)).ln() + 1.0
            };
        }

        self.idf = Some(idf);
        Ok(())
    }

    pub fn transform(&self, documents: &[String]) -> Result<Array2<f64>> {
        let idf = self.idf.as_ref().ok_or(SentimentyError::ModelNotFitted)?;

        let mut tf_matrix = self.count_vectorizer.transform(documents)?;

        for i in 0..tf_matrix.nrows() {
            for j in 0..tf_matrix.ncols() {
                tf_matrix[[i, j]] *= idf[j];
            }
        }

        if self.normalize {
            for i in 0..tf_matrix.nrows() {
                let norm: f64 = tf_matrix.row(i).iter().map(|&v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for j in 0..tf_matrix.ncols() {
                        tf_matrix[[i, j]] /= norm;
                    }
                }
            }
        }

        Ok(tf_matrix)
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Array2<f64>> {
        self.fit(documents)?;
        self.transform(documents)
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tokenizer_lowercases_and_splits() {
        let tokenizer = TextTokenizer::new();
        let tokens = tokenizer.tokenize("Hello, World! OK");
        assert_eq!(tokens, vec!["hello", "world", "ok"]);
    }

    #[test]
    fn test_tokenizer_drops_single_chars() {
        let tokenizer = TextTokenizer::new();
        let tokens = tokenizer.tokenize("a bb c ddd");
        assert_eq!(tokens, vec!["bb", "ddd"]);
    }

    #[test]
    fn test_ngram_generation() {
        let vectorizer = CountVectorizer::new().with_ngram_range(1, 2);
        let tokens = docs(&["aa", "bb", "cc"]);
        let ngrams = vectorizer.generate_ngrams(&tokens);
        assert_eq!(ngrams, vec!["aa", "bb", "cc", "aa bb", "bb cc"]);
    }

    #[test]
    fn test_min_df_drops_rare_terms() {
        let corpus = docs(&["shared rare1", "shared rare2", "shared rare3"]);
        let mut vectorizer = CountVectorizer::new().with_min_df(2);
        vectorizer.fit(&corpus).unwrap();
        // Only "shared" appears in >= 2 documents
        assert_eq!(vectorizer.vocabulary_size(), 1);
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let vectorizer = CountVectorizer::new();
        let result = vectorizer.transform(&docs(&["hi there"]));
        assert!(matches!(result, Err(SentimentyError::ModelNotFitted)));
    }

    #[test]
    fn test_vocabulary_is_deterministic() {
        let corpus = docs(&["zz aa mm", "aa mm zz", "mm zz aa"]);
        let mut a = CountVectorizer::new();
        let mut b = CountVectorizer::new();
        a.fit(&corpus).unwrap();
        b.fit(&corpus).unwrap();
        assert_eq!(a.vocabulary, b.vocabulary);
        // Sorted term order
        assert_eq!(a.vocabulary["aa"], 0);
        assert_eq!(a.vocabulary["mm"], 1);
        assert_eq!(a.vocabulary["zz"], 2);
    }

    #[test]
    fn test_tfidf_rows_are_unit_norm() {
        let corpus = docs(&["good day today", "bad day today", "good good good"]);
        let mut vectorizer = TfidfVectorizer::new().with_ngram_range(1, 2);
        let matrix = vectorizer.fit_transform(&corpus).unwrap();

        for i in 0..matrix.nrows() {
            let norm: f64 = matrix.row(i).iter().map(|&v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9, "row {i} norm was {norm}");
        }
    }

    #[test]
    fn test_tfidf_unseen_terms_ignored() {
        let corpus = docs(&["alpha beta", "alpha gamma"]);
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus).unwrap();

        let out = vectorizer.transform(&docs(&["delta epsilon"])).unwrap();
        assert!(out.iter().all(|&v| v == 0.0));
    }
}
