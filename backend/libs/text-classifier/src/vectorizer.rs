/// TF-IDF Vectorizer
///
/// Rebuilds a word-level TF-IDF vectorizer from its exported vocabulary and
/// idf weights. The transform matches the training-time pipeline:
///
/// 1. lowercase (optional)
/// 2. tokenize with `token_pattern`
/// 3. drop stop words, expand word n-grams
/// 4. count vocabulary terms (binary / sublinear tf optional)
/// 5. multiply by idf, normalize each row (l2 by default)
use crate::error::{ClassifierError, Result};
use ndarray::Array2;
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Converts raw text documents into a fixed-width numeric feature matrix.
pub trait TextVectorizer: Send + Sync {
    /// Width of every row produced by [`TextVectorizer::transform`].
    fn n_features(&self) -> usize;

    /// One row per document, in input order.
    fn transform(&self, documents: &[String]) -> Result<Array2<f64>>;
}

/// Row normalization applied after idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk shape of the vectorizer artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfArtifact {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    lowercase: bool,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    binary: bool,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("use_idf", &self.idf.is_some())
            .field("ngram_range", &self.ngram_range)
            .field("norm", &self.norm)
            .finish()
    }
}

impl TfidfVectorizer {
    /// Validate an exported artifact and compile its token pattern.
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self> {
        let width = artifact.vocabulary.len();
        if width == 0 {
            return Err(ClassifierError::InvalidArtifact(
                "vectorizer vocabulary is empty".to_string(),
            ));
        }

        if let Some((term, index)) = artifact.vocabulary.iter().find(|(_, idx)| **idx >= width) {
            return Err(ClassifierError::InvalidArtifact(format!(
                "vocabulary term '{}' maps to column {} but only {} columns exist",
                term, index, width
            )));
        }

        let distinct: HashSet<usize> = artifact.vocabulary.values().copied().collect();
        if distinct.len() != width {
            return Err(ClassifierError::InvalidArtifact(
                "vocabulary maps several terms to the same column".to_string(),
            ));
        }

        if let Some(idf) = &artifact.idf {
            if idf.len() != width {
                return Err(ClassifierError::InvalidArtifact(format!(
                    "idf has {} weights for a vocabulary of {} terms",
                    idf.len(),
                    width
                )));
            }
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::InvalidArtifact(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        let token_pattern = Regex::new(&artifact.token_pattern)?;
        // group 0 plus at most one explicit group
        if token_pattern.captures_len() > 2 {
            return Err(ClassifierError::InvalidArtifact(
                "token_pattern has more than one capturing group".to_string(),
            ));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            token_pattern,
            ngram_range: artifact.ngram_range,
            stop_words: artifact.stop_words.into_iter().collect(),
            binary: artifact.binary,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
        })
    }

    /// Terms a document contributes before vocabulary lookup.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let text = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };

        let tokens: Vec<String> = if self.token_pattern.captures_len() == 2 {
            self.token_pattern
                .captures_iter(&text)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
                .collect()
        } else {
            self.token_pattern
                .find_iter(&text)
                .map(|m| m.as_str().to_string())
                .collect()
        };

        let tokens = tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(token))
            .collect();

        self.word_ngrams(tokens)
    }

    fn word_ngrams(&self, tokens: Vec<String>) -> Vec<String> {
        let (mut min_n, max_n) = self.ngram_range;
        if max_n == 1 {
            return tokens;
        }

        let mut terms = Vec::new();
        if min_n == 1 {
            terms.extend(tokens.iter().cloned());
            min_n += 1;
        }

        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }

        terms
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    fn transform(&self, documents: &[String]) -> Result<Array2<f64>> {
        let mut matrix = Array2::<f64>::zeros((documents.len(), self.n_features()));

        for (row, document) in documents.iter().enumerate() {
            let mut features = matrix.row_mut(row);

            for term in self.analyze(document) {
                if let Some(&column) = self.vocabulary.get(&term) {
                    features[column] += 1.0;
                }
            }

            if self.binary {
                features.mapv_inplace(|count| if count > 0.0 { 1.0 } else { 0.0 });
            }

            if self.sublinear_tf {
                features.mapv_inplace(|count| if count > 0.0 { count.ln() + 1.0 } else { 0.0 });
            }

            if let Some(idf) = &self.idf {
                for (value, weight) in features.iter_mut().zip(idf.iter()) {
                    *value *= weight;
                }
            }

            let length = match self.norm {
                Some(Norm::L2) => features.iter().map(|v| v * v).sum::<f64>().sqrt(),
                Some(Norm::L1) => features.iter().map(|v| v.abs()).sum::<f64>(),
                None => 0.0,
            };
            if length > 0.0 {
                features.mapv_inplace(|v| v / length);
            }
        }

        Ok(matrix)
    }
}
