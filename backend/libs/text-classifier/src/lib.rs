//! Text classification artifacts
//!
//! Loads a fitted TF-IDF vectorizer and a fitted decision-tree classifier
//! exported by the training pipeline as JSON documents, and runs them
//! read-only to map free-text descriptions onto category labels.
//!
//! ```text
//! descriptions ──▶ TextVectorizer::transform ──▶ Array2<f64> ──▶ Classifier::predict ──▶ labels
//! ```
//!
//! The pair is loaded once at startup through [`ArtifactPair::load`] and
//! shared across request handlers behind an `Arc`.

pub mod artifacts;
pub mod error;
pub mod label;
pub mod tree;
pub mod vectorizer;

pub use artifacts::ArtifactPair;
pub use error::{ClassifierError, Result};
pub use label::Label;
pub use tree::{Classifier, DecisionTreeClassifier};
pub use vectorizer::{Norm, TextVectorizer, TfidfVectorizer};
