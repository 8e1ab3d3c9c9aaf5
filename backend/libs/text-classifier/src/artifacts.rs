use crate::error::{ClassifierError, Result};
use crate::label::Label;
use crate::tree::{Classifier, DecisionTreeArtifact, DecisionTreeClassifier};
use crate::vectorizer::{TextVectorizer, TfidfArtifact, TfidfVectorizer};
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Fitted vectorizer + classifier, immutable after construction.
///
/// Built once at startup and shared read-only between request handlers, so
/// no locking is involved on the prediction path.
pub struct ArtifactPair {
    vectorizer: Box<dyn TextVectorizer>,
    classifier: Box<dyn Classifier>,
}

impl fmt::Debug for ArtifactPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactPair")
            .field("n_features", &self.vectorizer.n_features())
            .finish()
    }
}

impl ArtifactPair {
    /// Pair a vectorizer with a classifier trained on its output.
    pub fn new(
        vectorizer: Box<dyn TextVectorizer>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(ClassifierError::DimensionMismatch {
                expected: classifier.n_features(),
                got: vectorizer.n_features(),
            });
        }

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Load the TF-IDF vectorizer and decision-tree classifier artifacts.
    pub fn load(vectorizer_path: impl AsRef<Path>, classifier_path: impl AsRef<Path>) -> Result<Self> {
        let vectorizer_path = vectorizer_path.as_ref();
        let classifier_path = classifier_path.as_ref();

        let vectorizer =
            TfidfVectorizer::from_artifact(read_artifact::<TfidfArtifact>(vectorizer_path)?)?;
        info!(
            path = %vectorizer_path.display(),
            n_features = vectorizer.n_features(),
            "Loaded TF-IDF vectorizer"
        );

        let classifier = DecisionTreeClassifier::from_artifact(read_artifact::<DecisionTreeArtifact>(
            classifier_path,
        )?)?;
        info!(
            path = %classifier_path.display(),
            n_classes = classifier.classes().len(),
            n_features = classifier.n_features(),
            "Loaded decision tree classifier"
        );

        Self::new(Box::new(vectorizer), Box::new(classifier))
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Vectorize the descriptions and classify every row.
    ///
    /// The output has the same length and order as `descriptions`.
    pub fn predict(&self, descriptions: &[String]) -> Result<Vec<Label>> {
        let features = self.vectorizer.transform(descriptions)?;
        debug!(rows = features.nrows(), cols = features.ncols(), "Vectorized descriptions");
        self.classifier.predict(&features)
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| ClassifierError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ClassifierError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(value: serde_json::Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    fn vectorizer_file() -> NamedTempFile {
        write_json(json!({
            "vocabulary": { "museum": 0, "beach": 1 },
            "idf": [1.2, 1.5]
        }))
    }

    fn classifier_file(n_features: usize) -> NamedTempFile {
        write_json(json!({
            "classes": ["culture", "nature"],
            "n_features": n_features,
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [1, -2, -2],
            "threshold": [0.0, -2.0, -2.0],
            "value": [[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]]
        }))
    }

    #[test]
    fn test_load_and_predict() {
        let vectorizer = vectorizer_file();
        let classifier = classifier_file(2);

        let pair = ArtifactPair::load(vectorizer.path(), classifier.path()).unwrap();
        assert_eq!(pair.n_features(), 2);

        let labels = pair
            .predict(&[
                "Sandy beach with surfing".to_string(),
                "Art museum".to_string(),
                "Nothing known here".to_string(),
            ])
            .unwrap();
        assert_eq!(
            labels,
            vec![
                Label::from("nature"),
                Label::from("culture"),
                Label::from("culture")
            ]
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let classifier = classifier_file(2);
        let err = ArtifactPair::load("/nonexistent/tfidf_vectorizer.json", classifier.path())
            .unwrap_err();
        assert!(matches!(err, ClassifierError::Io { .. }));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let mut corrupt = NamedTempFile::new().unwrap();
        write!(corrupt, "\u{80}\u{04}\u{95} not json").unwrap();
        let classifier = classifier_file(2);

        let err = ArtifactPair::load(corrupt.path(), classifier.path()).unwrap_err();
        assert!(matches!(err, ClassifierError::Parse { .. }));
    }

    #[test]
    fn test_width_mismatch_rejected_at_load() {
        let vectorizer = vectorizer_file();
        let classifier = classifier_file(5);

        let err = ArtifactPair::load(vectorizer.path(), classifier.path()).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::DimensionMismatch {
                expected: 5,
                got: 2
            }
        ));
    }
}
