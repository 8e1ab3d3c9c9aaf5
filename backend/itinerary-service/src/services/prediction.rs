use crate::error::{AppError, Result, NO_DESCRIPTIONS};
use std::sync::Arc;
use text_classifier::{ArtifactPair, Label};
use tracing::debug;

/// Classifies attraction descriptions into categories.
#[derive(Debug, Clone)]
pub struct PredictionService {
    artifacts: Arc<ArtifactPair>,
}

impl PredictionService {
    pub fn new(artifacts: Arc<ArtifactPair>) -> Self {
        Self { artifacts }
    }

    /// One label per description, same order. Empty input is rejected.
    pub fn predict(&self, descriptions: &[String]) -> Result<Vec<Label>> {
        if descriptions.is_empty() {
            return Err(AppError::MissingInput(NO_DESCRIPTIONS));
        }

        let labels = self.artifacts.predict(descriptions)?;
        if labels.len() != descriptions.len() {
            return Err(AppError::PredictionFailure(format!(
                "classifier returned {} labels for {} descriptions",
                labels.len(),
                descriptions.len()
            )));
        }

        debug!(count = labels.len(), "Classified descriptions");
        Ok(labels)
    }
}
