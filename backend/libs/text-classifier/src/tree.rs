/// Decision Tree Classifier
///
/// Rebuilds a fitted single-output decision tree from the parallel node
/// arrays the training pipeline exports (`children_left`, `children_right`,
/// `feature`, `threshold`, `value`) and predicts one label per feature row.
use crate::error::{ClassifierError, Result};
use crate::label::Label;
use ndarray::{Array2, ArrayView1};
use serde::Deserialize;
use std::fmt;

/// Marker used in `children_left` / `children_right` for leaf nodes.
const TREE_LEAF: i64 = -1;

/// Maps numeric feature rows to category labels.
pub trait Classifier: Send + Sync {
    /// Row width the classifier was trained on.
    fn n_features(&self) -> usize;

    /// One label per row, in row order.
    fn predict(&self, features: &Array2<f64>) -> Result<Vec<Label>>;
}

/// On-disk shape of the classifier artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTreeArtifact {
    pub classes: Vec<Label>,
    pub n_features: usize,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights, `value[node][class]`.
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

pub struct DecisionTreeClassifier {
    classes: Vec<Label>,
    n_features: usize,
    nodes: Vec<Node>,
}

impl fmt::Debug for DecisionTreeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionTreeClassifier")
            .field("n_classes", &self.classes.len())
            .field("n_features", &self.n_features)
            .field("node_count", &self.nodes.len())
            .finish()
    }
}

impl DecisionTreeClassifier {
    /// Validate the node arrays and resolve every leaf to its class index.
    ///
    /// Children must point forward (`child > parent`), which is how trees are
    /// laid out depth-first at fit time and guarantees traversal terminates.
    pub fn from_artifact(artifact: DecisionTreeArtifact) -> Result<Self> {
        let node_count = artifact.children_left.len();
        if node_count == 0 {
            return Err(invalid("tree has no nodes"));
        }
        if artifact.classes.is_empty() {
            return Err(invalid("classifier has no classes"));
        }

        let lengths = [
            artifact.children_right.len(),
            artifact.feature.len(),
            artifact.threshold.len(),
            artifact.value.len(),
        ];
        if lengths.iter().any(|&len| len != node_count) {
            return Err(invalid(format!(
                "node arrays disagree on node count: children_left={}, children_right={}, feature={}, threshold={}, value={}",
                node_count, lengths[0], lengths[1], lengths[2], lengths[3]
            )));
        }

        let mut nodes = Vec::with_capacity(node_count);
        for id in 0..node_count {
            let left = artifact.children_left[id];
            let right = artifact.children_right[id];

            if left == TREE_LEAF || right == TREE_LEAF {
                if left != right {
                    return Err(invalid(format!("node {} has exactly one child", id)));
                }

                let weights = &artifact.value[id];
                if weights.len() != artifact.classes.len() {
                    return Err(invalid(format!(
                        "leaf {} has {} class weights for {} classes",
                        id,
                        weights.len(),
                        artifact.classes.len()
                    )));
                }

                nodes.push(Node::Leaf {
                    class: argmax(weights),
                });
                continue;
            }

            let child = |index: i64| -> Result<usize> {
                if index <= id as i64 || index >= node_count as i64 {
                    return Err(invalid(format!(
                        "node {} points to child {} outside ({}, {})",
                        id, index, id, node_count
                    )));
                }
                Ok(index as usize)
            };

            let feature = artifact.feature[id];
            if feature < 0 || feature >= artifact.n_features as i64 {
                return Err(invalid(format!(
                    "node {} splits on feature {} but the tree has {} features",
                    id, feature, artifact.n_features
                )));
            }

            nodes.push(Node::Split {
                feature: feature as usize,
                threshold: artifact.threshold[id],
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self {
            classes: artifact.classes,
            n_features: artifact.n_features,
            nodes,
        })
    }

    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn leaf_class(&self, sample: ArrayView1<'_, f64>) -> usize {
        let mut node = 0;
        loop {
            match self.nodes[node] {
                Node::Leaf { class } => return class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // splits were learned on f32 inputs
                    let x = sample[feature] as f32 as f64;
                    node = if x <= threshold { left } else { right };
                }
            }
        }
    }
}

impl Classifier for DecisionTreeClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &Array2<f64>) -> Result<Vec<Label>> {
        if features.ncols() != self.n_features {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.n_features,
                got: features.ncols(),
            });
        }

        Ok(features
            .rows()
            .into_iter()
            .map(|row| self.classes[self.leaf_class(row)].clone())
            .collect())
    }
}

/// Index of the largest weight; the first one wins on ties.
fn argmax(weights: &[f64]) -> usize {
    let mut best = 0;
    for (index, weight) in weights.iter().enumerate().skip(1) {
        if *weight > weights[best] {
            best = index;
        }
    }
    best
}

fn invalid(message: impl Into<String>) -> ClassifierError {
    ClassifierError::InvalidArtifact(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use serde_json::json;

    /// feature 0 <= 0.5 -> "culture", else feature 1 <= 0.2 -> "nature", else "food"
    fn sample_artifact() -> DecisionTreeArtifact {
        serde_json::from_value(json!({
            "classes": ["culture", "food", "nature"],
            "n_features": 2,
            "children_left":  [1, -1, 3, -1, -1],
            "children_right": [2, -1, 4, -1, -1],
            "feature":        [0, -2, 1, -2, -2],
            "threshold":      [0.5, -2.0, 0.2, -2.0, -2.0],
            "value": [
                [3.0, 3.0, 3.0],
                [3.0, 0.0, 0.0],
                [0.0, 3.0, 3.0],
                [0.0, 1.0, 2.0],
                [0.0, 2.0, 1.0]
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_predict_walks_tree() {
        let tree = DecisionTreeClassifier::from_artifact(sample_artifact()).unwrap();
        let features = array![[0.1, 0.9], [0.7, 0.1], [0.7, 0.9], [0.5, 0.0]];

        let labels = tree.predict(&features).unwrap();
        assert_eq!(
            labels,
            vec![
                Label::from("culture"),
                Label::from("nature"),
                Label::from("food"),
                Label::from("culture"),
            ]
        );
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let tree = DecisionTreeClassifier::from_artifact(sample_artifact()).unwrap();
        let err = tree.predict(&array![[0.1, 0.2, 0.3]]).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        ));
    }

    #[test]
    fn test_single_leaf_tree() {
        let artifact: DecisionTreeArtifact = serde_json::from_value(json!({
            "classes": [0, 1],
            "n_features": 4,
            "children_left": [-1],
            "children_right": [-1],
            "feature": [-2],
            "threshold": [-2.0],
            "value": [[1.0, 5.0]]
        }))
        .unwrap();
        let tree = DecisionTreeClassifier::from_artifact(artifact).unwrap();

        let labels = tree.predict(&Array2::zeros((3, 4))).unwrap();
        assert_eq!(labels, vec![Label::Integer(1); 3]);
    }

    #[test]
    fn test_argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[2.0, 2.0, 1.0]), 0);
        assert_eq!(argmax(&[0.0, 1.0, 1.0]), 1);
    }

    #[test]
    fn test_backward_child_rejected() {
        let mut artifact = sample_artifact();
        artifact.children_right[2] = 1;
        let err = DecisionTreeClassifier::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidArtifact(_)));
    }

    #[test]
    fn test_feature_out_of_range_rejected() {
        let mut artifact = sample_artifact();
        artifact.feature[0] = 7;
        assert!(DecisionTreeClassifier::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_mismatched_array_lengths_rejected() {
        let mut artifact = sample_artifact();
        artifact.threshold.pop();
        assert!(DecisionTreeClassifier::from_artifact(artifact).is_err());
    }

    fn rejection(artifact: DecisionTreeArtifact) -> String {
        match DecisionTreeClassifier::from_artifact(artifact) {
            Err(ClassifierError::InvalidArtifact(message)) => message,
            other => panic!("expected InvalidArtifact, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_tree_rejected() {
        let mut artifact = sample_artifact();
        artifact.children_left.clear();
        assert_eq!(rejection(artifact), "tree has no nodes");
    }

    #[test]
    fn test_empty_classes_rejected() {
        let mut artifact = sample_artifact();
        artifact.classes.clear();
        assert_eq!(rejection(artifact), "classifier has no classes");
    }

    #[test]
    fn test_node_with_one_child_rejected() {
        let mut artifact = sample_artifact();
        artifact.children_right[2] = -1;
        assert_eq!(rejection(artifact), "node 2 has exactly one child");
    }

    #[test]
    fn test_leaf_weight_width_mismatch_rejected() {
        let mut artifact = sample_artifact();
        artifact.value[3] = vec![0.0, 1.0];
        assert_eq!(rejection(artifact), "leaf 3 has 2 class weights for 3 classes");
    }
}
