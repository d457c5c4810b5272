//! Native Random Forest - JSON tree ensemble
//!
//! Each tree is stored as parallel node arrays, the layout a fitted tree
//! ensemble exports: `children_left`, `children_right`, `feature`,
//! `threshold`, `value`. A sample goes left when `x[feature] <= threshold`.
//! Leaves have both children set to `-1`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classifier::{check_width, Classifier};
use super::error::InferenceError;

/// Format tag expected in the artifact
pub const FOREST_FORMAT: &str = "random-forest-v1";

const LEAF: i64 = -1;

// ============================================================================
// ARTIFACT
// ============================================================================

/// One fitted tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Class weights per node (one row per node, one column per class)
    pub value: Vec<Vec<f64>>,
}

/// Serialized forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub format: String,
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub trees: Vec<TreeArrays>,
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Validated forest, ready to evaluate
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    n_features: usize,
    classes: Vec<i64>,
    trees: Vec<TreeArrays>,
}

impl ForestClassifier {
    /// Load and validate a forest from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, InferenceError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| InferenceError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, InferenceError> {
        let artifact: ForestArtifact = serde_json::from_str(content)
            .map_err(|e| InferenceError::InvalidModel(format!("Failed to parse forest: {}", e)))?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self, InferenceError> {
        if artifact.format != FOREST_FORMAT {
            return Err(InferenceError::InvalidModel(format!(
                "Unknown forest format '{}' (expected '{}')",
                artifact.format, FOREST_FORMAT
            )));
        }
        if artifact.classes.len() < 2 {
            return Err(InferenceError::InvalidModel(
                "Forest needs at least two classes".to_string(),
            ));
        }
        if artifact.trees.is_empty() {
            return Err(InferenceError::InvalidModel("Forest has no trees".to_string()));
        }
        for (i, tree) in artifact.trees.iter().enumerate() {
            validate_tree(tree, artifact.n_features, artifact.classes.len())
                .map_err(|msg| InferenceError::InvalidModel(format!("Tree {}: {}", i, msg)))?;
        }

        Ok(Self {
            n_features: artifact.n_features,
            classes: artifact.classes,
            trees: artifact.trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for ForestClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f32]) -> Result<i64, InferenceError> {
        let proba = self.predict_proba(features)?;
        let best = argmax(&proba)
            .ok_or_else(|| InferenceError::MalformedOutput("Empty probability vector".to_string()))?;
        Ok(self.classes[best])
    }

    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError> {
        check_width(self, features)?;

        let n_classes = self.classes.len();
        let mut sum = vec![0.0f64; n_classes];

        for tree in &self.trees {
            let leaf = descend(tree, features);
            let weights = &tree.value[leaf];
            let total: f64 = weights.iter().sum();
            if total > 0.0 {
                for (acc, w) in sum.iter_mut().zip(weights) {
                    *acc += w / total;
                }
            }
        }

        let n = self.trees.len() as f64;
        Ok(sum.into_iter().map(|p| (p / n) as f32).collect())
    }

    fn backend(&self) -> &'static str {
        "forest"
    }
}

/// Index of the highest value; first one wins on ties
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Walk from the root to a leaf. Validation guarantees termination.
fn descend(tree: &TreeArrays, features: &[f32]) -> usize {
    let mut node = 0usize;
    while tree.children_left[node] != LEAF {
        let x = features[tree.feature[node] as usize] as f64;
        node = if x <= tree.threshold[node] {
            tree.children_left[node] as usize
        } else {
            tree.children_right[node] as usize
        };
    }
    node
}

fn validate_tree(tree: &TreeArrays, n_features: usize, n_classes: usize) -> Result<(), String> {
    let n = tree.children_left.len();
    if n == 0 {
        return Err("no nodes".to_string());
    }
    if tree.children_right.len() != n
        || tree.feature.len() != n
        || tree.threshold.len() != n
        || tree.value.len() != n
    {
        return Err("node arrays have different lengths".to_string());
    }

    for node in 0..n {
        let (left, right) = (tree.children_left[node], tree.children_right[node]);
        if tree.value[node].len() != n_classes {
            return Err(format!("node {} has {} class weights, expected {}",
                node, tree.value[node].len(), n_classes));
        }
        if tree.value[node].iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(format!("node {} has invalid class weights", node));
        }
        if left == LEAF || right == LEAF {
            if left != right {
                return Err(format!("node {} has a single child", node));
            }
            if tree.value[node].iter().sum::<f64>() <= 0.0 {
                return Err(format!("leaf {} has no class weight", node));
            }
            continue;
        }
        // children always come after their parent, which also rules out cycles
        for child in [left, right] {
            if child <= node as i64 || child as usize >= n {
                return Err(format!("node {} has invalid child {}", node, child));
            }
        }
        let feature = tree.feature[node];
        if feature < 0 || feature as usize >= n_features {
            return Err(format!("node {} splits on invalid feature {}", node, feature));
        }
        if !tree.threshold[node].is_finite() {
            return Err(format!("node {} has a non-finite threshold", node));
        }
    }
    Ok(())
}
