//! Random forest classifier
//!
//! Evaluates a forest exported from scikit-learn's `RandomForestClassifier`.
//! Each tree keeps the flat node arrays of sklearn's `tree_` object, so an
//! export is a direct dump of `children_left`, `children_right`, `feature`,
//! `threshold` and `value` per estimator.

use serde::{Deserialize, Serialize};

use super::Classifier;
use crate::features::FeatureVector;
use crate::utils::{CropError, PredictError, Result};

/// Marker sklearn uses for "no child"
pub const TREE_LEAF: i64 = -1;

/// A single decision tree in flat array form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Index of the left child, or -1 for leaves
    pub children_left: Vec<i64>,
    /// Index of the right child, or -1 for leaves
    pub children_right: Vec<i64>,
    /// Feature tested at each internal node (sklearn stores -2 on leaves)
    pub feature: Vec<i64>,
    /// Split threshold; go left when `f32(x[feature]) <= threshold`
    pub threshold: Vec<f64>,
    /// Per-class weights at each node
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == TREE_LEAF
    }

    /// Check structure against the forest's feature and class counts
    pub fn validate(&self, n_features: usize, n_classes: usize) -> std::result::Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!("node arrays differ in length (expected {})", n));
        }

        for node in 0..n {
            let row = &self.value[node];
            if row.len() != n_classes {
                return Err(format!(
                    "node {} has {} class weights, expected {}",
                    node,
                    row.len(),
                    n_classes
                ));
            }
            if row.iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(format!("node {} has a negative or non-finite class weight", node));
            }

            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == TREE_LEAF {
                if right != TREE_LEAF {
                    return Err(format!("node {} has a right child but no left child", node));
                }
                if row.iter().sum::<f64>() <= 0.0 {
                    return Err(format!("leaf {} has no class weight", node));
                }
                continue;
            }

            // Children always come after their parent, which rules out cycles
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {} has out-of-order child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!(
                    "node {} tests feature {} (forest has {})",
                    node, feature, n_features
                ));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {} has a NaN threshold", node));
            }
        }
        Ok(())
    }

    /// Walk to the leaf for `x` and return its index.
    ///
    /// Inputs are compared at float32 precision, the dtype the trees were
    /// fitted on; thresholds stay float64.
    pub fn apply(&self, x: &[f64]) -> usize {
        let mut node = 0;
        while !self.is_leaf(node) {
            let feature = self.feature[node] as usize;
            let value = x[feature] as f32 as f64;
            node = if value <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Class probabilities for `x`: the reached leaf's weights, normalised
    pub fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        let leaf = &self.value[self.apply(x)];
        let total: f64 = leaf.iter().sum();
        leaf.iter().map(|w| w / total).collect()
    }
}

/// Ensemble of decision trees voting by averaged probability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    /// Number of input features the trees were fitted on
    pub n_features: usize,
    /// Class ids, aligned with each node's `value` row
    pub classes: Vec<usize>,
    /// Fitted estimators
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Check the whole forest; called once after loading
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(CropError::InvalidModel("forest has no trees".to_string()));
        }
        if self.classes.is_empty() {
            return Err(CropError::InvalidModel("forest has no classes".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|e| CropError::InvalidModel(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }

    /// Mean of per-tree class probabilities
    pub fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.predict_proba(x)) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        proba
    }

    /// Class id with the highest mean probability; first wins on ties
    pub fn predict_one(&self, x: &[f64]) -> usize {
        let proba = self.predict_proba(x);
        let mut best = 0;
        for (i, p) in proba.iter().enumerate().skip(1) {
            if *p > proba[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[usize] {
        &self.classes
    }

    fn predict(&self, batch: &[FeatureVector]) -> std::result::Result<Vec<usize>, PredictError> {
        batch
            .iter()
            .map(|row| {
                let x = row.to_array();
                if x.len() != self.n_features {
                    return Err(PredictError::Inference(format!(
                        "X has {} features, but RandomForestClassifier is expecting {} features as input",
                        x.len(),
                        self.n_features
                    )));
                }
                if x.iter().any(|v| v.is_nan()) {
                    return Err(PredictError::Inference("Input X contains NaN.".to_string()));
                }
                // Finite f64 values beyond f32::MAX overflow to infinity here
                if x.iter().any(|v| !(*v as f32).is_finite()) {
                    return Err(PredictError::Inference(
                        "Input X contains infinity or a value too large for dtype('float32')."
                            .to_string(),
                    ));
                }
                Ok(self.predict_one(&x))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One split on rainfall: <= 100 goes to class 0, else class 1
    fn rainfall_stump(left: Vec<f64>, right: Vec<f64>) -> DecisionTree {
        DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![6, -2, -2],
            threshold: vec![100.0, -2.0, -2.0],
            value: vec![vec![1.0, 1.0], left, right],
        }
    }

    fn forest(trees: Vec<DecisionTree>) -> RandomForest {
        RandomForest {
            n_features: 7,
            classes: vec![3, 8],
            trees,
        }
    }

    fn row(rainfall: f64) -> FeatureVector {
        FeatureVector::from_array([90.0, 42.0, 43.0, 22.5, 80.0, 6.5, rainfall])
    }

    #[test]
    fn test_threshold_goes_left_when_equal() {
        let tree = rainfall_stump(vec![5.0, 0.0], vec![0.0, 5.0]);
        assert_eq!(tree.apply(&row(100.0).to_array()), 1);
        assert_eq!(tree.apply(&row(100.5).to_array()), 2);
    }

    #[test]
    fn test_predict_maps_to_class_ids() {
        let forest = forest(vec![rainfall_stump(vec![5.0, 0.0], vec![0.0, 5.0])]);
        forest.validate().unwrap();
        assert_eq!(forest.predict(&[row(50.0), row(200.0)]).unwrap(), vec![3, 8]);
    }

    #[test]
    fn test_probabilities_are_averaged_across_trees() {
        // Leaf weights are counts, so normalisation matters: 9:1 and 2:8
        let forest = forest(vec![
            rainfall_stump(vec![9.0, 1.0], vec![0.0, 1.0]),
            rainfall_stump(vec![2.0, 8.0], vec![0.0, 1.0]),
        ]);
        let proba = forest.predict_proba(&row(10.0).to_array());
        assert!((proba[0] - 0.55).abs() < 1e-12);
        assert!((proba[1] - 0.45).abs() < 1e-12);
        assert_eq!(forest.predict_one(&row(10.0).to_array()), 3);
    }

    #[test]
    fn test_tie_picks_first_class() {
        let forest = forest(vec![rainfall_stump(vec![1.0, 1.0], vec![0.0, 1.0])]);
        assert_eq!(forest.predict_one(&row(10.0).to_array()), 3);
    }

    #[test]
    fn test_non_finite_input_is_inference_error() {
        let forest = forest(vec![rainfall_stump(vec![1.0, 0.0], vec![0.0, 1.0])]);
        let err = forest.predict(&[row(f64::NAN)]).unwrap_err();
        assert!(matches!(err, PredictError::Inference(_)));
        assert!(forest.predict(&[row(f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_value_beyond_f32_range_is_inference_error() {
        let forest = forest(vec![rainfall_stump(vec![1.0, 0.0], vec![0.0, 1.0])]);
        let err = forest.predict(&[row(1e39)]).unwrap_err();
        assert!(matches!(err, PredictError::Inference(ref m) if m.contains("float32")));
        assert!(forest.predict(&[row(-1e39)]).is_err());
        assert!(forest.predict(&[row(3.0e38)]).is_ok());
    }

    #[test]
    fn test_threshold_compared_at_f32_precision() {
        // sklearn stores split points as midpoints between float32 feature values
        let threshold = (0.1f32 as f64 + 0.3f32 as f64) / 2.0;
        let mut tree = rainfall_stump(vec![1.0, 0.0], vec![0.0, 1.0]);
        tree.threshold[0] = threshold;
        let forest = forest(vec![tree]);

        // Above the threshold in f64, but rounds to 0.2f32 which is below it
        let x = 0.200000008;
        assert!(x > threshold);
        assert!((x as f32 as f64) <= threshold);
        assert_eq!(forest.predict(&[row(x)]).unwrap(), vec![3]);
    }

    #[test]
    fn test_validate_rejects_empty_forest() {
        assert!(forest(Vec::new()).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_feature_index() {
        let mut tree = rainfall_stump(vec![1.0, 0.0], vec![0.0, 1.0]);
        tree.feature[0] = 7;
        assert!(forest(vec![tree]).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let mut tree = rainfall_stump(vec![1.0, 0.0], vec![0.0, 1.0]);
        tree.children_right[0] = 0;
        assert!(forest(vec![tree]).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_class_width_mismatch() {
        let tree = rainfall_stump(vec![1.0, 0.0, 0.0], vec![0.0, 1.0]);
        assert!(forest(vec![tree]).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_leaf() {
        let tree = rainfall_stump(vec![0.0, 0.0], vec![0.0, 1.0]);
        assert!(forest(vec![tree]).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_ragged_arrays() {
        let mut tree = rainfall_stump(vec![1.0, 0.0], vec![0.0, 1.0]);
        tree.threshold.pop();
        assert!(forest(vec![tree]).validate().is_err());
    }

    #[test]
    fn test_single_leaf_tree() {
        let tree = DecisionTree {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![vec![0.0, 4.0]],
        };
        let forest = forest(vec![tree]);
        forest.validate().unwrap();
        assert_eq!(forest.predict_one(&row(0.0).to_array()), 8);
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "n_features": 7,
            "classes": [0, 1],
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [0, -2, -2],
                "threshold": [50.0, -2.0, -2.0],
                "value": [[3, 3], [3, 0], [0, 3]]
            }]
        }"#;
        let forest: RandomForest = serde_json::from_str(json).unwrap();
        forest.validate().unwrap();
        assert_eq!(forest.trees[0].node_count(), 3);
    }
}
