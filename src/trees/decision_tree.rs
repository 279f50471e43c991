//! Entropy-based decision tree induction (ID3 style, multiway splits on observed values).

use crate::common_types::{majority_label, tally_labels, Dataset, Label};
use crate::error::{AnalysisError, Result};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A node of an induced tree. Parents own their children; nothing points back up.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum TreeNode {
    Leaf { value: Label },
    Internal {
        /// Column of the original feature vectors tested at this node.
        attribute: usize,
        /// One branch per value observed in this node's partition, ascending.
        children: Vec<Branch>,
    },
}

/// Edge from an internal node to the subtree for one attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Branch {
    pub value: f64,
    pub node: TreeNode,
}

impl TreeNode {
    pub fn leaf(value: impl Into<Label>) -> Self {
        TreeNode::Leaf { value: value.into() }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Number of internal nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { children, .. } => {
                1 + children.iter().map(|branch| branch.node.depth()).max().unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { children, .. } => {
                children.iter().map(|branch| branch.node.leaf_count()).sum()
            }
        }
    }

    /// Follows the branch matching each tested feature down to a leaf.
    /// Returns `None` when a value was never observed at that node during
    /// training, or when `features` is too short for a tested attribute.
    pub fn predict(&self, features: &[f64]) -> Option<&str> {
        match self {
            TreeNode::Leaf { value } => Some(value.as_str()),
            TreeNode::Internal { attribute, children } => {
                let key = OrderedFloat(*features.get(*attribute)?); // short sample: no prediction
                children
                    .iter()
                    .find(|branch| OrderedFloat(branch.value) == key)
                    .and_then(|branch| branch.node.predict(features))
            }
        }
    }
}

/// Shannon entropy, in bits, of the empirical label distribution.
pub fn entropy<'a>(labels: impl IntoIterator<Item = &'a str>) -> f64 {
    let counts = tally_labels(labels);
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;

    let mut entropy = 0.0;
    for (_label, count) in counts {
        let p = count as f64 / total;
        entropy -= p * p.log2();
    }
    entropy
}

/// Entropy of `rows` minus the size-weighted entropy of its partitions on `attribute`.
pub fn information_gain(data: &Dataset, rows: &[usize], attribute: usize) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let parent_entropy = entropy(rows.iter().map(|&row| data.labels[row].as_str()));
    let total = rows.len() as f64;

    partition(data, rows, attribute)
        .values()
        .fold(parent_entropy, |gain, subset| {
            let weight = subset.len() as f64 / total;
            gain - weight * entropy(subset.iter().map(|&row| data.labels[row].as_str()))
        })
}

// Rows shorter than `attribute` are grouped under NaN rather than rejected.
fn feature_value(data: &Dataset, row: usize, attribute: usize) -> f64 {
    data.features[row].get(attribute).copied().unwrap_or(f64::NAN)
}

/// Groups rows by their value in `attribute`. `OrderedFloat` equality puts all
/// NaNs in one group and treats -0.0 and 0.0 as the same value.
fn partition(data: &Dataset, rows: &[usize], attribute: usize) -> BTreeMap<OrderedFloat<f64>, Vec<usize>> {
    let mut groups: BTreeMap<OrderedFloat<f64>, Vec<usize>> = BTreeMap::new();
    for &row in rows {
        groups
            .entry(OrderedFloat(feature_value(data, row, attribute)))
            .or_default()
            .push(row);
    }
    groups
}

/// First attribute with the strictly highest information gain.
fn find_best_attribute(data: &Dataset, rows: &[usize], remaining: &[usize]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for &attribute in remaining {
        let gain = information_gain(data, rows, attribute);
        if best.map_or(true, |(_, best_gain)| gain > best_gain) { // strict, so the earlier column keeps a tie
            best = Some((attribute, gain));
        }
    }
    best
}

fn build_node(data: &Dataset, rows: &[usize], remaining: &[usize], depth: usize) -> Result<TreeNode> {
    if let Some(&first) = rows.first() {
        let first_label = &data.labels[first];
        if rows.iter().all(|&row| &data.labels[row] == first_label) {
            return Ok(TreeNode::leaf(first_label.as_str()));
        }
    }

    let best = if remaining.is_empty() || rows.is_empty() {
        None
    } else {
        find_best_attribute(data, rows, remaining)
    };

    let Some((attribute, gain)) = best else {
        return majority_label(rows.iter().map(|&row| data.labels[row].as_str()))
            .map(|label| TreeNode::leaf(label))
            .ok_or(AnalysisError::EmptyTrainingSet);
    };

    let child_remaining: Vec<usize> = remaining
        .iter()
        .copied()
        .filter(|&candidate| candidate != attribute) // each column is tested at most once per path
        .collect();
    let groups = partition(data, rows, attribute);
    debug!(attribute, gain, branches = groups.len(), depth, "splitting node");

    let mut children = Vec::with_capacity(groups.len());
    for (value, subset) in groups {
        let node = build_node(data, &subset, &child_remaining, depth + 1)?;
        children.push(Branch { value: value.into_inner(), node }); // BTreeMap order: ascending values
    }
    Ok(TreeNode::Internal { attribute, children })
}

/// Induces a tree from `train` considering only the listed attribute columns.
///
/// # Errors
/// [`AnalysisError::EmptyTrainingSet`] if `train` has no rows.
pub fn build_tree_with_attributes(train: &Dataset, attributes: &[usize]) -> Result<TreeNode> {
    if train.is_empty() {
        return Err(AnalysisError::EmptyTrainingSet);
    }
    let rows: Vec<usize> = (0..train.len()).collect();
    build_node(train, &rows, attributes, 0)
}

/// Induces a tree from `train` over all of its attribute columns.
pub fn build_decision_tree(train: &Dataset) -> Result<TreeNode> {
    let attributes: Vec<usize> = (0..train.dimensionality()).collect();
    build_tree_with_attributes(train, &attributes)
}

#[derive(Debug, Default)]
pub struct DecisionTreeClassifier {
    root: Option<TreeNode>, // None until fit() succeeds
}

impl DecisionTreeClassifier {
    pub fn new() -> Self {
        DecisionTreeClassifier { root: None }
    }

    /// Builds the tree. A failed fit leaves any previously fitted tree in place.
    pub fn fit(&mut self, training_data: &Dataset) -> Result<()> {
        let root = build_decision_tree(training_data)?;
        debug!(depth = root.depth(), leaves = root.leaf_count(), "fitted decision tree");
        self.root = Some(root);
        Ok(())
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    pub fn into_root(self) -> Option<TreeNode> {
        self.root
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, TreeNode::depth)
    }

    pub fn predict(&self, features: &[f64]) -> Option<&str> {
        self.root.as_ref()?.predict(features)
    }

    pub fn predict_batch(&self, test_data: &[Vec<f64>]) -> Vec<Option<&str>> {
        test_data.iter().map(|features| self.predict(features)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(rows: Vec<(Vec<f64>, &str)>) -> Dataset {
        Dataset::new(
            rows.iter().map(|(f, _)| f.clone()).collect(),
            rows.iter().map(|(_, l)| l.to_string()).collect(),
        )
    }

    #[test]
    fn test_entropy_values() {
        assert_eq!(entropy(["A", "B"]), 1.0);
        assert_eq!(entropy(["A", "A", "B", "B"]), 1.0);
        assert_eq!(entropy(["A", "A", "A"]), 0.0);
        assert_eq!(entropy(Vec::<&str>::new()), 0.0);
        assert!((entropy(["A", "B", "C", "D"]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_information_gain_of_perfect_split() {
        let data = dataset(vec![(vec![0.0, 5.0], "A"), (vec![0.0, 6.0], "A"), (vec![1.0, 5.0], "B"), (vec![1.0, 6.0], "B")]);
        let rows = [0, 1, 2, 3];
        assert_eq!(information_gain(&data, &rows, 0), 1.0);
        assert_eq!(information_gain(&data, &rows, 1), 0.0);
    }

    #[test]
    fn test_pure_labels_give_leaf() {
        let data = dataset(vec![(vec![1.0, 9.0], "A"), (vec![2.0, 8.0], "A"), (vec![3.0, 7.0], "A")]);
        assert_eq!(build_decision_tree(&data).unwrap(), TreeNode::leaf("A"));
    }

    #[test]
    fn test_no_attributes_gives_majority_leaf() {
        let data = dataset(vec![(vec![1.0], "A"), (vec![2.0], "A"), (vec![3.0], "B")]);
        assert_eq!(build_tree_with_attributes(&data, &[]).unwrap(), TreeNode::leaf("A"));
    }

    #[test]
    fn test_majority_tie_prefers_first_label() {
        let data = dataset(vec![(vec![1.0], "B"), (vec![2.0], "A")]);
        assert_eq!(build_tree_with_attributes(&data, &[]).unwrap(), TreeNode::leaf("B"));
    }

    #[test]
    fn test_empty_training_set() {
        assert_eq!(build_decision_tree(&Dataset::default()), Err(AnalysisError::EmptyTrainingSet));
        let mut tree = DecisionTreeClassifier::new();
        assert_eq!(tree.fit(&Dataset::default()), Err(AnalysisError::EmptyTrainingSet));
        assert!(tree.root().is_none());
    }

    #[test]
    fn test_gain_tie_picks_first_attribute_and_never_reuses_it() {
        let data = dataset(vec![
            (vec![0.0, 0.0], "A"),
            (vec![0.0, 1.0], "B"),
            (vec![1.0, 0.0], "B"),
            (vec![1.0, 1.0], "B"),
        ]);
        let expected = TreeNode::Internal {
            attribute: 0,
            children: vec![
                Branch {
                    value: 0.0,
                    node: TreeNode::Internal {
                        attribute: 1,
                        children: vec![
                            Branch { value: 0.0, node: TreeNode::leaf("A") },
                            Branch { value: 1.0, node: TreeNode::leaf("B") },
                        ],
                    },
                },
                Branch { value: 1.0, node: TreeNode::leaf("B") },
            ],
        };
        let tree = build_decision_tree(&data).unwrap();
        assert_eq!(tree, expected);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn test_exhausted_attributes_fall_back_to_majority() {
        let data = dataset(vec![(vec![1.0], "A"), (vec![1.0], "B"), (vec![1.0], "A")]);
        let expected = TreeNode::Internal {
            attribute: 0,
            children: vec![Branch { value: 1.0, node: TreeNode::leaf("A") }],
        };
        assert_eq!(build_decision_tree(&data).unwrap(), expected);
    }

    #[test]
    fn test_children_cover_only_observed_values() {
        let data = dataset(vec![(vec![3.0], "A"), (vec![7.0], "B"), (vec![3.0], "A"), (vec![-2.0], "C")]);
        let tree = build_decision_tree(&data).unwrap();
        match tree {
            TreeNode::Internal { attribute, children } => {
                assert_eq!(attribute, 0);
                let values: Vec<f64> = children.iter().map(|b| b.value).collect();
                assert_eq!(values, vec![-2.0, 3.0, 7.0]);
            }
            TreeNode::Leaf { .. } => panic!("expected an internal node"),
        }
    }

    #[test]
    fn test_depth_bounded_by_attribute_count() {
        let rows: Vec<(Vec<f64>, String)> = (0..40)
            .map(|i| {
                let features = vec![(i % 2) as f64, (i % 3) as f64, (i % 5) as f64];
                (features, format!("C{}", (i * 7) % 4))
            })
            .collect();
        let data = Dataset::new(
            rows.iter().map(|(f, _)| f.clone()).collect(),
            rows.iter().map(|(_, l)| l.clone()).collect(),
        );
        let tree = build_decision_tree(&data).unwrap();
        assert!(tree.depth() <= data.dimensionality());
    }

    #[test]
    fn test_nan_values_share_a_branch() {
        let data = dataset(vec![(vec![f64::NAN], "A"), (vec![f64::NAN], "A"), (vec![1.0], "B")]);
        let tree = build_decision_tree(&data).unwrap();
        match &tree {
            TreeNode::Internal { children, .. } => assert_eq!(children.len(), 2),
            TreeNode::Leaf { .. } => panic!("expected an internal node"),
        }
        assert_eq!(tree.predict(&[f64::NAN]), Some("A"));
        assert_eq!(tree.predict(&[1.0]), Some("B"));
    }

    #[test]
    fn test_predict() {
        let data = dataset(vec![(vec![0.0, 5.0], "A"), (vec![0.0, 6.0], "A"), (vec![1.0, 5.0], "B"), (vec![1.0, 6.0], "B")]);
        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&data).unwrap();

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict(&[0.0, 100.0]), Some("A"));
        assert_eq!(tree.predict(&[1.0, 100.0]), Some("B"));
        assert_eq!(tree.predict(&[2.0, 5.0]), None);
        assert_eq!(tree.predict(&[]), None);
        assert_eq!(tree.predict_batch(&[vec![0.0, 1.0], vec![1.0, 1.0]]), vec![Some("A"), Some("B")]);
    }

    #[test]
    fn test_predict_empty_tree() {
        let tree = DecisionTreeClassifier::new();
        assert_eq!(tree.predict(&[1.0, 2.0]), None);
    }

    #[test]
    fn test_predict_manual_tree() {
        let root = TreeNode::Internal {
            attribute: 1,
            children: vec![
                Branch { value: 4.0, node: TreeNode::leaf("low") },
                Branch { value: 6.0, node: TreeNode::leaf("high") },
            ],
        };
        assert_eq!(root.predict(&[0.0, 4.0]), Some("low"));
        assert_eq!(root.predict(&[0.0, 6.0]), Some("high"));
        assert_eq!(root.predict(&[0.0, 5.0]), None);
    }
}
