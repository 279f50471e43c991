pub mod decision_tree;

pub use decision_tree::{
    build_decision_tree, build_tree_with_attributes, entropy, information_gain, Branch,
    DecisionTreeClassifier, TreeNode,
};
