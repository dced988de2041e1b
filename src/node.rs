use crate::data::Category;
use crate::utils::map_as_pairs;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::hash::Hash;

/// Why a node became a leaf.
#[derive(Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LeafReason {
    /// Every example routed here shares one class.
    Pure,
    /// The configured maximum depth was reached.
    MaxDepth,
    /// Fewer examples than the minimum required to split.
    MinSamplesSplit,
    /// Every feature was already used on the path from the root.
    NoFeatures,
    /// No feature improves on leaving the node unsplit.
    NoGain,
    /// A branch value with no examples, labelled with the parent's majority.
    EmptyBranch,
}

/// A node of a fitted tree.
///
/// Children are addressed by their position in the tree's node arena.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(bound(
    serialize = "V: Serialize, L: Serialize",
    deserialize = "V: Deserialize<'de> + Eq + Hash, L: Deserialize<'de>"
))]
pub enum Node<V, L> {
    Leaf {
        num: usize,
        depth: usize,
        label: L,
        count: usize,
        reason: LeafReason,
    },
    Internal {
        num: usize,
        depth: usize,
        split_feature: usize,
        split_gain: f64,
        /// Majority class of the examples routed to this node, returned when
        /// prediction meets a value of `split_feature` with no branch.
        majority_class: L,
        count: usize,
        #[serde(with = "map_as_pairs")]
        branches: HashMap<V, usize>,
    },
}

impl<V: Category, L: Category> Node<V, L> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn num(&self) -> usize {
        match self {
            Node::Leaf { num, .. } | Node::Internal { num, .. } => *num,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { depth, .. } | Node::Internal { depth, .. } => *depth,
        }
    }

    /// Number of training examples routed to this node.
    pub fn count(&self) -> usize {
        match self {
            Node::Leaf { count, .. } | Node::Internal { count, .. } => *count,
        }
    }

    /// Get the child that should be traveled down, given a row.
    ///
    /// `None` for leaves, for a value without a branch, and for a row too
    /// short to hold the split feature.
    pub fn get_child_idx(&self, row: &[V]) -> Option<usize> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal {
                split_feature,
                branches,
                ..
            } => row.get(*split_feature).and_then(|v| branches.get(v)).copied(),
        }
    }

    /// The label this node yields when prediction stops here.
    pub fn fallback_label(&self) -> &L {
        match self {
            Node::Leaf { label, .. } => label,
            Node::Internal { majority_class, .. } => majority_class,
        }
    }
}

// Branch maps compare as sets, so equality does not depend on hash order.
impl<V: Category, L: Category> PartialEq for Node<V, L> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Node::Leaf {
                    num,
                    depth,
                    label,
                    count,
                    reason,
                },
                Node::Leaf {
                    num: o_num,
                    depth: o_depth,
                    label: o_label,
                    count: o_count,
                    reason: o_reason,
                },
            ) => num == o_num && depth == o_depth && label == o_label && count == o_count && reason == o_reason,
            (
                Node::Internal {
                    num,
                    depth,
                    split_feature,
                    split_gain,
                    majority_class,
                    count,
                    branches,
                },
                Node::Internal {
                    num: o_num,
                    depth: o_depth,
                    split_feature: o_split_feature,
                    split_gain: o_split_gain,
                    majority_class: o_majority_class,
                    count: o_count,
                    branches: o_branches,
                },
            ) => {
                num == o_num
                    && depth == o_depth
                    && split_feature == o_split_feature
                    && split_gain == o_split_gain
                    && majority_class == o_majority_class
                    && count == o_count
                    && branches == o_branches
            }
            _ => false,
        }
    }
}

impl<V: Category, L: Category> fmt::Display for Node<V, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Leaf {
                num,
                label,
                count,
                reason,
                ..
            } => write!(f, "{}:leaf={:?},count={},reason={:?}", num, label, count, reason),
            Node::Internal {
                num,
                split_feature,
                split_gain,
                majority_class,
                count,
                branches,
                ..
            } => {
                let mut children: Vec<String> = branches.iter().map(|(v, c)| format!("{:?}={}", v, c)).collect();
                children.sort();
                write!(
                    f,
                    "{}:[feature {}] {},gain={},majority={:?},count={}",
                    num,
                    split_feature,
                    children.join(","),
                    split_gain,
                    majority_class,
                    count
                )
            }
        }
    }
}
