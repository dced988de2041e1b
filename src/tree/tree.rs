use crate::classifier::config::TreeConfig;
use crate::data::Category;
use crate::node::{LeafReason, Node};
use crate::splitter::Splitter;
use crate::utils::ClassCounts;
use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::max;
use std::fmt::{self, Display};
use std::hash::Hash;

/// A decision tree stored as an arena of nodes, the root at position 0.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(bound(
    serialize = "V: Serialize, L: Serialize",
    deserialize = "V: Deserialize<'de> + Eq + Hash, L: Deserialize<'de>"
))]
pub struct Tree<V, L> {
    pub nodes: Vec<Node<V, L>>,
    pub depth: usize,
    pub n_leaves: usize,
}

// Everything the recursion reads but never changes.
struct GrowContext<'a, 'b, S, V, L> {
    splitter: &'b S,
    x: &'a [Vec<V>],
    y: &'a [L],
    cfg: &'b TreeConfig,
}

impl<V: Category, L: Category> Default for Tree<V, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Category, L: Category> Tree<V, L> {
    pub fn new() -> Self {
        Tree {
            nodes: Vec::new(),
            depth: 0,
            n_leaves: 0,
        }
    }

    /// Grow the tree on a validated training set, replacing any previous nodes.
    ///
    /// * `splitter` - Strategy used to score candidate splits.
    /// * `x` - Rectangular feature table, one row per example.
    /// * `y` - One label per row.
    /// * `cfg` - Stopping criteria.
    /// * `default_class` - Label used if a branch ever receives no examples.
    pub fn fit<S: Splitter>(&mut self, splitter: &S, x: &[Vec<V>], y: &[L], cfg: &TreeConfig, default_class: &L) {
        self.nodes.clear();
        self.depth = 0;
        self.n_leaves = 0;

        let n_features = x.first().map_or(0, |row| row.len());
        let index: Vec<usize> = (0..y.len()).collect();
        let features: Vec<usize> = (0..n_features).collect();
        let ctx = GrowContext { splitter, x, y, cfg };
        self.grow(&ctx, &index, &features, 0, default_class);
    }

    // Build the subtree for the examples at `index` and return its root.
    fn grow<S: Splitter>(
        &mut self,
        ctx: &GrowContext<'_, '_, S, V, L>,
        index: &[usize],
        features: &[usize],
        depth: usize,
        parent_majority: &L,
    ) -> usize {
        let counts = ClassCounts::from_index(ctx.y, index);
        let Some(majority) = counts.majority() else {
            return self.push_leaf(parent_majority, depth, 0, LeafReason::EmptyBranch);
        };
        if counts.is_pure() {
            return self.push_leaf(majority, depth, index.len(), LeafReason::Pure);
        }

        let stop = if ctx.cfg.max_depth.is_some_and(|max_depth| depth >= max_depth) {
            Some(LeafReason::MaxDepth)
        } else if index.len() < ctx.cfg.min_samples_split {
            Some(LeafReason::MinSamplesSplit)
        } else if features.is_empty() {
            Some(LeafReason::NoFeatures)
        } else {
            None
        };
        if let Some(reason) = stop {
            return self.push_leaf(majority, depth, index.len(), reason);
        }

        let Some(split_info) = ctx.splitter.best_split(ctx.x, ctx.y, index, features) else {
            return self.push_leaf(majority, depth, index.len(), LeafReason::NoGain);
        };

        let num = self.nodes.len();
        debug!(
            "Splitting node {} at depth {} on feature {}, gain {:.4}, {} branches.",
            num,
            depth,
            split_info.split_feature,
            split_info.split_gain,
            split_info.partition.len()
        );
        self.nodes.push(Node::Internal {
            num,
            depth,
            split_feature: split_info.split_feature,
            split_gain: split_info.split_gain,
            majority_class: majority.clone(),
            count: index.len(),
            branches: HashMap::new(),
        });
        self.depth = max(self.depth, depth);

        let remaining: Vec<usize> = features
            .iter()
            .copied()
            .filter(|&f| f != split_info.split_feature)
            .collect();
        for (value, subset) in split_info.partition.iter() {
            let child = self.grow(ctx, subset, &remaining, depth + 1, majority);
            if let Node::Internal { branches, .. } = &mut self.nodes[num] {
                branches.insert(value.clone(), child);
            }
        }
        num
    }

    fn push_leaf(&mut self, label: &L, depth: usize, count: usize, reason: LeafReason) -> usize {
        let num = self.nodes.len();
        self.nodes.push(Node::Leaf {
            num,
            depth,
            label: label.clone(),
            count,
            reason,
        });
        self.depth = max(self.depth, depth);
        self.n_leaves += 1;
        num
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn calc_feature_node_stats<F>(&self, calc_stat: &F, stats: &mut HashMap<usize, (f64, usize)>)
    where
        F: Fn(&Node<V, L>) -> f64,
    {
        for node in &self.nodes {
            if let Node::Internal { split_feature, .. } = node {
                stats
                    .entry(*split_feature)
                    .and_modify(|(v, c)| {
                        *v += calc_stat(node);
                        *c += 1;
                    })
                    .or_insert((calc_stat(node), 1));
            }
        }
    }

    pub fn calculate_importance_weight(&self, stats: &mut HashMap<usize, (f64, usize)>) {
        self.calc_feature_node_stats(&|_: &Node<V, L>| 1., stats);
    }

    pub fn calculate_importance_gain(&self, stats: &mut HashMap<usize, (f64, usize)>) {
        self.calc_feature_node_stats(
            &|n: &Node<V, L>| match n {
                Node::Internal { split_gain, .. } => *split_gain,
                Node::Leaf { .. } => 0.,
            },
            stats,
        );
    }

    pub fn calculate_importance_cover(&self, stats: &mut HashMap<usize, (f64, usize)>) {
        self.calc_feature_node_stats(&|n: &Node<V, L>| n.count() as f64, stats);
    }
}

impl<V: Category, L: Category> PartialEq for Tree<V, L> {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth && self.n_leaves == other.n_leaves && self.nodes == other.nodes
    }
}

impl<V: Category, L: Category> Display for Tree<V, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.nodes.is_empty() {
            return Ok(());
        }
        let mut print_buffer: Vec<usize> = vec![0];
        let mut r = String::new();
        while let Some(idx) = print_buffer.pop() {
            let node = &self.nodes[idx];
            r += format!("{}{}\n", "      ".repeat(node.depth()).as_str(), node).as_str();
            if let Node::Internal { branches, .. } = node {
                let mut children: Vec<usize> = branches.values().copied().collect();
                children.sort_unstable_by(|a, b| b.cmp(a));
                print_buffer.extend(children);
            }
        }
        write!(f, "{}", r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::EntropySplitter;

    fn fit(x: &[Vec<&'static str>], y: &[&'static str], cfg: &TreeConfig) -> Tree<&'static str, &'static str> {
        let mut tree = Tree::new();
        let default = ClassCounts::from_labels(y).majority().copied().unwrap();
        tree.fit(&EntropySplitter, x, y, cfg, &default);
        tree
    }

    fn weather() -> (Vec<Vec<&'static str>>, Vec<&'static str>) {
        let x = vec![
            vec!["sunny", "hot"],
            vec!["sunny", "cool"],
            vec!["rain", "cool"],
            vec!["rain", "hot"],
        ];
        let y = vec!["rain_no", "rain_no", "rain_yes", "rain_yes"];
        (x, y)
    }

    #[test]
    fn test_tree_fit_weather() {
        let (x, y) = weather();
        let tree = fit(&x, &y, &TreeConfig::default());
        assert_eq!(tree.nodes.len(), 3);
        assert_eq!(tree.n_leaves, 2);
        assert_eq!(tree.depth, 1);
        match &tree.nodes[0] {
            Node::Internal {
                split_feature,
                split_gain,
                majority_class,
                branches,
                ..
            } => {
                assert_eq!(*split_feature, 0);
                assert!((split_gain - 1.0).abs() < 1e-12);
                assert_eq!(*majority_class, "rain_no");
                let sunny = &tree.nodes[branches[&"sunny"]];
                assert_eq!(sunny.fallback_label(), &"rain_no");
                assert!(matches!(sunny, Node::Leaf { reason: LeafReason::Pure, .. }));
            }
            Node::Leaf { .. } => panic!("root should split"),
        }
        println!("{}", tree);
    }

    #[test]
    fn test_pure_node_beats_stopping_rules() {
        let x = vec![vec!["a"], vec!["b"], vec!["c"]];
        let y = vec!["same", "same", "same"];
        let cfg = TreeConfig {
            max_depth: Some(0),
            min_samples_split: 10,
        };
        let tree = fit(&x, &y, &cfg);
        assert_eq!(tree.nodes.len(), 1);
        assert!(matches!(
            tree.nodes[0],
            Node::Leaf {
                label: "same",
                reason: LeafReason::Pure,
                ..
            }
        ));
    }

    #[test]
    fn test_stopping_rules() {
        let (x, y) = weather();
        let tree = fit(
            &x,
            &y,
            &TreeConfig {
                max_depth: Some(0),
                min_samples_split: 2,
            },
        );
        assert!(matches!(tree.nodes[0], Node::Leaf { reason: LeafReason::MaxDepth, .. }));

        let tree = fit(
            &x,
            &y,
            &TreeConfig {
                max_depth: None,
                min_samples_split: 5,
            },
        );
        assert!(matches!(
            tree.nodes[0],
            Node::Leaf {
                reason: LeafReason::MinSamplesSplit,
                count: 4,
                ..
            }
        ));

        let no_features: Vec<Vec<&str>> = vec![vec![], vec![]];
        let tree = fit(&no_features, &["x", "y"], &TreeConfig::default());
        assert!(matches!(
            tree.nodes[0],
            Node::Leaf {
                label: "x",
                reason: LeafReason::NoFeatures,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_gain_makes_majority_leaf() {
        let x = vec![vec!["p"], vec!["p"], vec!["r"], vec!["r"]];
        let y = vec!["b", "a", "b", "a"];
        let tree = fit(&x, &y, &TreeConfig::default());
        assert_eq!(tree.nodes.len(), 1);
        assert!(matches!(
            tree.nodes[0],
            Node::Leaf {
                label: "b",
                reason: LeafReason::NoGain,
                ..
            }
        ));
    }

    #[test]
    fn test_features_used_once_per_path() {
        let x = vec![
            vec!["a", "x", "1"],
            vec!["a", "y", "2"],
            vec!["b", "x", "2"],
            vec!["b", "y", "1"],
            vec!["a", "x", "2"],
            vec!["b", "y", "2"],
        ];
        let y = vec!["n", "y", "y", "n", "y", "y"];
        let tree = fit(&x, &y, &TreeConfig::default());
        assert!(tree.depth <= 3);

        fn walk(tree: &Tree<&str, &str>, idx: usize, used: &mut Vec<usize>) {
            if let Node::Internal {
                split_feature, branches, ..
            } = &tree.nodes[idx]
            {
                assert!(!used.contains(split_feature));
                used.push(*split_feature);
                for &child in branches.values() {
                    walk(tree, child, used);
                }
                used.pop();
            }
        }
        walk(&tree, 0, &mut Vec::new());
    }

    #[test]
    fn test_refit_replaces_nodes() {
        let (x, y) = weather();
        let mut tree = fit(&x, &y, &TreeConfig::default());
        let first = tree.clone();
        tree.fit(&EntropySplitter, &x, &y, &TreeConfig::default(), &"rain_no");
        assert_eq!(tree, first);
    }

    #[test]
    fn test_feature_importance_stats() {
        let (x, y) = weather();
        let tree = fit(&x, &y, &TreeConfig::default());
        let mut stats = HashMap::new();
        tree.calculate_importance_cover(&mut stats);
        assert_eq!(stats[&0], (4.0, 1));
        let mut stats = HashMap::new();
        tree.calculate_importance_weight(&mut stats);
        assert_eq!(stats.get(&1), None);
    }
}
