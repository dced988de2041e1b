//! Decision Tree Classifier
//!
//! ID3-style induction over categorical features: every node splits on the
//! eligible feature with the greatest information gain, with one branch per
//! value observed at that node, and no feature is reused along a path.
use super::config::{ImportanceMethod, ModelIO, TreeConfig};
use super::Classifier;
use crate::data::{validate_training_set, Category};
use crate::errors::ClassifierError;
use crate::splitter::EntropySplitter;
use crate::tree::Tree;
use crate::utils::ClassCounts;
use hashbrown::HashMap;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Decision tree classifier.
///
/// The fitted state is the tree itself, the most frequent class of the whole
/// training set and the distinct classes in first-seen order. A model is
/// read-only between fits, so it can serve any number of concurrent
/// prediction calls; refitting needs exclusive access.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize, L: Serialize",
    deserialize = "V: Deserialize<'de> + Eq + Hash, L: Deserialize<'de>"
))]
pub struct DecisionTreeClassifier<V, L> {
    pub cfg: TreeConfig,
    pub tree: Option<Tree<V, L>>,
    /// Most frequent class of the training set, or the label given at
    /// construction before any fit.
    pub default_class: L,
    pub classes: Vec<L>,
    pub n_features: usize,
}

impl<V: Category, L: Category + Default> Default for DecisionTreeClassifier<V, L> {
    fn default() -> Self {
        Self::new(TreeConfig::default(), L::default())
    }
}

impl<V: Category, L: Category> DecisionTreeClassifier<V, L> {
    /// Decision tree classifier
    ///
    /// * `cfg` - Stopping criteria applied while growing the tree.
    /// * `default_class` - Label predicted until the model is fitted.
    pub fn new(cfg: TreeConfig, default_class: L) -> Self {
        DecisionTreeClassifier {
            cfg,
            tree: None,
            default_class,
            classes: Vec::new(),
            n_features: 0,
        }
    }

    /// Drop the fitted tree, keeping the configuration and default class.
    pub fn reset(&mut self) {
        self.tree = None;
        self.classes = Vec::new();
        self.n_features = 0;
    }

    pub fn is_fitted(&self) -> bool {
        self.tree.is_some()
    }

    /// Get reference to the tree
    pub fn get_tree(&self) -> Option<&Tree<V, L>> {
        self.tree.as_ref()
    }

    /// Generate predictions for many rows.
    ///
    /// * `rows` - Rows to predict, the output keeps their order.
    /// * `parallel` - Predict in parallel.
    pub fn predict_batch(&self, rows: &[Vec<V>], parallel: bool) -> Vec<L> {
        match &self.tree {
            Some(tree) => tree.predict(rows, parallel, &self.default_class),
            None => vec![self.default_class.clone(); rows.len()],
        }
    }

    /// Positions of the tree nodes visited while predicting `row`.
    pub fn predict_nodes(&self, row: &[V]) -> Vec<usize> {
        self.tree.as_ref().map_or_else(Vec::new, |tree| tree.predict_nodes(row))
    }

    /// Calculate feature importance measure for the features in the model.
    /// - `method`: variable importance method to use.
    /// - `normalize`: whether to scale the importances so they sum to 1.
    pub fn calculate_feature_importance(&self, method: ImportanceMethod, normalize: bool) -> HashMap<usize, f64> {
        let Some(tree) = &self.tree else {
            return HashMap::new();
        };
        let mut stats = HashMap::new();
        match method {
            ImportanceMethod::Weight => tree.calculate_importance_weight(&mut stats),
            ImportanceMethod::Gain | ImportanceMethod::TotalGain => tree.calculate_importance_gain(&mut stats),
            ImportanceMethod::Cover | ImportanceMethod::TotalCover => tree.calculate_importance_cover(&mut stats),
        }

        let importance: HashMap<usize, f64> = stats
            .into_iter()
            .map(|(k, (v, c))| match method {
                ImportanceMethod::Gain | ImportanceMethod::Cover => (k, v / c as f64),
                _ => (k, v),
            })
            .collect();

        let total: f64 = importance.values().sum();
        if normalize && total > 0. {
            importance.into_iter().map(|(k, v)| (k, v / total)).collect()
        } else {
            importance
        }
    }
}

impl<V: Category, L: Category> Classifier for DecisionTreeClassifier<V, L> {
    type Feature = V;
    type Label = L;

    /// Fit the tree on a provided dataset.
    ///
    /// * `x` - Rectangular table of categorical features.
    /// * `y` - One class label per row.
    fn fit(&mut self, x: &[Vec<V>], y: &[L]) -> Result<(), ClassifierError> {
        self.cfg.validate_parameters()?;
        let n_features = validate_training_set(x, y)?;

        let counts = ClassCounts::from_labels(y);
        if let Some(majority) = counts.majority() {
            self.default_class = majority.clone();
        }
        self.classes = counts.labels();
        self.n_features = n_features;

        let mut tree = Tree::new();
        tree.fit(&EntropySplitter, x, y, &self.cfg, &self.default_class);
        info!(
            "Fitted tree on {} examples and {} features: {} nodes, {} leaves, depth {}.",
            y.len(),
            n_features,
            tree.nodes.len(),
            tree.n_leaves,
            tree.depth
        );
        self.tree = Some(tree);
        Ok(())
    }

    fn predict_one(&self, row: &[V]) -> L {
        self.tree
            .as_ref()
            .and_then(|tree| tree.predict_row(row))
            .unwrap_or(&self.default_class)
            .clone()
    }

    fn predict(&self, rows: &[Vec<V>]) -> Vec<L> {
        self.predict_batch(rows, false)
    }
}

impl<V, L> ModelIO for DecisionTreeClassifier<V, L>
where
    V: Category + Serialize + DeserializeOwned,
    L: Category + Serialize + DeserializeOwned,
{
}
