use super::config::TreeConfig;
use super::decision_tree::DecisionTreeClassifier;
use crate::data::Category;

impl<V: Category, L: Category> DecisionTreeClassifier<V, L> {
    // Set methods for parameters

    /// Set the maximum depth on the tree.
    /// * `max_depth` - Deepest level a leaf may sit at, `None` for no limit.
    pub fn set_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.cfg.max_depth = max_depth;
        self
    }

    /// Set the minimum number of examples required to split a node.
    /// * `min_samples_split` - Nodes with fewer examples become leaves.
    pub fn set_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.cfg.min_samples_split = min_samples_split;
        self
    }

    /// Replace the whole configuration.
    pub fn set_config(mut self, cfg: TreeConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the label predicted before the model is fitted.
    /// A fit replaces it with the most frequent training class.
    pub fn set_default_class(mut self, default_class: L) -> Self {
        self.default_class = default_class;
        self
    }
}
