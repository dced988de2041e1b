//! Tree Prediction Methods
//!
//! Traversal of a fitted tree for single rows and batches. A traversal that
//! meets a feature value with no branch stops at that node and returns its
//! majority class.
use super::tree::Tree;
use crate::data::Category;
use crate::node::Node;
use rayon::prelude::*;

impl<V: Category, L: Category> Tree<V, L> {
    /// Predict the label of one row, `None` only for an empty tree.
    pub fn predict_row(&self, row: &[V]) -> Option<&L> {
        let mut node = self.nodes.first()?;
        loop {
            match node {
                Node::Leaf { label, .. } => return Some(label),
                Node::Internal { majority_class, .. } => match node.get_child_idx(row) {
                    Some(child_idx) => node = &self.nodes[child_idx],
                    None => return Some(majority_class),
                },
            }
        }
    }

    fn predict_single_threaded(&self, rows: &[Vec<V>], default: &L) -> Vec<L> {
        rows.iter()
            .map(|row| self.predict_row(row).unwrap_or(default).clone())
            .collect()
    }

    fn predict_parallel(&self, rows: &[Vec<V>], default: &L) -> Vec<L> {
        rows.par_iter()
            .map(|row| self.predict_row(row).unwrap_or(default).clone())
            .collect()
    }

    /// Predict a label for every row, in row order.
    ///
    /// * `rows` - Rows to predict.
    /// * `parallel` - Predict in parallel.
    /// * `default` - Label returned when the tree is empty.
    pub fn predict(&self, rows: &[Vec<V>], parallel: bool, default: &L) -> Vec<L> {
        if parallel {
            self.predict_parallel(rows, default)
        } else {
            self.predict_single_threaded(rows, default)
        }
    }

    /// Positions of the nodes visited while predicting `row`, root first.
    pub fn predict_nodes(&self, row: &[V]) -> Vec<usize> {
        let mut v = Vec::new();
        let mut node_idx = 0;
        while let Some(node) = self.nodes.get(node_idx) {
            v.push(node_idx);
            match node.get_child_idx(row) {
                Some(child_idx) => node_idx = child_idx,
                None => break,
            }
        }
        v
    }
}
