//! Classifiers
//!
//! The fit/predict contract shared by every model in the crate, and the
//! models themselves.
use crate::errors::ClassifierError;

// public modules
pub mod config;
pub mod decision_tree;
pub mod knn;
pub mod naive_bayes;
pub mod one_r;

// private modules
mod setters;

/// Input accepted by [`Classifier::predict_input`].
#[derive(Debug, Clone, Copy)]
pub enum Input<'a, V> {
    /// A single feature vector.
    Row(&'a [V]),
    /// A table of feature vectors.
    Table(&'a [Vec<V>]),
}

/// Output of [`Classifier::predict_input`], shaped like its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction<L> {
    Single(L),
    Many(Vec<L>),
}

impl<L> Prediction<L> {
    /// Flatten into a vector of labels.
    pub fn into_vec(self) -> Vec<L> {
        match self {
            Prediction::Single(label) => vec![label],
            Prediction::Many(labels) => labels,
        }
    }
}

/// Supervised classifier over rows of feature values.
pub trait Classifier {
    type Feature;
    type Label: Clone;

    /// Train from scratch on a rectangular table and one label per row.
    ///
    /// Any previous fit is discarded.
    fn fit(&mut self, x: &[Vec<Self::Feature>], y: &[Self::Label]) -> Result<(), ClassifierError>;

    /// Predict the label of one row. Never fails: an unfitted model answers
    /// with its default class.
    fn predict_one(&self, row: &[Self::Feature]) -> Self::Label;

    /// Predict a label for every row, in row order.
    fn predict(&self, rows: &[Vec<Self::Feature>]) -> Vec<Self::Label> {
        rows.iter().map(|row| self.predict_one(row)).collect()
    }

    /// Predict a row or a table, returning one label or a sequence of labels.
    fn predict_input(&self, input: Input<'_, Self::Feature>) -> Prediction<Self::Label> {
        match input {
            Input::Row(row) => Prediction::Single(self.predict_one(row)),
            Input::Table(rows) => Prediction::Many(self.predict(rows)),
        }
    }
}
