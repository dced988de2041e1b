//! k-Nearest Neighbours
//!
//! Lazy classifier over numeric features: training stores the data, and a
//! prediction is the majority label among the `k` training rows closest in
//! Euclidean distance.
use super::config::ModelIO;
use super::Classifier;
use crate::constants::DEFAULT_K;
use crate::data::{validate_training_set, Category};
use crate::errors::ClassifierError;
use crate::utils::{validate_positive_usize_parameter, ClassCounts};
use log::info;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnnClassifier<L> {
    pub k: usize,
    pub x_train: Vec<Vec<f64>>,
    pub y_train: Vec<L>,
    pub default_class: L,
}

impl<L: Category + Default> Default for KnnClassifier<L> {
    fn default() -> Self {
        KnnClassifier {
            k: DEFAULT_K,
            x_train: Vec::new(),
            y_train: Vec::new(),
            default_class: L::default(),
        }
    }
}

impl<L: Category> KnnClassifier<L> {
    /// k-nearest-neighbour classifier
    ///
    /// * `k` - Number of neighbours that vote, at least 1.
    /// * `default_class` - Label predicted until the model is fitted.
    pub fn new(k: usize, default_class: L) -> Result<Self, ClassifierError> {
        validate_positive_usize_parameter(k, "k")?;
        Ok(KnnClassifier {
            k,
            x_train: Vec::new(),
            y_train: Vec::new(),
            default_class,
        })
    }

    /// Indices of the `k` training rows nearest to `row`, nearest first.
    /// Rows at equal distance keep their training order.
    pub fn neighbours(&self, row: &[f64]) -> Vec<usize> {
        let mut distances: Vec<(f64, usize)> = self
            .x_train
            .iter()
            .enumerate()
            .map(|(i, xi)| (euclidean_distance(xi, row), i))
            .collect();
        distances.sort_by(|a, b| a.0.total_cmp(&b.0));
        distances.into_iter().take(self.k).map(|(_, i)| i).collect()
    }

    /// Generate predictions for many rows.
    ///
    /// * `rows` - Rows to predict, the output keeps their order.
    /// * `parallel` - Predict in parallel.
    pub fn predict_batch(&self, rows: &[Vec<f64>], parallel: bool) -> Vec<L> {
        if parallel {
            rows.par_iter().map(|row| self.predict_one(row)).collect()
        } else {
            rows.iter().map(|row| self.predict_one(row)).collect()
        }
    }
}

/// Euclidean distance over the features both rows share.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

impl<L: Category> Classifier for KnnClassifier<L> {
    type Feature = f64;
    type Label = L;

    fn fit(&mut self, x: &[Vec<f64>], y: &[L]) -> Result<(), ClassifierError> {
        validate_positive_usize_parameter(self.k, "k")?;
        let n_features = validate_training_set(x, y)?;
        if let Some(majority) = ClassCounts::from_labels(y).majority() {
            self.default_class = majority.clone();
        }
        self.x_train = x.to_vec();
        self.y_train = y.to_vec();
        info!(
            "Stored {} examples with {} features for {}-nearest-neighbour voting.",
            y.len(),
            n_features,
            self.k
        );
        Ok(())
    }

    /// The vote goes to the most frequent label among the neighbours; on a
    /// tie the label of the nearest neighbour involved wins.
    fn predict_one(&self, row: &[f64]) -> L {
        let neighbours = self.neighbours(row);
        ClassCounts::from_index(&self.y_train, &neighbours)
            .majority()
            .unwrap_or(&self.default_class)
            .clone()
    }
}

impl<L> ModelIO for KnnClassifier<L> where L: Category + Serialize + DeserializeOwned {}
