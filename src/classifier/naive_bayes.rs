//! Naive Bayes
//!
//! Categorical naive Bayes with Laplace smoothing. Scores are summed
//! log-probabilities, so long rows do not underflow.
use super::config::ModelIO;
use super::Classifier;
use crate::data::{validate_training_set, Category};
use crate::errors::ClassifierError;
use crate::utils::{map_as_pairs, ClassCounts};
use hashbrown::HashMap;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Per-class occurrence counts of every value one feature takes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize",
    deserialize = "V: Deserialize<'de> + Eq + Hash"
))]
pub struct FeatureValueCounts<V> {
    /// Value to counts, indexed like the classifier's `classes`.
    #[serde(with = "map_as_pairs")]
    pub counts: HashMap<V, Vec<usize>>,
}

impl<V: Category> FeatureValueCounts<V> {
    /// Number of distinct values seen in training.
    pub fn cardinality(&self) -> usize {
        self.counts.len()
    }

    /// How often `value` occurred with the class at `class_idx`.
    pub fn count(&self, value: &V, class_idx: usize) -> usize {
        self.counts
            .get(value)
            .and_then(|c| c.get(class_idx))
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize, L: Serialize",
    deserialize = "V: Deserialize<'de> + Eq + Hash, L: Deserialize<'de>"
))]
pub struct NaiveBayesClassifier<V, L> {
    /// Distinct classes in first-seen order.
    pub classes: Vec<L>,
    pub class_counts: Vec<usize>,
    pub features: Vec<FeatureValueCounts<V>>,
    pub total_samples: usize,
    pub default_class: L,
}

impl<V: Category, L: Category + Default> Default for NaiveBayesClassifier<V, L> {
    fn default() -> Self {
        NaiveBayesClassifier::new(L::default())
    }
}

impl<V: Category, L: Category> NaiveBayesClassifier<V, L> {
    pub fn new(default_class: L) -> Self {
        NaiveBayesClassifier {
            classes: Vec::new(),
            class_counts: Vec::new(),
            features: Vec::new(),
            total_samples: 0,
            default_class,
        }
    }

    /// Smoothed log-probability score of every class for `row`, in the order
    /// of `classes`. Features beyond those seen in training are ignored.
    pub fn log_scores(&self, row: &[V]) -> Vec<f64> {
        let total = self.total_samples as f64;
        self.class_counts
            .iter()
            .enumerate()
            .map(|(class_idx, &class_count)| {
                let mut score = (class_count as f64 / total).ln();
                for (feature, value) in self.features.iter().zip(row) {
                    let count = feature.count(value, class_idx) as f64;
                    let prob = (count + 1.0) / (class_count + feature.cardinality()) as f64;
                    score += prob.ln();
                }
                score
            })
            .collect()
    }
}

impl<V: Category, L: Category> Classifier for NaiveBayesClassifier<V, L> {
    type Feature = V;
    type Label = L;

    fn fit(&mut self, x: &[Vec<V>], y: &[L]) -> Result<(), ClassifierError> {
        let n_features = validate_training_set(x, y)?;

        let counts = ClassCounts::from_labels(y);
        if let Some(majority) = counts.majority() {
            self.default_class = majority.clone();
        }
        self.classes = counts.labels();
        self.class_counts = counts.iter().map(|(_, c)| c).collect();
        let class_index: HashMap<&L, usize> = self.classes.iter().enumerate().map(|(i, c)| (c, i)).collect();

        let n_classes = self.classes.len();
        let mut features = vec![
            FeatureValueCounts {
                counts: HashMap::new()
            };
            n_features
        ];
        for (row, label) in x.iter().zip(y) {
            let class_idx = class_index[label];
            for (feature, value) in features.iter_mut().zip(row) {
                feature
                    .counts
                    .entry(value.clone())
                    .or_insert_with(|| vec![0; n_classes])[class_idx] += 1;
            }
        }
        for (i, feature) in features.iter().enumerate() {
            debug!("Feature {} has {} distinct values.", i, feature.cardinality());
        }
        self.features = features;
        self.total_samples = y.len();
        info!(
            "Fitted naive Bayes on {} examples, {} features and {} classes.",
            y.len(),
            n_features,
            n_classes
        );
        Ok(())
    }

    /// The class with the highest score wins, the first class in training
    /// order on a tie.
    fn predict_one(&self, row: &[V]) -> L {
        let mut best: Option<(usize, f64)> = None;
        for (i, score) in self.log_scores(row).into_iter().enumerate() {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((i, score));
            }
        }
        best.map_or(&self.default_class, |(i, _)| &self.classes[i]).clone()
    }
}

impl<V, L> ModelIO for NaiveBayesClassifier<V, L>
where
    V: Category + Serialize + DeserializeOwned,
    L: Category + Serialize + DeserializeOwned,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> (Vec<Vec<&'static str>>, Vec<&'static str>) {
        let x = vec![
            vec!["sunny", "hot"],
            vec!["sunny", "cool"],
            vec!["rain", "cool"],
            vec!["rain", "hot"],
            vec!["rain", "cool"],
        ];
        let y = vec!["no", "no", "yes", "yes", "yes"];
        (x, y)
    }

    #[test]
    fn test_naive_bayes_counts() {
        let (x, y) = weather();
        let mut model = NaiveBayesClassifier::new("none");
        model.fit(&x, &y).unwrap();
        assert_eq!(model.classes, vec!["no", "yes"]);
        assert_eq!(model.class_counts, vec![2, 3]);
        assert_eq!(model.total_samples, 5);
        assert_eq!(model.default_class, "yes");
        assert_eq!(model.features[0].cardinality(), 2);
        assert_eq!(model.features[0].count(&"rain", 1), 3);
        assert_eq!(model.features[0].count(&"rain", 0), 0);
        assert_eq!(model.features[1].count(&"fog", 0), 0);
    }

    #[test]
    fn test_naive_bayes_scores() {
        let (x, y) = weather();
        let mut model = NaiveBayesClassifier::new("none");
        model.fit(&x, &y).unwrap();
        let scores = model.log_scores(&["sunny", "hot"]);
        // no: 2/5 * (2+1)/(2+2) * (1+1)/(2+2)
        let expected_no = (0.4f64).ln() + (0.75f64).ln() + (0.5f64).ln();
        // yes: 3/5 * (0+1)/(3+2) * (1+1)/(3+2)
        let expected_yes = (0.6f64).ln() + (0.2f64).ln() + (0.4f64).ln();
        assert!((scores[0] - expected_no).abs() < 1e-12);
        assert!((scores[1] - expected_yes).abs() < 1e-12);
        assert_eq!(model.predict_one(&["sunny", "hot"]), "no");
        assert_eq!(model.predict_one(&["rain", "cool"]), "yes");
    }

    #[test]
    fn test_naive_bayes_unseen_value() {
        let (x, y) = weather();
        let mut model = NaiveBayesClassifier::new("none");
        model.fit(&x, &y).unwrap();
        // Unseen values get the smoothed floor, which is higher for the smaller class:
        // no = 0.4 / 16 = 0.025, yes = 0.6 / 25 = 0.024.
        assert_eq!(model.predict_one(&["fog", "warm"]), "no");
        assert_eq!(model.predict(&[vec!["rain", "warm"], vec!["sunny", "cool"]]), vec!["yes", "no"]);
    }

    #[test]
    fn test_naive_bayes_tie_goes_to_first_class() {
        let x = vec![vec!["a"], vec!["a"]];
        let y = vec!["first", "second"];
        let mut model = NaiveBayesClassifier::new("none");
        model.fit(&x, &y).unwrap();
        assert_eq!(model.predict_one(&["a"]), "first");
    }

    #[test]
    fn test_naive_bayes_unfitted_and_errors() {
        let mut model: NaiveBayesClassifier<&str, String> = NaiveBayesClassifier::default();
        assert_eq!(model.predict_one(&["a"]), String::new());
        assert!(matches!(
            model.fit(&[], &[]),
            Err(ClassifierError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn test_naive_bayes_json() {
        let x = vec![vec![1i64, 0], vec![1, 1], vec![0, 1], vec![0, 0]];
        let y = vec![true, true, false, false];
        let mut model = NaiveBayesClassifier::new(false);
        model.fit(&x, &y).unwrap();
        let loaded = NaiveBayesClassifier::<i64, bool>::from_json(&model.json_dump().unwrap()).unwrap();
        assert_eq!(loaded.predict(&x), model.predict(&x));
        assert_eq!(loaded.predict(&x), y);
    }
}
