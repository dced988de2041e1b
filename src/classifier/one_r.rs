//! One Rule
//!
//! Picks the single feature whose value-to-majority-class rule table makes
//! the fewest mistakes on the training set.
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

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize, L: Serialize",
    deserialize = "V: Deserialize<'de> + Eq + Hash, L: Deserialize<'de>"
))]
pub struct OneRClassifier<V, L> {
    pub best_feature: Option<usize>,
    #[serde(with = "map_as_pairs")]
    pub rules: HashMap<V, L>,
    /// Training errors of the chosen rule table.
    pub best_error: usize,
    /// Most frequent class of the training set, used for values without a rule.
    pub default_class: L,
}

impl<V: Category, L: Category + Default> Default for OneRClassifier<V, L> {
    fn default() -> Self {
        OneRClassifier::new(L::default())
    }
}

/// Rule table of one feature and the number of training rows it gets wrong.
fn feature_rules<V: Category, L: Category>(x: &[Vec<V>], y: &[L], feature: usize) -> (HashMap<V, L>, usize) {
    let mut by_value: HashMap<&V, ClassCounts<L>> = HashMap::new();
    for (row, label) in x.iter().zip(y) {
        by_value.entry(&row[feature]).or_default().add(label);
    }
    let mut errors = 0;
    let mut rules = HashMap::with_capacity(by_value.len());
    for (value, counts) in by_value {
        if let Some((label, count)) = counts.majority_with_count() {
            errors += counts.total() - count;
            rules.insert(value.clone(), label.clone());
        }
    }
    (rules, errors)
}

impl<V: Category, L: Category> OneRClassifier<V, L> {
    pub fn new(default_class: L) -> Self {
        OneRClassifier {
            best_feature: None,
            rules: HashMap::new(),
            best_error: 0,
            default_class,
        }
    }

    /// Index of the chosen feature, `None` before a fit.
    pub fn get_best_feature_index(&self) -> Option<usize> {
        self.best_feature
    }
}

impl<V: Category, L: Category> Classifier for OneRClassifier<V, L> {
    type Feature = V;
    type Label = L;

    /// On equal error counts the lowest feature index is kept.
    fn fit(&mut self, x: &[Vec<V>], y: &[L]) -> Result<(), ClassifierError> {
        let n_features = validate_training_set(x, y)?;
        if let Some(majority) = ClassCounts::from_labels(y).majority() {
            self.default_class = majority.clone();
        }

        let mut best: Option<(usize, HashMap<V, L>, usize)> = None;
        for feature in 0..n_features {
            let (rules, errors) = feature_rules(x, y, feature);
            debug!("Feature {} makes {} errors with {} rules.", feature, errors, rules.len());
            if best.as_ref().map_or(true, |(_, _, best_errors)| errors < *best_errors) {
                best = Some((feature, rules, errors));
            }
        }
        match best {
            Some((feature, rules, errors)) => {
                info!(
                    "Chose feature {} of {} with {} errors on {} examples.",
                    feature,
                    n_features,
                    errors,
                    y.len()
                );
                self.best_feature = Some(feature);
                self.rules = rules;
                self.best_error = errors;
            }
            None => {
                // Rows without features, every prediction is the global mode.
                self.best_feature = None;
                self.rules = HashMap::new();
                self.best_error = y.len() - ClassCounts::from_labels(y).majority_with_count().map_or(0, |(_, c)| c);
            }
        }
        Ok(())
    }

    fn predict_one(&self, row: &[V]) -> L {
        self.best_feature
            .and_then(|feature| row.get(feature))
            .and_then(|value| self.rules.get(value))
            .unwrap_or(&self.default_class)
            .clone()
    }
}

impl<V, L> ModelIO for OneRClassifier<V, L>
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
            vec!["hot", "sunny"],
            vec!["cool", "sunny"],
            vec!["cool", "rain"],
            vec!["hot", "rain"],
            vec!["hot", "overcast"],
        ];
        let y = vec!["no", "no", "yes", "yes", "yes"];
        (x, y)
    }

    #[test]
    fn test_one_r_fit() {
        let (x, y) = weather();
        let mut model = OneRClassifier::new("none");
        model.fit(&x, &y).unwrap();
        assert_eq!(model.get_best_feature_index(), Some(1));
        assert_eq!(model.best_error, 0);
        assert_eq!(model.rules.len(), 3);
        assert_eq!(model.rules[&"sunny"], "no");
        assert_eq!(model.default_class, "yes");
        assert_eq!(model.predict(&x), y);
    }

    #[test]
    fn test_one_r_unseen_value_uses_global_mode() {
        let (x, y) = weather();
        let mut model = OneRClassifier::new("none");
        model.fit(&x, &y).unwrap();
        assert_eq!(model.predict_one(&["hot", "fog"]), "yes");
        assert_eq!(model.predict_one(&["hot"]), "yes");
    }

    #[test]
    fn test_one_r_tie_keeps_first_feature() {
        let x = vec![vec!["a", "c"], vec!["b", "d"]];
        let y = vec!["x", "y"];
        let mut model = OneRClassifier::new("none");
        model.fit(&x, &y).unwrap();
        assert_eq!(model.get_best_feature_index(), Some(0));
    }

    #[test]
    fn test_one_r_unfitted_and_errors() {
        let mut model: OneRClassifier<&str, String> = OneRClassifier::default();
        assert_eq!(model.get_best_feature_index(), None);
        assert_eq!(model.predict_one(&["a"]), String::new());
        assert!(matches!(
            model.fit(&[vec!["a"]], &[]),
            Err(ClassifierError::LabelCountMismatch(1, 0))
        ));
    }

    #[test]
    fn test_one_r_json() {
        let x = vec![vec![1i64, 7], vec![2, 7], vec![1, 8]];
        let y = vec!["one", "two", "one"];
        let y: Vec<String> = y.into_iter().map(String::from).collect();
        let mut model = OneRClassifier::new(String::new());
        model.fit(&x, &y).unwrap();
        let loaded = OneRClassifier::<i64, String>::from_json(&model.json_dump().unwrap()).unwrap();
        assert_eq!(loaded.get_best_feature_index(), Some(0));
        assert_eq!(loaded.predict(&x), y);
    }
}
