use crate::data::Category;
use crate::errors::ClassifierError;
use hashbrown::HashMap;

// Validation
pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), ClassifierError> {
    if value.is_nan() || value < min || max < value {
        let ex_msg = format!("real value within range {} and {}", min, max);
        Err(ClassifierError::InvalidParameter(
            parameter.to_string(),
            ex_msg,
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_positive_usize_parameter(value: usize, parameter: &str) -> Result<(), ClassifierError> {
    if value == 0 {
        Err(ClassifierError::InvalidParameter(
            parameter.to_string(),
            "an integer greater than 0".to_string(),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Frequency table of class labels.
///
/// Labels are enumerated in the order they were first added, so every
/// tie-break that walks this table is deterministic.
#[derive(Debug, Clone)]
pub struct ClassCounts<'a, L> {
    counts: Vec<(&'a L, usize)>,
    position: HashMap<&'a L, usize>,
    total: usize,
}

impl<'a, L: Category> Default for ClassCounts<'a, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, L: Category> ClassCounts<'a, L> {
    pub fn new() -> Self {
        ClassCounts {
            counts: Vec::new(),
            position: HashMap::new(),
            total: 0,
        }
    }

    /// Count the labels of the examples at `index`.
    pub fn from_index(y: &'a [L], index: &[usize]) -> Self {
        let mut counts = Self::new();
        for &i in index {
            counts.add(&y[i]);
        }
        counts
    }

    /// Count every label in `y`.
    pub fn from_labels(y: &'a [L]) -> Self {
        let mut counts = Self::new();
        for label in y {
            counts.add(label);
        }
        counts
    }

    pub fn add(&mut self, label: &'a L) {
        self.total += 1;
        match self.position.get(label) {
            Some(&p) => self.counts[p].1 += 1,
            None => {
                self.position.insert(label, self.counts.len());
                self.counts.push((label, 1));
            }
        }
    }

    /// The most frequent label, the earliest seen one wins ties.
    pub fn majority(&self) -> Option<&'a L> {
        self.majority_with_count().map(|(label, _)| label)
    }

    pub fn majority_with_count(&self) -> Option<(&'a L, usize)> {
        let mut best: Option<(&'a L, usize)> = None;
        for &(label, count) in &self.counts {
            match best {
                Some((_, c)) if count <= c => {}
                _ => best = Some((label, count)),
            }
        }
        best
    }

    /// True when exactly one distinct label was counted.
    pub fn is_pure(&self) -> bool {
        self.counts.len() == 1
    }

    pub fn get(&self, label: &L) -> usize {
        self.position.get(label).map_or(0, |&p| self.counts[p].1)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of labels counted.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a L, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Distinct labels, cloned, in first-seen order.
    pub fn labels(&self) -> Vec<L> {
        self.counts.iter().map(|(label, _)| (*label).clone()).collect()
    }
}

/// Serde adapter storing a hash map as a sequence of key/value pairs, so
/// maps keyed by non-string values survive a JSON round trip.
pub(crate) mod map_as_pairs {
    use hashbrown::HashMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::hash::Hash;

    pub fn serialize<K, T, S>(map: &HashMap<K, T>, s: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        T: Serialize,
        S: Serializer,
    {
        s.collect_seq(map.iter())
    }

    pub fn deserialize<'de, K, T, D>(d: D) -> Result<HashMap<K, T>, D::Error>
    where
        K: Deserialize<'de> + Eq + Hash,
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(K, T)>::deserialize(d)?;
        Ok(pairs.into_iter().collect())
    }
}
