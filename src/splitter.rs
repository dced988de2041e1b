//! Splitter
//!
//! Scores candidate splits of an example subset. A split partitions the
//! subset on every distinct value of one feature; its quality is the
//! information gain, the drop in base-2 class entropy achieved by the
//! partition.
use crate::constants::GAIN_TOLERANCE;
use crate::data::Category;
use crate::utils::ClassCounts;
use hashbrown::HashMap;

/// Examples of a subset grouped by their value of one feature.
///
/// Values appear in the order they are first met while walking the subset.
#[derive(Debug, Clone)]
pub struct Partition<'a, V> {
    pub values: Vec<&'a V>,
    pub subsets: Vec<Vec<usize>>,
}

impl<'a, V> Partition<'a, V> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a V, &[usize])> + '_ {
        self.values.iter().copied().zip(self.subsets.iter().map(|s| s.as_slice()))
    }
}

/// The outcome of evaluating one feature on one subset.
#[derive(Debug, Clone)]
pub struct SplitInfo<'a, V> {
    pub split_feature: usize,
    pub split_gain: f64,
    pub partition: Partition<'a, V>,
}

/// Class entropy, in bits, of the examples at `index`.
///
/// The subset must not be empty.
pub fn entropy<L: Category>(y: &[L], index: &[usize]) -> f64 {
    let total = index.len() as f64;
    ClassCounts::from_index(y, index)
        .iter()
        .map(|(_, count)| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Group the examples at `index` by their value of `feature`.
pub fn partition<'a, V: Category>(x: &'a [Vec<V>], index: &[usize], feature: usize) -> Partition<'a, V> {
    let mut position: HashMap<&'a V, usize> = HashMap::new();
    let mut values = Vec::new();
    let mut subsets: Vec<Vec<usize>> = Vec::new();
    for &i in index {
        let value = &x[i][feature];
        match position.get(value) {
            Some(&p) => subsets[p].push(i),
            None => {
                position.insert(value, values.len());
                values.push(value);
                subsets.push(vec![i]);
            }
        }
    }
    Partition { values, subsets }
}

/// Information gain of `partition` over a parent of `n` examples.
///
/// Empty buckets contribute nothing.
pub fn information_gain<V, L: Category>(parent_entropy: f64, y: &[L], partition: &Partition<'_, V>, n: usize) -> f64 {
    let n = n as f64;
    let children: f64 = partition
        .subsets
        .iter()
        .filter(|subset| !subset.is_empty())
        .map(|subset| (subset.len() as f64 / n) * entropy(y, subset))
        .sum();
    parent_entropy - children
}

/// Split evaluation strategy used while growing a tree.
pub trait Splitter {
    /// Impurity of the examples at `index`, which is never empty.
    fn impurity<L: Category>(&self, y: &[L], index: &[usize]) -> f64;

    /// Partition the subset on `feature` and score the partition.
    fn evaluate_split<'a, V: Category, L: Category>(
        &self,
        x: &'a [Vec<V>],
        y: &[L],
        index: &[usize],
        feature: usize,
        parent_impurity: f64,
    ) -> SplitInfo<'a, V>;

    /// Find the best split among `features`.
    ///
    /// Features are visited in the order given, a later feature only wins by
    /// improving on the best gain so far, which starts at zero. Returns
    /// `None` when no feature yields a positive gain.
    fn best_split<'a, V: Category, L: Category>(
        &self,
        x: &'a [Vec<V>],
        y: &[L],
        index: &[usize],
        features: &[usize],
    ) -> Option<SplitInfo<'a, V>> {
        let parent_impurity = self.impurity(y, index);
        let mut best: Option<SplitInfo<'a, V>> = None;
        let mut best_gain = 0.0;
        for &feature in features {
            let split_info = self.evaluate_split(x, y, index, feature, parent_impurity);
            if split_info.split_gain > best_gain + GAIN_TOLERANCE {
                best_gain = split_info.split_gain;
                best = Some(split_info);
            }
        }
        best
    }
}

/// Entropy based splitter, scoring splits by information gain.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropySplitter;

impl Splitter for EntropySplitter {
    fn impurity<L: Category>(&self, y: &[L], index: &[usize]) -> f64 {
        entropy(y, index)
    }

    fn evaluate_split<'a, V: Category, L: Category>(
        &self,
        x: &'a [Vec<V>],
        y: &[L],
        index: &[usize],
        feature: usize,
        parent_impurity: f64,
    ) -> SplitInfo<'a, V> {
        let partition = partition(x, index, feature);
        let split_gain = information_gain(parent_impurity, y, &partition, index.len());
        SplitInfo {
            split_feature: feature,
            split_gain,
            partition,
        }
    }
}
