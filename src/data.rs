//! Data
//!
//! Feature and label types shared by every classifier, together with the
//! validation applied at the training boundary and a few helpers for loading
//! and splitting tabular data.
use crate::errors::ClassifierError;
use crate::utils::validate_float_parameter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::path::Path;

/// Capability required of categorical feature values and class labels.
///
/// Values must be comparable for equality and usable as hash map keys. The
/// thread-safety bounds allow a fitted model to be read from several
/// prediction calls at once.
pub trait Category: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T> Category for T where T: Clone + Eq + Hash + Debug + Send + Sync {}

/// A single categorical feature value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureValue {
    /// Integer, or a numeric value that has already been discretized.
    Int(i64),
    /// Free text category.
    Str(String),
    /// Boolean flag.
    Bool(bool),
}

impl FeatureValue {
    /// Infer a value from raw text.
    ///
    /// `true`/`false` (any case) become `Bool`, integer text becomes `Int`
    /// and everything else is kept as `Str`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("true") {
            FeatureValue::Bool(true)
        } else if s.eq_ignore_ascii_case("false") {
            FeatureValue::Bool(false)
        } else if let Ok(i) = s.parse::<i64>() {
            FeatureValue::Int(i)
        } else {
            FeatureValue::Str(s.to_string())
        }
    }
}

impl Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeatureValue::Int(i) => write!(f, "{}", i),
            FeatureValue::Str(s) => write!(f, "{}", s),
            FeatureValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Int(v)
    }
}

impl From<bool> for FeatureValue {
    fn from(v: bool) -> Self {
        FeatureValue::Bool(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Str(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Str(v)
    }
}

/// Check that a training set is usable, returning the number of features.
///
/// The table must hold at least one row, one label per row, and every row
/// must have the same length as the first.
pub fn validate_training_set<V, L>(x: &[Vec<V>], y: &[L]) -> Result<usize, ClassifierError> {
    let first = x.first().ok_or(ClassifierError::EmptyTrainingSet)?;
    if x.len() != y.len() {
        return Err(ClassifierError::LabelCountMismatch(x.len(), y.len()));
    }
    let n_features = first.len();
    if let Some((i, row)) = x.iter().enumerate().find(|(_, row)| row.len() != n_features) {
        return Err(ClassifierError::RaggedRow(i, n_features, row.len()));
    }
    Ok(n_features)
}

/// Read a categorical data set from a CSV file.
///
/// The last column of every record is the class label, all preceding
/// columns are features parsed with [`FeatureValue::parse`]. Empty records
/// are skipped.
///
/// * `path` - Location of the CSV file.
/// * `has_headers` - Whether the first record is a header row.
pub fn read_csv<P: AsRef<Path>>(
    path: P,
    has_headers: bool,
) -> Result<(Vec<Vec<FeatureValue>>, Vec<String>), ClassifierError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .from_path(path)
        .map_err(|e| ClassifierError::UnableToRead(e.to_string()))?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ClassifierError::UnableToRead(e.to_string()))?;
        let Some((label, features)) = split_label(&record) else {
            continue;
        };
        x.push(features.iter().map(|s| FeatureValue::parse(s)).collect());
        y.push(label.trim().to_string());
    }
    Ok((x, y))
}

/// Read a numeric data set from a CSV file.
///
/// The last column is the class label. The first `skip` columns (for
/// instance a row identifier) are ignored, the remaining ones must parse as
/// `f64`.
pub fn read_numeric_csv<P: AsRef<Path>>(
    path: P,
    has_headers: bool,
    skip: usize,
) -> Result<(Vec<Vec<f64>>, Vec<String>), ClassifierError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .from_path(path)
        .map_err(|e| ClassifierError::UnableToRead(e.to_string()))?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (r, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ClassifierError::UnableToRead(e.to_string()))?;
        let Some((label, features)) = split_label(&record) else {
            continue;
        };
        let row = features
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(c, s)| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| ClassifierError::ParseValue(s.to_string(), r, c))
            })
            .collect::<Result<Vec<f64>, ClassifierError>>()?;
        x.push(row);
        y.push(label.trim().to_string());
    }
    Ok((x, y))
}

fn split_label(record: &csv::StringRecord) -> Option<(&str, Vec<&str>)> {
    if record.iter().all(|s| s.trim().is_empty()) {
        return None;
    }
    let fields: Vec<&str> = record.iter().collect();
    let (label, features) = fields.split_last()?;
    Some((label, features.to_vec()))
}

/// Result of [`train_test_split`].
#[derive(Debug, Clone)]
pub struct TrainTestSplit<V, L> {
    pub x_train: Vec<Vec<V>>,
    pub y_train: Vec<L>,
    pub x_test: Vec<Vec<V>>,
    pub y_test: Vec<L>,
}

/// Shuffle a data set with a seeded generator and hold out a test fraction.
///
/// * `test_fraction` - Share of the rows, in `[0, 1]`, placed in the test set.
/// * `seed` - Seed for the shuffle, equal seeds give equal splits.
pub fn train_test_split<V: Clone, L: Clone>(
    x: &[Vec<V>],
    y: &[L],
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit<V, L>, ClassifierError> {
    validate_float_parameter(test_fraction, 0.0, 1.0, "test_fraction")?;
    if x.len() != y.len() {
        return Err(ClassifierError::LabelCountMismatch(x.len(), y.len()));
    }

    let mut index: Vec<usize> = (0..x.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    index.shuffle(&mut rng);

    let n_test = (x.len() as f64 * test_fraction).round() as usize;
    let (test_index, train_index) = index.split_at(n_test);
    let gather_x = |idx: &[usize]| idx.iter().map(|&i| x[i].clone()).collect::<Vec<_>>();
    let gather_y = |idx: &[usize]| idx.iter().map(|&i| y[i].clone()).collect::<Vec<_>>();

    Ok(TrainTestSplit {
        x_train: gather_x(train_index),
        y_train: gather_y(train_index),
        x_test: gather_x(test_index),
        y_test: gather_y(test_index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_feature_value_parse() {
        assert_eq!(FeatureValue::parse("42"), FeatureValue::Int(42));
        assert_eq!(FeatureValue::parse("-3"), FeatureValue::Int(-3));
        assert_eq!(FeatureValue::parse("TRUE"), FeatureValue::Bool(true));
        assert_eq!(FeatureValue::parse(" false "), FeatureValue::Bool(false));
        assert_eq!(FeatureValue::parse("Sunny"), FeatureValue::Str("Sunny".to_string()));
        assert_eq!(FeatureValue::parse("1.5"), FeatureValue::Str("1.5".to_string()));
        assert_eq!(FeatureValue::from("hot").to_string(), "hot");
    }

    #[test]
    fn test_validate_training_set() {
        let x = vec![vec![1, 2], vec![3, 4]];
        assert_eq!(validate_training_set(&x, &["a", "b"]).unwrap(), 2);

        let empty: Vec<Vec<i64>> = Vec::new();
        let no_labels: Vec<&str> = Vec::new();
        assert!(matches!(
            validate_training_set(&empty, &no_labels),
            Err(ClassifierError::EmptyTrainingSet)
        ));
        assert!(matches!(
            validate_training_set(&x, &["a"]),
            Err(ClassifierError::LabelCountMismatch(2, 1))
        ));

        let ragged = vec![vec![1, 2], vec![3, 4], vec![5]];
        assert!(matches!(
            validate_training_set(&ragged, &["a", "b", "c"]),
            Err(ClassifierError::RaggedRow(2, 2, 1))
        ));
    }

    #[test]
    fn test_read_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "outlook,windy,play").unwrap();
        writeln!(file, "Sunny,false,No").unwrap();
        writeln!(file, "Rain,true,Yes").unwrap();
        writeln!(file, ",,").unwrap();

        let (x, y) = read_csv(file.path(), true).unwrap();
        assert_eq!(y, vec!["No".to_string(), "Yes".to_string()]);
        assert_eq!(x[1], vec![FeatureValue::from("Rain"), FeatureValue::Bool(true)]);
    }

    #[test]
    fn test_read_numeric_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,a,b,class").unwrap();
        writeln!(file, "1,5.1,3.5,setosa").unwrap();
        writeln!(file, "2,6.2,2.9,versicolor").unwrap();

        let (x, y) = read_numeric_csv(file.path(), true, 1).unwrap();
        assert_eq!(x, vec![vec![5.1, 3.5], vec![6.2, 2.9]]);
        assert_eq!(y[1], "versicolor");

        let mut bad = NamedTempFile::new().unwrap();
        writeln!(bad, "1,oops,setosa").unwrap();
        assert!(matches!(
            read_numeric_csv(bad.path(), false, 0),
            Err(ClassifierError::ParseValue(_, 0, 1))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_csv("resources/does_not_exist.csv", true),
            Err(ClassifierError::UnableToRead(_))
        ));
    }

    #[test]
    fn test_train_test_split() {
        let x: Vec<Vec<i64>> = (0..10).map(|i| vec![i]).collect();
        let y: Vec<i64> = (0..10).collect();

        let split = train_test_split(&x, &y, 0.3, 7).unwrap();
        assert_eq!(split.x_test.len(), 3);
        assert_eq!(split.x_train.len(), 7);
        // Rows and labels stay paired.
        for (row, label) in split.x_train.iter().zip(&split.y_train) {
            assert_eq!(row[0], *label);
        }

        let again = train_test_split(&x, &y, 0.3, 7).unwrap();
        assert_eq!(split.y_test, again.y_test);

        assert!(train_test_split(&x, &y, 1.5, 7).is_err());
    }
}
