//! Classifier Configuration
//!
//! Stopping criteria for tree induction, and the JSON persistence shared by
//! every fitted model.
use crate::constants::MIN_SAMPLES_SPLIT;
use crate::errors::ClassifierError;
use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Method to calculate feature importance.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ImportanceMethod {
    /// The number of nodes that split on the feature.
    Weight,
    /// The average information gain across all splits the feature is used in.
    Gain,
    /// The average number of examples across all splits the feature is used in.
    Cover,
    /// The total information gain across all splits the feature is used in.
    TotalGain,
    /// The total number of examples across all splits the feature is used in.
    TotalCover,
}

fn default_max_depth() -> Option<usize> {
    None
}
fn default_min_samples_split() -> usize {
    MIN_SAMPLES_SPLIT
}

/// Configuration for the `DecisionTreeClassifier`.
///
/// Fixed when training starts and never changed while a tree grows.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct TreeConfig {
    /// Maximum depth of any leaf, unbounded when `None`.
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,
    /// Minimum number of examples a node needs before a split is attempted.
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            max_depth: None,
            min_samples_split: MIN_SAMPLES_SPLIT,
        }
    }
}

impl TreeConfig {
    pub fn validate_parameters(&self) -> Result<(), ClassifierError> {
        if self.min_samples_split < MIN_SAMPLES_SPLIT {
            // A single example is always pure, so these behave like the default.
            warn!(
                "min_samples_split of {} has the same effect as {}.",
                self.min_samples_split, MIN_SAMPLES_SPLIT
            );
        }
        Ok(())
    }
}

/// IO
pub trait ModelIO: Serialize + DeserializeOwned + Sized {
    /// Save a model as a json object to a file.
    ///
    /// * `path` - Path to save model.
    fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<(), ClassifierError> {
        fs::write(path, self.json_dump()?).map_err(|e| ClassifierError::UnableToWrite(e.to_string()))
    }

    /// Dump a model as a json object
    fn json_dump(&self) -> Result<String, ClassifierError> {
        serde_json::to_string(self).map_err(|e| ClassifierError::UnableToWrite(e.to_string()))
    }

    /// Load a model from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, ClassifierError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| ClassifierError::UnableToRead(e.to_string()))
    }

    /// Load a model from a path to a json model object.
    ///
    /// * `path` - Path to load model from.
    fn load_model<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let json_str = fs::read_to_string(path).map_err(|e| ClassifierError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ModelIO for TreeConfig {}
