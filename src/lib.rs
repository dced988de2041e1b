// Modules
pub mod classifier;
pub mod constants;
pub mod data;
pub mod errors;
pub mod metrics;
pub mod node;
pub mod splitter;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use classifier::config::{ImportanceMethod, ModelIO, TreeConfig};
pub use classifier::decision_tree::DecisionTreeClassifier;
pub use classifier::knn::KnnClassifier;
pub use classifier::naive_bayes::NaiveBayesClassifier;
pub use classifier::one_r::OneRClassifier;
pub use classifier::{Classifier, Input, Prediction};
pub use data::{Category, FeatureValue};
pub use errors::ClassifierError;
