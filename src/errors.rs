//! Errors
//!
//! Custom error types used throughout the `arboretum` crate.
use thiserror::Error;

/// Errors that can occur while fitting or persisting a classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// No training examples were provided.
    #[error("The training set is empty, at least one example is required.")]
    EmptyTrainingSet,
    /// First value is the number of rows, second is the number of labels.
    #[error("The feature table has {0} rows, but {1} labels were provided.")]
    LabelCountMismatch(usize, usize),
    /// First value is the row, second is the expected length, third is what was found.
    #[error("Row {0} has {2} features, expected {1}.")]
    RaggedRow(usize, usize, usize),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// A field could not be parsed, first value is the text, second the record, third the column.
    #[error("Unable to parse value {0:?} in record {1}, column {2}.")]
    ParseValue(String, usize, usize),
    /// Unable to write model to file.
    #[error("Unable to write model to file: {0}")]
    UnableToWrite(String),
    /// Unable to read model or data from file.
    #[error("Unable to read from a file {0}")]
    UnableToRead(String),
}
