use std::error::Error;
use std::fmt;

/// Errors raised while searching for a feature subset.
#[derive(Debug)]
pub enum SelectionError {
    /// The classifier prototype is missing required capabilities.
    UnsupportedClassifier {
        name: String,
        missing: Vec<&'static str>,
    },
    /// Cross-validation needs at least two folds.
    InvalidFoldCount(usize),
    TooFewSamples {
        n_splits: usize,
        n_samples: usize,
    },
    /// Labels must hold exactly two distinct values; carries the number found.
    InvalidLabels(usize),
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// AUC is undefined when only one class is present.
    UndefinedAuc,
    /// An input to a metric contains NaN or infinity.
    NonFiniteInput(&'static str),
    NoFiniteScore {
        step: usize,
    },
    /// The classifier produced a probability matrix of the wrong shape.
    ClassifierOutput {
        feature: usize,
        rows: usize,
        cols: usize,
        expected_rows: usize,
    },
    /// The classifier predicted NaN or infinity for a test row.
    NonFiniteScore {
        feature: usize,
        row: usize,
    },
    /// Fitting or predicting failed while scoring a candidate feature.
    Candidate {
        feature: usize,
        source: anyhow::Error,
    },
    ThreadPool(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectionError::UnsupportedClassifier { name, missing } => write!(
                f,
                "Classifier sanity check failed: '{}' is missing {}",
                name,
                missing.join(", ")
            ),
            SelectionError::InvalidFoldCount(n) => {
                write!(f, "'cv_steps' must be 2 or higher, got {}", n)
            }
            SelectionError::TooFewSamples { n_splits, n_samples } => write!(
                f,
                "Cannot split {} samples into {} folds",
                n_samples, n_splits
            ),
            SelectionError::InvalidLabels(n) => write!(
                f,
                "Labels must contain exactly two classes, found {}",
                n
            ),
            SelectionError::ShapeMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "Length of {} must be {}, got {}",
                what, expected, found
            ),
            SelectionError::UndefinedAuc => write!(
                f,
                "ROC AUC is undefined when only one class is present in the labels"
            ),
            SelectionError::NonFiniteInput(what) => {
                write!(f, "Input {} contains NaN or infinity", what)
            }
            SelectionError::NoFiniteScore { step } => {
                write!(f, "No finite AUC score available at step {}", step)
            }
            SelectionError::ClassifierOutput {
                feature,
                rows,
                cols,
                expected_rows,
            } => write!(
                f,
                "Classifier returned a ({}, {}) probability matrix for feature {}, expected ({}, 2)",
                rows, cols, feature, expected_rows
            ),
            SelectionError::NonFiniteScore { feature, row } => write!(
                f,
                "Classifier predicted a non-finite probability for sample {} while scoring feature {}",
                row, feature
            ),
            SelectionError::Candidate { feature, source } => {
                write!(f, "Evaluation of feature {} failed: {}", feature, source)
            }
            SelectionError::ThreadPool(msg) => {
                write!(f, "Failed to build worker pool: {}", msg)
            }
        }
    }
}

impl Error for SelectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SelectionError::Candidate { source, .. } => Some(&**source),
            _ => None,
        }
    }
}
