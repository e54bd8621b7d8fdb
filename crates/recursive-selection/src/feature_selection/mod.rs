//! Feature selection utilities.
//!
//! Greedy forward selection and backward elimination scored by
//! cross-validated ROC AUC. Each step evaluates every remaining feature,
//! optionally in parallel, and a selection policy picks the winner.
pub mod evaluation;
pub mod policy;
pub mod recursive;
pub mod scorer;

pub use recursive::{recursive_feature_selection_roc_auc, RecursiveSelector, SelectionResult};
