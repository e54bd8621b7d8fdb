//! recursive-selection: greedy feature subset search scored by cross-validated ROC AUC.
//!
//! A classifier prototype is repeatedly trained on stratified folds of the
//! data to score every candidate feature set of a step; the best candidate
//! according to one of four objectives is added to (forward selection) or
//! removed from (backward elimination) the working set.
//!
//! The crate also ships the pieces the search needs: a classifier contract
//! with two bundled models, a stratified k-fold splitter, an AUC primitive
//! and a small CSV dataset reader.
pub mod config;
pub mod cross_validation;
pub mod error;
pub mod feature_selection;
pub mod io;
pub mod models;
pub mod preprocessing;
pub mod stats;

pub use config::SelectionConfig;
pub use error::SelectionError;
pub use feature_selection::{recursive_feature_selection_roc_auc, RecursiveSelector, SelectionResult};
