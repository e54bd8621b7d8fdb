//! Recursive feature selection driven by cross-validated ROC AUC.
//!
//! Depending on the configuration the search runs as a forward selection or
//! a backward elimination, looking for a set of `n_features` features with
//! the highest or lowest mismatch between the two classes.
//!
//! Forward selection: to get the k+1 set every not yet selected feature is
//! added to the current set, giving (n_total - k) candidate sets. The feature
//! whose set scores best becomes part of the selection.
//!
//! Backward elimination: every not yet eliminated feature is removed from the
//! surviving set, giving (n_total - k) candidate sets. The feature whose
//! removal scores best is eliminated next.
use std::collections::BTreeSet;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::config::SelectionConfig;
use crate::error::SelectionError;
use crate::feature_selection::evaluation::{evaluate_candidates, Direction};
use crate::feature_selection::policy::select_best;
use crate::models::{ClassifierCharacteristics, ClassifierModel};

/// Outcome of a recursive selection run.
#[derive(Debug, Clone)]
pub struct SelectionResult {
    /// Feature indices in the order they were selected / eliminated.
    pub selected_features: Vec<usize>,
    /// AUC of every feature (rows) at every step (columns); NaN where the
    /// feature was no longer a candidate.
    pub auc_scores: Array2<f64>,
}

impl SelectionResult {
    pub fn n_steps(&self) -> usize {
        self.selected_features.len()
    }

    /// Scores of all features at `step`.
    pub fn step_scores(&self, step: usize) -> ArrayView1<'_, f64> {
        self.auc_scores.column(step)
    }

    /// AUC of the winning feature at each step.
    pub fn winning_scores(&self) -> Vec<f64> {
        self.selected_features
            .iter()
            .enumerate()
            .map(|(step, &feature)| self.auc_scores[[feature, step]])
            .collect()
    }

    /// Features that were never picked, ascending. After a backward
    /// elimination these are the surviving features.
    pub fn remaining_features(&self) -> Vec<usize> {
        (0..self.auc_scores.nrows())
            .filter(|i| !self.selected_features.contains(i))
            .collect()
    }
}

/// Struct form of [`recursive_feature_selection_roc_auc`].
#[derive(Debug, Clone, Default)]
pub struct RecursiveSelector {
    config: SelectionConfig,
}

impl RecursiveSelector {
    pub fn new(config: SelectionConfig) -> Self {
        RecursiveSelector { config }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Run the search. See [`recursive_feature_selection_roc_auc`].
    pub fn fit(
        &self,
        clf: &dyn ClassifierModel,
        x: ArrayView2<'_, f64>,
        y: &[i32],
        sample_weight: Option<&[f64]>,
    ) -> Result<SelectionResult, SelectionError> {
        recursive_feature_selection_roc_auc(clf, x, y, sample_weight, &self.config)
    }
}

/// Map the two label values onto {0, 1}; the larger value is the positive class.
fn binarize_labels(y: &[i32]) -> Result<Vec<i32>, SelectionError> {
    let classes: BTreeSet<i32> = y.iter().copied().collect();
    if classes.len() != 2 {
        return Err(SelectionError::InvalidLabels(classes.len()));
    }
    let positive = *classes.iter().next_back().unwrap_or(&1);
    Ok(y.iter().map(|&v| i32::from(v == positive)).collect())
}

/// Build a feature set one feature at a time.
///
/// # Arguments
///
/// * `clf` - Classifier prototype. It needs the `fit` and `predict_proba`
///   capabilities; it is never fitted itself.
/// * `x` - Values describing the samples, shape (n_samples, n_total).
/// * `y` - True labels; exactly two distinct values, the larger one positive.
/// * `sample_weight` - Optional per-sample weights.
/// * `config` - Search options; `n_features` is clamped to n_total.
///
/// # Returns
///
/// The selected (forward) or eliminated (backward) feature indices in the
/// order they were chosen, and the (n_total, n_features) AUC matrix.
pub fn recursive_feature_selection_roc_auc(
    clf: &dyn ClassifierModel,
    x: ArrayView2<'_, f64>,
    y: &[i32],
    sample_weight: Option<&[f64]>,
    config: &SelectionConfig,
) -> Result<SelectionResult, SelectionError> {
    let missing = clf
        .characteristics()
        .missing(&ClassifierCharacteristics::required());
    if !missing.is_empty() {
        return Err(SelectionError::UnsupportedClassifier {
            name: clf.name().to_string(),
            missing,
        });
    }
    if config.cv_steps < 2 {
        return Err(SelectionError::InvalidFoldCount(config.cv_steps));
    }

    let (n_samples, n_total) = x.dim();
    if y.len() != n_samples {
        return Err(SelectionError::ShapeMismatch {
            what: "y",
            expected: n_samples,
            found: y.len(),
        });
    }
    if let Some(w) = sample_weight {
        if w.len() != n_samples {
            return Err(SelectionError::ShapeMismatch {
                what: "sample_weight",
                expected: n_samples,
                found: w.len(),
            });
        }
    }
    let y = binarize_labels(y)?;

    let mut n_features = config.n_features;
    if n_features > n_total {
        log::warn!(
            "'n_features' ({}) higher than total number of features ({}). 'n_features' reduced!",
            n_features,
            n_total
        );
        n_features = n_total;
    }

    let direction = Direction::from_forward(config.forward);
    let objective = config.objective();
    log::info!(
        "Starting {:?} search for {} of {} features ({:?}, {} folds, {} jobs)",
        direction,
        n_features,
        n_total,
        objective,
        config.cv_steps,
        config.n_jobs
    );

    let mut auc_scores = Array2::from_elem((n_total, n_features), f64::NAN);
    let mut selected_features: Vec<usize> = Vec::with_capacity(n_features);

    while selected_features.len() != n_features {
        let step = selected_features.len();
        let auc_scores_i: Array1<f64> = evaluate_candidates(
            direction,
            &selected_features,
            clf,
            x,
            &y,
            sample_weight,
            config.cv_steps,
            config.n_jobs,
            config.random_state,
        )?;

        let index_best = select_best(&auc_scores_i.to_vec(), objective)
            .ok_or(SelectionError::NoFiniteScore { step })?;

        auc_scores.column_mut(step).assign(&auc_scores_i);
        log::info!(
            "Step {}: feature {} (AUC {:.4})",
            step,
            index_best,
            auc_scores_i[index_best]
        );
        selected_features.push(index_best);
    }

    Ok(SelectionResult {
        selected_features,
        auc_scores,
    })
}
