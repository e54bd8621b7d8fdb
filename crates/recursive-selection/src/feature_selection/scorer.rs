//! Cross-validated AUC of a single candidate feature subset.
use ndarray::{ArrayView2, Axis};

use crate::cross_validation::Fold;
use crate::error::SelectionError;
use crate::models::ClassifierModel;
use crate::stats::roc_auc_score;

/// Score of one candidate, keyed by the feature that defines the candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub feature: usize,
    pub auc: f64,
}

/// Determine the cross-validated AUC for one candidate feature set.
///
/// For every fold a fresh classifier is obtained from `clf`, fitted on the
/// fold's training rows and used to predict the positive-class probability
/// of its test rows. The out-of-fold predictions of all folds are collected
/// into one vector and a single AUC is computed over every row that was
/// tested.
///
/// # Arguments
///
/// * `feature` - Index of the feature defining this candidate.
/// * `clf` - Classifier prototype; never fitted itself.
/// * `folds` - Split plan shared by all candidates of the step.
/// * `x` - Feature columns of the candidate set, shape (n_samples, n_candidate_features).
/// * `y` - Labels in {0, 1}.
/// * `sample_weight` - Optional per-sample weights.
pub fn score_candidate(
    feature: usize,
    clf: &dyn ClassifierModel,
    folds: &[Fold],
    x: ArrayView2<'_, f64>,
    y: &[i32],
    sample_weight: Option<&[f64]>,
) -> Result<CandidateScore, SelectionError> {
    let n_samples = y.len();
    let mut y_pred = vec![0.0f64; n_samples];
    let mut tested = vec![false; n_samples];

    for (k, fold) in folds.iter().enumerate() {
        let x_train = x.select(Axis(0), &fold.train);
        let y_train: Vec<i32> = fold.train.iter().map(|&i| y[i]).collect();
        let sample_weight_train: Option<Vec<f64>> =
            sample_weight.map(|w| fold.train.iter().map(|&i| w[i]).collect());

        let mut model = clf.fresh();
        model
            .fit(x_train.view(), &y_train, sample_weight_train.as_deref())
            .map_err(|source| SelectionError::Candidate { feature, source })?;

        let x_test = x.select(Axis(0), &fold.test);
        let proba = model
            .predict_proba(x_test.view())
            .map_err(|source| SelectionError::Candidate { feature, source })?;
        if proba.nrows() != fold.test.len() || proba.ncols() < 2 {
            return Err(SelectionError::ClassifierOutput {
                feature,
                rows: proba.nrows(),
                cols: proba.ncols(),
                expected_rows: fold.test.len(),
            });
        }

        for (row, &i) in fold.test.iter().enumerate() {
            let p = proba[[row, 1]];
            if !p.is_finite() {
                return Err(SelectionError::NonFiniteScore { feature, row: i });
            }
            y_pred[i] = p;
            tested[i] = true;
        }
        log::trace!(
            "Feature {}: fold {} scored {} test rows",
            feature,
            k,
            fold.test.len()
        );
    }

    let rows: Vec<usize> = (0..n_samples).filter(|&i| tested[i]).collect();
    let y_true: Vec<i32> = rows.iter().map(|&i| y[i]).collect();
    let y_score: Vec<f64> = rows.iter().map(|&i| y_pred[i]).collect();
    let weights: Option<Vec<f64>> = sample_weight.map(|w| rows.iter().map(|&i| w[i]).collect());

    let auc = roc_auc_score(&y_true, &y_score, weights.as_deref())?;
    log::debug!("Feature {}: AUC {:.4}", feature, auc);

    Ok(CandidateScore { feature, auc })
}
