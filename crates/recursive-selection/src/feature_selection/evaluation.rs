//! Evaluation of every candidate of one selection step.
//!
//! The split plan is built once and shared by all candidates. Candidates are
//! scored sequentially or on a dedicated rayon pool; either way the step only
//! returns once every candidate has a score.
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rayon::prelude::*;

use crate::cross_validation::{Fold, StratifiedKFold};
use crate::error::SelectionError;
use crate::feature_selection::scorer::{score_candidate, CandidateScore};
use crate::models::ClassifierModel;

/// Whether features are added to or removed from the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Candidate feature sets for the next step, keyed by the feature under test.
///
/// Forward: the selected features plus the candidate, sorted ascending.
/// Backward: all not yet eliminated features except the candidate.
pub fn candidate_subsets(
    direction: Direction,
    selected: &[usize],
    n_total: usize,
) -> Vec<(usize, Vec<usize>)> {
    let remaining: Vec<usize> = (0..n_total).filter(|i| !selected.contains(i)).collect();
    remaining
        .iter()
        .map(|&feature| {
            let subset = match direction {
                Direction::Forward => {
                    let mut subset = selected.to_vec();
                    subset.push(feature);
                    subset.sort_unstable();
                    subset
                }
                Direction::Backward => remaining
                    .iter()
                    .copied()
                    .filter(|&f| f != feature)
                    .collect(),
            };
            (feature, subset)
        })
        .collect()
}

/// A unit of work handed to a worker. Owns its copy of the candidate's columns.
struct CandidateJob {
    feature: usize,
    x: Array2<f64>,
}

impl CandidateJob {
    fn run(
        &self,
        clf: &dyn ClassifierModel,
        folds: &[Fold],
        y: &[i32],
        sample_weight: Option<&[f64]>,
    ) -> Result<CandidateScore, SelectionError> {
        score_candidate(self.feature, clf, folds, self.x.view(), y, sample_weight)
    }
}

/// Determine the cross-validated AUC of every candidate of a step.
///
/// # Arguments
///
/// * `direction` - Forward selection or backward elimination.
/// * `selected` - Features already selected / eliminated.
/// * `clf` - Classifier prototype.
/// * `x` - Full feature matrix, shape (n_samples, n_total).
/// * `y` - Labels in {0, 1}.
/// * `sample_weight` - Optional per-sample weights.
/// * `cv_steps` - Number of folds, at least 2.
/// * `n_jobs` - Number of worker threads; `<= 1` evaluates sequentially.
/// * `random_state` - Seed for the split plan.
///
/// # Returns
///
/// An array of length n_total holding the AUC of every candidate and NaN for
/// every feature in `selected`.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_candidates(
    direction: Direction,
    selected: &[usize],
    clf: &dyn ClassifierModel,
    x: ArrayView2<'_, f64>,
    y: &[i32],
    sample_weight: Option<&[f64]>,
    cv_steps: usize,
    n_jobs: usize,
    random_state: Option<u64>,
) -> Result<Array1<f64>, SelectionError> {
    if cv_steps < 2 {
        return Err(SelectionError::InvalidFoldCount(cv_steps));
    }
    let folds = StratifiedKFold::new(cv_steps, true, random_state).split(y)?;

    let jobs: Vec<CandidateJob> = candidate_subsets(direction, selected, x.ncols())
        .into_iter()
        .map(|(feature, subset)| CandidateJob {
            feature,
            x: x.select(Axis(1), &subset),
        })
        .collect();

    let results: Vec<CandidateScore> = if n_jobs > 1 {
        log::debug!("Scoring {} candidates on {} workers", jobs.len(), n_jobs);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_jobs)
            .build()
            .map_err(|e| SelectionError::ThreadPool(e.to_string()))?;
        pool.install(|| {
            jobs.par_iter()
                .map(|job| job.run(clf, &folds, y, sample_weight))
                .collect::<Result<Vec<_>, _>>()
        })?
    } else {
        jobs.iter()
            .map(|job| job.run(clf, &folds, y, sample_weight))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut auc_scores = Array1::from_elem(x.ncols(), f64::NAN);
    for CandidateScore { feature, auc } in results {
        auc_scores[feature] = auc;
    }
    Ok(auc_scores)
}
