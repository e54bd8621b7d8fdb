//! Stratified k-fold splitting.
//!
//! The split plan is computed once per selection step and shared read-only by
//! every candidate evaluated in that step, so all candidates are compared on
//! identical folds.
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::SelectionError;

/// One train/test split. Both index lists are sorted ascending and disjoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Stratified k-fold cross-validator.
///
/// Every sample lands in exactly one test fold, and each class is spread as
/// evenly as possible over the folds.
#[derive(Debug, Clone)]
pub struct StratifiedKFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl StratifiedKFold {
    pub fn new(n_splits: usize, shuffle: bool, random_state: Option<u64>) -> Self {
        StratifiedKFold {
            n_splits,
            shuffle,
            random_state,
        }
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Generate the folds for the labels `y`.
    ///
    /// # Arguments
    ///
    /// * `y` - Class label of every sample.
    ///
    /// # Returns
    ///
    /// `n_splits` folds in order, or an error if fewer than two folds were
    /// requested or there are fewer samples than folds.
    pub fn split(&self, y: &[i32]) -> Result<Vec<Fold>, SelectionError> {
        if self.n_splits < 2 {
            return Err(SelectionError::InvalidFoldCount(self.n_splits));
        }
        let n_samples = y.len();
        if self.n_splits > n_samples {
            return Err(SelectionError::TooFewSamples {
                n_splits: self.n_splits,
                n_samples,
            });
        }

        // BTreeMap keeps the class order stable so the plan only depends on the seed
        let mut classes: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for (i, &label) in y.iter().enumerate() {
            classes.entry(label).or_default().push(i);
        }

        if let Some(min_members) = classes.values().map(Vec::len).min() {
            if min_members < self.n_splits {
                log::warn!(
                    "The least populated class has only {} members, which is less than n_splits={}",
                    min_members,
                    self.n_splits
                );
            }
        }

        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut test_fold_of = vec![0usize; n_samples];
        let mut offset = 0;
        for members in classes.values_mut() {
            if self.shuffle {
                members.shuffle(&mut rng);
            }
            for (j, &idx) in members.iter().enumerate() {
                test_fold_of[idx] = (offset + j) % self.n_splits;
            }
            offset = (offset + members.len()) % self.n_splits;
        }

        let folds = (0..self.n_splits)
            .map(|k| {
                let (test, train): (Vec<usize>, Vec<usize>) =
                    (0..n_samples).partition(|&i| test_fold_of[i] == k);
                log::trace!(
                    "Fold {}: {} training samples, {} test samples",
                    k,
                    train.len(),
                    test.len()
                );
                Fold { train, test }
            })
            .collect();

        Ok(folds)
    }
}
