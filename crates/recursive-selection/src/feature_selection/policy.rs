//! Choosing the winning feature of a selection step.
use serde::{Deserialize, Serialize};

/// What a step optimises.
///
/// | matching_features | forward | objective               |
/// |-------------------|---------|-------------------------|
/// | true              | true    | minimize \|AUC - 0.5\|  |
/// | true              | false   | maximize \|AUC - 0.5\|  |
/// | false             | true    | maximize AUC            |
/// | false             | false   | minimize AUC            |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    MinDeviation,
    MaxDeviation,
    MaxAuc,
    MinAuc,
}

impl Objective {
    pub fn from_flags(matching_features: bool, forward: bool) -> Self {
        match (matching_features, forward) {
            (true, true) => Objective::MinDeviation,
            (true, false) => Objective::MaxDeviation,
            (false, true) => Objective::MaxAuc,
            (false, false) => Objective::MinAuc,
        }
    }

    /// Strict improvement test; equal values never replace the incumbent.
    pub fn improves(&self, auc: f64, best: f64) -> bool {
        match self {
            Objective::MinDeviation => (auc - 0.5).abs() < (best - 0.5).abs(),
            Objective::MaxDeviation => (auc - 0.5).abs() > (best - 0.5).abs(),
            Objective::MaxAuc => auc > best,
            Objective::MinAuc => auc < best,
        }
    }
}

/// Index of the best finite score, or `None` if no score is finite.
///
/// Non-finite entries (features that were not candidates) are skipped and
/// ties resolve to the lowest index.
pub fn select_best(scores: &[f64], objective: Objective) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &auc) in scores.iter().enumerate() {
        if !auc.is_finite() {
            continue;
        }
        match best {
            Some((_, value_best)) if !objective.improves(auc, value_best) => {}
            _ => best = Some((idx, auc)),
        }
    }
    best.map(|(idx, _)| idx)
}
