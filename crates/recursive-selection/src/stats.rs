use crate::error::SelectionError;

/// Area under the ROC curve for binary labels.
///
/// Labels are expected in the crate convention (1 for the positive class,
/// anything else for the negative class). Samples are ranked by descending
/// score; samples sharing a score are grouped so ties contribute half credit
/// (trapezoidal rule), matching scikit-learn's `roc_auc_score`.
///
/// # Arguments
///
/// * `y_true` - Binary labels, one per sample.
/// * `y_score` - Scores for the positive class, higher meaning more likely positive.
/// * `sample_weight` - Optional per-sample weights; uniform weights when `None`.
///
/// # Returns
///
/// The AUC in `[0, 1]`, or `SelectionError::UndefinedAuc` when one of the
/// classes is absent (or carries zero total weight). Non-finite scores or
/// weights are rejected with `SelectionError::NonFiniteInput`.
pub fn roc_auc_score(
    y_true: &[i32],
    y_score: &[f64],
    sample_weight: Option<&[f64]>,
) -> Result<f64, SelectionError> {
    if y_score.len() != y_true.len() {
        return Err(SelectionError::ShapeMismatch {
            what: "scores",
            expected: y_true.len(),
            found: y_score.len(),
        });
    }
    if let Some(w) = sample_weight {
        if w.len() != y_true.len() {
            return Err(SelectionError::ShapeMismatch {
                what: "sample_weight",
                expected: y_true.len(),
                found: w.len(),
            });
        }
        if w.iter().any(|v| !v.is_finite()) {
            return Err(SelectionError::NonFiniteInput("sample_weight"));
        }
    }
    // Tie grouping below relies on every score comparing equal to itself
    if y_score.iter().any(|v| !v.is_finite()) {
        return Err(SelectionError::NonFiniteInput("y_score"));
    }

    let weight = |i: usize| sample_weight.map_or(1.0, |w| w[i]);

    let mut order: Vec<usize> = (0..y_true.len()).collect();
    order.sort_by(|&a, &b| y_score[b].total_cmp(&y_score[a]));

    let mut tps = 0.0f64;
    let mut fps = 0.0f64;
    let mut area = 0.0f64;

    let mut pos = 0;
    while pos < order.len() {
        let current = y_score[order[pos]];
        let (prev_tps, prev_fps) = (tps, fps);
        while pos < order.len() && y_score[order[pos]] == current {
            let i = order[pos];
            if y_true[i] == 1 {
                tps += weight(i);
            } else {
                fps += weight(i);
            }
            pos += 1;
        }
        // Trapezoid between consecutive ROC points
        area += (fps - prev_fps) * (tps + prev_tps) / 2.0;
    }

    if tps <= 0.0 || fps <= 0.0 {
        return Err(SelectionError::UndefinedAuc);
    }

    Ok(area / (tps * fps))
}
