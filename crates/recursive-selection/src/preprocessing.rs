//! Small preprocessing utilities shared by the bundled models.
//!
//! Provides a simple per-column mean/std Scaler. Fitting honours sample
//! weights so the scaler sees the same weighting as the model trained on top
//! of it.

use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Simple standard scaler (per-column mean/std).
#[derive(Clone, Debug)]
pub struct Scaler {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f64 = 1e-9;

    /// Standardize every column of `x` with the fitted statistics.
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        let mut out = x.to_owned();
        for mut row in out.axis_iter_mut(Axis(0)) {
            row -= &self.mean;
            row /= &self.std;
        }
        out
    }
}

/// Fit a `Scaler` where rows are samples and columns are features.
///
/// Constant columns get a unit standard deviation so they transform to zero.
pub fn fit_scaler(x: ArrayView2<'_, f64>, sample_weight: Option<&[f64]>) -> Scaler {
    let (nrows, ncols) = x.dim();
    let weight = |r: usize| sample_weight.map_or(1.0, |w| w[r]);
    let total: f64 = (0..nrows).map(weight).sum();

    let mut mean = Array1::<f64>::zeros(ncols);
    let mut std = Array1::<f64>::ones(ncols);
    if nrows == 0 || total <= 0.0 {
        return Scaler { mean, std };
    }

    for (r, row) in x.axis_iter(Axis(0)).enumerate() {
        mean.scaled_add(weight(r), &row);
    }
    mean /= total;

    let mut var = Array1::<f64>::zeros(ncols);
    for (r, row) in x.axis_iter(Axis(0)).enumerate() {
        let d = &row - &mean;
        var.scaled_add(weight(r), &(&d * &d));
    }
    for (s, v) in std.iter_mut().zip(var.iter()) {
        let sd = (v / total).sqrt();
        *s = if sd < Scaler::MIN_STD { 1.0 } else { sd };
    }

    Scaler { mean, std }
}
