use ndarray::{Array2, ArrayView2};

/// Capabilities a classifier advertises.
///
/// The selection routines need both `fit` and `predict_proba`; models that
/// only produce raw margins report `predict_proba: false` and are rejected
/// before any work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierCharacteristics {
    pub fit: bool,
    pub predict_proba: bool,
}

impl ClassifierCharacteristics {
    pub fn new(fit: bool, predict_proba: bool) -> Self {
        Self { fit, predict_proba }
    }

    /// The capability set required by recursive selection.
    pub fn required() -> Self {
        Self::new(true, true)
    }

    /// True when every capability set in `desired` is also set in `self`.
    pub fn fulfilling(&self, desired: &ClassifierCharacteristics) -> bool {
        self.missing(desired).is_empty()
    }

    /// Names of the capabilities of `desired` that `self` lacks.
    pub fn missing(&self, desired: &ClassifierCharacteristics) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if desired.fit && !self.fit {
            missing.push("fit");
        }
        if desired.predict_proba && !self.predict_proba {
            missing.push("predict_proba");
        }
        missing
    }
}

/// Contract for classifiers used by the feature selection routines.
///
/// A model passed to the search is treated as a prototype: every fold of
/// every candidate is fitted on a separate instance obtained from
/// [`ClassifierModel::fresh`], so no fitted state is shared.
pub trait ClassifierModel: Send + Sync {
    /// Fit the model. `y` uses 1 for the positive class and 0 for the negative class.
    fn fit(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: &[i32],
        sample_weight: Option<&[f64]>,
    ) -> anyhow::Result<()>;

    /// Per-class probabilities with shape (n_samples, 2); column 1 holds the
    /// positive-class probability.
    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>>;

    /// An unfitted instance with the same hyper-parameters.
    fn fresh(&self) -> Box<dyn ClassifierModel>;

    fn characteristics(&self) -> ClassifierCharacteristics {
        ClassifierCharacteristics::required()
    }

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}

/// Stack positive-class probabilities into the (n_samples, 2) layout.
pub(crate) fn two_column_proba(positive: &[f64]) -> Array2<f64> {
    Array2::from_shape_fn((positive.len(), 2), |(i, j)| {
        let p = positive[i].clamp(0.0, 1.0);
        if j == 1 {
            p
        } else {
            1.0 - p
        }
    })
}
