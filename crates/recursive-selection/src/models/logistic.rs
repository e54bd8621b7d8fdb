use anyhow::{anyhow, ensure, Result};
use ndarray::{Array1, Array2, ArrayView2};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::{two_column_proba, ClassifierModel};
use crate::preprocessing::{fit_scaler, Scaler};

struct FittedLogistic {
    scaler: Scaler,
    coef: Array1<f64>,
    intercept: f64,
}

/// L2-regularised logistic regression trained with batch gradient descent.
///
/// Columns are standardised internally and the weights start at zero, so
/// fitting is fully deterministic.
pub struct LogisticRegressionClassifier {
    params: ModelConfig,
    fitted: Option<FittedLogistic>,
}

impl LogisticRegressionClassifier {
    pub fn new(params: ModelConfig) -> Self {
        LogisticRegressionClassifier {
            params,
            fitted: None,
        }
    }

    fn hyper_parameters(&self) -> Result<(usize, f64, f64)> {
        match &self.params.model_type {
            ModelType::Logistic {
                max_iter,
                l2_penalty,
                tol,
            } => Ok((*max_iter, *l2_penalty, *tol)),
            other => Err(anyhow!(
                "Expected ModelType::Logistic params, got {:?}",
                other
            )),
        }
    }
}

impl Default for LogisticRegressionClassifier {
    fn default() -> Self {
        LogisticRegressionClassifier::new(ModelConfig::new(0.5, ModelType::default()))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl ClassifierModel for LogisticRegressionClassifier {
    fn fit(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: &[i32],
        sample_weight: Option<&[f64]>,
    ) -> Result<()> {
        let (max_iter, l2_penalty, tol) = self.hyper_parameters()?;
        let (n_samples, n_features) = x.dim();
        ensure!(n_samples > 0, "Cannot fit logistic regression on zero samples");
        ensure!(
            y.len() == n_samples,
            "Expected {} labels, got {}",
            n_samples,
            y.len()
        );
        if let Some(w) = sample_weight {
            ensure!(
                w.len() == n_samples,
                "Expected {} sample weights, got {}",
                n_samples,
                w.len()
            );
        }

        let weights: Array1<f64> = match sample_weight {
            Some(w) => Array1::from(w.to_vec()),
            None => Array1::ones(n_samples),
        };
        let total_weight = weights.sum();
        ensure!(total_weight > 0.0, "Sample weights sum to zero");

        let scaler = fit_scaler(x, sample_weight);
        let z = scaler.transform(x);
        let target: Array1<f64> = y.iter().map(|&v| if v == 1 { 1.0 } else { 0.0 }).collect();

        let lr = self.params.learning_rate as f64;
        let mut coef = Array1::<f64>::zeros(n_features);
        let mut intercept = 0.0;

        for iter in 0..max_iter {
            let margin = z.dot(&coef) + intercept;
            let residual = (margin.mapv(sigmoid) - &target) * &weights;

            let grad_coef = z.t().dot(&residual) / total_weight + &coef * l2_penalty;
            let grad_intercept = residual.sum() / total_weight;

            coef.scaled_add(-lr, &grad_coef);
            intercept -= lr * grad_intercept;

            let step = grad_coef.iter().fold(grad_intercept.abs(), |acc, g| acc.max(g.abs()));
            if step < tol {
                log::trace!("Logistic regression converged after {} iterations", iter + 1);
                break;
            }
        }

        self.fitted = Some(FittedLogistic {
            scaler,
            coef,
            intercept,
        });
        Ok(())
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| anyhow!("predict_proba called before fit"))?;
        ensure!(
            x.ncols() == fitted.coef.len(),
            "Model was fitted on {} features, got {}",
            fitted.coef.len(),
            x.ncols()
        );
        let z = fitted.scaler.transform(x);
        let positive = (z.dot(&fitted.coef) + fitted.intercept).mapv(sigmoid);
        Ok(two_column_proba(&positive.to_vec()))
    }

    fn fresh(&self) -> Box<dyn ClassifierModel> {
        Box::new(LogisticRegressionClassifier::new(self.params.clone()))
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}
