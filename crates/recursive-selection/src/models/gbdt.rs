use anyhow::{anyhow, ensure, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::{Array2, ArrayView2, Axis};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::{two_column_proba, ClassifierModel};

/// Gradient Boosting Decision Tree (GBDT) classifier
pub struct GBDTClassifier {
    model: Option<GBDT>,
    feature_size: usize,
    params: ModelConfig,
}

impl GBDTClassifier {
    pub fn new(params: ModelConfig) -> Self {
        GBDTClassifier {
            model: None,
            feature_size: 0,
            params,
        }
    }
}

fn to_data_vec(x: ArrayView2<'_, f64>, labels: Option<&[i32]>, weights: Option<&[f64]>) -> DataVec {
    let mut data = DataVec::new();
    for (i, row) in x.axis_iter(Axis(0)).enumerate() {
        let features = row.iter().map(|&v| v as f32).collect();
        let weight = weights.map_or(1.0, |w| w[i] as f32);
        // LogLikelyhood loss expects labels in {-1, 1}
        let label = labels.map_or(0.0, |y| if y[i] == 1 { 1.0 } else { -1.0 });
        data.push(Data::new_training_data(features, weight, label, None));
    }
    data
}

impl ClassifierModel for GBDTClassifier {
    fn fit(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: &[i32],
        sample_weight: Option<&[f64]>,
    ) -> Result<()> {
        ensure!(
            y.len() == x.nrows(),
            "Expected {} labels, got {}",
            x.nrows(),
            y.len()
        );
        if let Some(w) = sample_weight {
            ensure!(
                w.len() == x.nrows(),
                "Expected {} sample weights, got {}",
                x.nrows(),
                w.len()
            );
        }

        match &self.params.model_type {
            ModelType::GBDT {
                max_depth,
                num_boost_round,
                debug,
                training_optimization_level,
                loss_type,
            } => {
                let feature_size = x.ncols();
                let mut config = Config::new();

                config.set_feature_size(feature_size);
                config.set_shrinkage(self.params.learning_rate);
                config.set_max_depth(*max_depth);
                config.set_iterations(*num_boost_round as usize);
                config.set_debug(*debug);
                config.set_training_optimization_level(*training_optimization_level);
                config.set_loss(loss_type);

                let mut gbdt = GBDT::new(&config);
                let mut train_x = to_data_vec(x, Some(y), sample_weight);
                gbdt.fit(&mut train_x);

                self.model = Some(gbdt);
                self.feature_size = feature_size;
                Ok(())
            }
            other => Err(anyhow!("Expected ModelType::GBDT params, got {:?}", other)),
        }
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("predict_proba called before fit"))?;
        ensure!(
            x.ncols() == self.feature_size,
            "Model was fitted on {} features, got {}",
            self.feature_size,
            x.ncols()
        );
        let test_x = to_data_vec(x, None, None);
        let positive: Vec<f64> = model
            .predict(&test_x)
            .into_iter()
            .map(|p| p as f64)
            .collect();
        Ok(two_column_proba(&positive))
    }

    fn fresh(&self) -> Box<dyn ClassifierModel> {
        Box::new(GBDTClassifier::new(self.params.clone()))
    }

    fn name(&self) -> &str {
        "gbdt"
    }
}
