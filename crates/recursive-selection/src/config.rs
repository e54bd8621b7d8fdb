use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::feature_selection::policy::Objective;

/// Options controlling a recursive selection / elimination run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Number of features to select (forward) or eliminate (backward).
    /// Clamped to the number of available features.
    pub n_features: usize,
    /// Number of stratified cross-validation folds, at least 2.
    pub cv_steps: usize,
    /// Number of worker threads used to score candidates within a step.
    pub n_jobs: usize,
    /// Forward selection when true, backward elimination otherwise.
    pub forward: bool,
    /// Search for matching (AUC close to 0.5) rather than separating features.
    pub matching_features: bool,
    /// Seed for the fold generator. `None` draws a fresh seed every step.
    pub random_state: Option<u64>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            n_features: 10,
            cv_steps: 10,
            n_jobs: 1,
            forward: true,
            matching_features: true,
            random_state: None,
        }
    }
}

impl SelectionConfig {
    pub fn new(
        n_features: usize,
        cv_steps: usize,
        n_jobs: usize,
        forward: bool,
        matching_features: bool,
    ) -> Self {
        Self {
            n_features,
            cv_steps,
            n_jobs,
            forward,
            matching_features,
            random_state: None,
        }
    }

    pub fn with_n_features(mut self, n_features: usize) -> Self {
        self.n_features = n_features;
        self
    }

    pub fn with_cv_steps(mut self, cv_steps: usize) -> Self {
        self.cv_steps = cv_steps;
        self
    }

    pub fn with_n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = n_jobs;
        self
    }

    pub fn with_forward(mut self, forward: bool) -> Self {
        self.forward = forward;
        self
    }

    pub fn with_matching_features(mut self, matching_features: bool) -> Self {
        self.matching_features = matching_features;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// The step objective implied by `matching_features` and `forward`.
    pub fn objective(&self) -> Objective {
        Objective::from_flags(self.matching_features, self.forward)
    }
}

/// Configuration for the classifiers bundled with the crate.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ModelConfig {
    pub learning_rate: f32,

    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported model types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum ModelType {
    GBDT {
        max_depth: u32,
        num_boost_round: u32,
        debug: bool,
        training_optimization_level: u8,
        loss_type: String,
    },
    Logistic {
        max_iter: usize,
        l2_penalty: f64,
        tol: f64,
    },
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::Logistic {
            max_iter: 500,
            l2_penalty: 1e-3,
            tol: 1e-6,
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gbdt" => Ok(ModelType::GBDT {
                max_depth: 3,
                num_boost_round: 20,
                debug: false,
                training_optimization_level: 2,
                loss_type: "LogLikelyhood".to_string(),
            }),
            "logistic" | "logreg" => Ok(ModelType::default()),
            _ => Err(format!(
                "Unknown model type: {}. Expected one of: gbdt, logistic",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f32, model_type: ModelType) -> Self {
        Self {
            learning_rate,
            model_type,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            model_type: ModelType::default(),
        }
    }
}
