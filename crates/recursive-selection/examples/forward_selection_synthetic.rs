use anyhow::Result;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use recursive_selection::config::{ModelConfig, ModelType};
use recursive_selection::models::factory::build_model;
use recursive_selection::{RecursiveSelector, SelectionConfig};

/// Two classes separated along a few of the columns, the rest is noise.
fn synthetic_dataset(n_samples: usize, n_features: usize, seed: u64) -> (Array2<f64>, Vec<i32>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let y: Vec<i32> = (0..n_samples).map(|_| rng.gen_range(0..2)).collect();
    let x = Array2::from_shape_fn((n_samples, n_features), |(i, j)| {
        let shift = match j {
            0 => 1.5,
            1 => 0.8,
            2 => 0.3,
            _ => 0.0,
        };
        shift * y[i] as f64 + rng.gen::<f64>()
    });
    (x, y)
}

fn main() -> Result<()> {
    env_logger::init();

    let (x, y) = synthetic_dataset(400, 12, 7);

    let model_type: ModelType = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "logistic".to_string())
        .parse()
        .map_err(anyhow::Error::msg)?;
    let clf = build_model(ModelConfig::new(0.3, model_type));

    let config = SelectionConfig::default()
        .with_n_features(5)
        .with_cv_steps(5)
        .with_n_jobs(4)
        .with_matching_features(false)
        .with_random_state(1337);
    let result = RecursiveSelector::new(config).fit(clf.as_ref(), x.view(), &y, None)?;

    println!("Selection order: {:?}", result.selected_features);
    for (step, (feature, auc)) in result
        .selected_features
        .iter()
        .zip(result.winning_scores())
        .enumerate()
    {
        println!("step {:>2}: feature {:>2}  AUC {:.4}", step, feature, auc);
    }

    Ok(())
}
