use anyhow::{Context, Result};

use recursive_selection::config::ModelConfig;
use recursive_selection::io::dataset::{read_dataset_csv, DatasetReaderConfig};
use recursive_selection::models::factory::build_model;
use recursive_selection::{recursive_feature_selection_roc_auc, SelectionConfig};

/// Usage: backward_elimination_csv <data.csv> [label column] [weight column]
///
/// Eliminates features one at a time, always removing the feature whose
/// removal keeps the two classes most distinguishable.
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().context("Missing path to a CSV dataset")?;
    let mut reader_config = DatasetReaderConfig::default();
    if let Some(label) = args.next() {
        reader_config.label_column = label;
    }
    reader_config.weight_column = args.next();

    let data = read_dataset_csv(&path, &reader_config)?;
    let n_eliminate = data.x.ncols().saturating_sub(1);

    let clf = build_model(ModelConfig::default());
    let config = SelectionConfig::new(n_eliminate, 5, 4, false, true).with_random_state(42);
    let result = recursive_feature_selection_roc_auc(
        clf.as_ref(),
        data.x.view(),
        &data.y,
        data.sample_weight.as_deref(),
        &config,
    )?;

    println!("Elimination order: {:?}", data.feature_names_for(&result.selected_features));
    println!("Surviving: {:?}", data.feature_names_for(&result.remaining_features()));
    for (step, auc) in result.winning_scores().iter().enumerate() {
        println!("step {:>2}: AUC {:.4}", step, auc);
    }

    Ok(())
}
