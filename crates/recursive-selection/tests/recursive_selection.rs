//! End-to-end tests of the recursive selection / elimination search.

use anyhow::anyhow;
use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use recursive_selection::feature_selection::policy::Objective;
use recursive_selection::models::logistic::LogisticRegressionClassifier;
use recursive_selection::models::{ClassifierCharacteristics, ClassifierModel};
use recursive_selection::{
    recursive_feature_selection_roc_auc, RecursiveSelector, SelectionConfig, SelectionError,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 40 samples, 5 features: feature 0 separates the classes perfectly,
/// feature 1 is weakly informative and features 2-4 are noise.
fn synthetic() -> (Array2<f64>, Vec<i32>) {
    let mut rng = StdRng::seed_from_u64(2024);
    let n_samples = 40;
    let y: Vec<i32> = (0..n_samples).map(|i| (i % 2) as i32).collect();
    let x = Array2::from_shape_fn((n_samples, 5), |(i, j)| {
        let label = y[i] as f64;
        let noise: f64 = rng.gen();
        match j {
            0 => 3.0 * label + noise,
            1 => 0.5 * label + noise,
            _ => noise,
        }
    });
    (x, y)
}

fn count_finite(result: &recursive_selection::SelectionResult, step: usize) -> usize {
    result.step_scores(step).iter().filter(|v| v.is_finite()).count()
}

#[test]
fn forward_selection_picks_informative_feature_first() {
    init_logging();
    let (x, y) = synthetic();
    let config = SelectionConfig::new(3, 4, 1, true, false).with_random_state(11);
    let clf = LogisticRegressionClassifier::default();

    let result = recursive_feature_selection_roc_auc(&clf, x.view(), &y, None, &config).unwrap();

    assert_eq!(result.selected_features.len(), 3);
    assert_eq!(result.selected_features[0], 0);
    assert_eq!(result.auc_scores.shape(), &[5, 3]);
    assert!((result.winning_scores()[0] - 1.0).abs() < 1e-12);

    let mut unique = result.selected_features.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), 3);
}

#[test]
fn score_matrix_has_one_fewer_candidate_per_step() {
    init_logging();
    let (x, y) = synthetic();
    for forward in [true, false] {
        let config = SelectionConfig::new(5, 3, 1, forward, true).with_random_state(5);
        let clf = LogisticRegressionClassifier::default();
        let result = recursive_feature_selection_roc_auc(&clf, x.view(), &y, None, &config).unwrap();

        assert_eq!(result.n_steps(), 5);
        for step in 0..5 {
            assert_eq!(count_finite(&result, step), 5 - step, "forward={} step={}", forward, step);
            // Features picked in earlier steps are no longer candidates
            for &picked in &result.selected_features[..step] {
                assert!(result.auc_scores[[picked, step]].is_nan());
            }
        }
        assert!(result.remaining_features().is_empty());
    }
}

#[test]
fn winner_respects_objective() {
    init_logging();
    let (x, y) = synthetic();
    let clf = LogisticRegressionClassifier::default();

    for (matching, forward) in [(true, true), (true, false), (false, true), (false, false)] {
        let config = SelectionConfig::new(3, 3, 1, forward, matching).with_random_state(8);
        let objective = config.objective();
        let result = recursive_feature_selection_roc_auc(&clf, x.view(), &y, None, &config).unwrap();

        for (step, &winner) in result.selected_features.iter().enumerate() {
            let best = result.auc_scores[[winner, step]];
            for &auc in result.step_scores(step).iter().filter(|v| v.is_finite()) {
                match objective {
                    Objective::MinDeviation => assert!((best - 0.5).abs() <= (auc - 0.5).abs()),
                    Objective::MaxDeviation => assert!((best - 0.5).abs() >= (auc - 0.5).abs()),
                    Objective::MaxAuc => assert!(best >= auc),
                    Objective::MinAuc => assert!(best <= auc),
                }
            }
        }
    }
}

#[test]
fn backward_elimination_removes_informative_feature_first() {
    init_logging();
    let (x, y) = synthetic();
    // Eliminate to minimise the AUC of the surviving set
    let config = SelectionConfig::new(2, 4, 1, false, false).with_random_state(3);
    let clf = LogisticRegressionClassifier::default();

    let result = RecursiveSelector::new(config).fit(&clf, x.view(), &y, None).unwrap();

    assert_eq!(result.selected_features[0], 0);
    assert_eq!(result.remaining_features().len(), 3);
    assert!(!result.remaining_features().contains(&0));
}

#[test]
fn n_features_is_clamped() {
    init_logging();
    let (x, y) = synthetic();
    let config = SelectionConfig::new(50, 2, 1, true, true).with_random_state(1);
    let clf = LogisticRegressionClassifier::default();

    let result = recursive_feature_selection_roc_auc(&clf, x.view(), &y, None, &config).unwrap();

    assert_eq!(result.selected_features.len(), 5);
    assert_eq!(result.auc_scores.shape(), &[5, 5]);
}

#[test]
fn zero_features_requested() {
    let (x, y) = synthetic();
    let config = SelectionConfig::new(0, 2, 1, true, true);
    let clf = LogisticRegressionClassifier::default();

    let result = recursive_feature_selection_roc_auc(&clf, x.view(), &y, None, &config).unwrap();

    assert!(result.selected_features.is_empty());
    assert_eq!(result.auc_scores.shape(), &[5, 0]);
}

#[test]
fn results_do_not_depend_on_n_jobs() {
    init_logging();
    let (x, y) = synthetic();
    let clf = LogisticRegressionClassifier::default();
    let run = |n_jobs: usize| {
        let config = SelectionConfig::new(3, 4, n_jobs, true, true).with_random_state(42);
        recursive_feature_selection_roc_auc(&clf, x.view(), &y, None, &config).unwrap()
    };

    let sequential = run(1);
    let parallel = run(4);

    assert_eq!(sequential.selected_features, parallel.selected_features);
    for (a, b) in sequential.auc_scores.iter().zip(parallel.auc_scores.iter()) {
        assert!((a.is_nan() && b.is_nan()) || a == b, "{} != {}", a, b);
    }
}

#[test]
fn six_sample_scenario() {
    init_logging();
    let x = Array2::from_shape_vec(
        (6, 4),
        vec![
            0.1, 1.2, 0.5, 3.0, //
            0.3, 0.7, 0.4, 1.0, //
            0.2, 1.1, 0.9, 2.0, //
            0.9, 0.8, 0.3, 2.5, //
            1.1, 1.0, 0.6, 1.5, //
            1.0, 0.9, 0.2, 0.5, //
        ],
    )
    .unwrap();
    let y = [0, 0, 0, 1, 1, 1];
    let config = SelectionConfig::new(2, 2, 1, true, false).with_random_state(0);
    let clf = LogisticRegressionClassifier::default();

    let result = recursive_feature_selection_roc_auc(&clf, x.view(), &y, None, &config).unwrap();

    assert_eq!(result.selected_features.len(), 2);
    assert_eq!(count_finite(&result, 0), 4);
    assert_eq!(count_finite(&result, 1), 3);
}

#[test]
fn single_fold_is_a_configuration_error() {
    let (x, y) = synthetic();
    let config = SelectionConfig::new(2, 1, 1, true, true);
    let clf = LogisticRegressionClassifier::default();

    let result = recursive_feature_selection_roc_auc(&clf, x.view(), &y, None, &config);

    assert!(matches!(result, Err(SelectionError::InvalidFoldCount(1))));
}

#[test]
fn labels_and_weights_are_validated() {
    let (x, y) = synthetic();
    let config = SelectionConfig::new(1, 2, 1, true, true);
    let clf = LogisticRegressionClassifier::default();

    let short = &y[..10];
    let result = recursive_feature_selection_roc_auc(&clf, x.view(), short, None, &config);
    assert!(matches!(result, Err(SelectionError::ShapeMismatch { what: "y", .. })));

    let weights = vec![1.0; 3];
    let result = recursive_feature_selection_roc_auc(&clf, x.view(), &y, Some(&weights), &config);
    assert!(matches!(
        result,
        Err(SelectionError::ShapeMismatch { what: "sample_weight", .. })
    ));

    let one_class = vec![1; y.len()];
    let result = recursive_feature_selection_roc_auc(&clf, x.view(), &one_class, None, &config);
    assert!(matches!(result, Err(SelectionError::InvalidLabels(1))));
}

#[test]
fn signed_labels_with_weights() {
    init_logging();
    let (x, y) = synthetic();
    let signed: Vec<i32> = y.iter().map(|&v| if v == 1 { 1 } else { -1 }).collect();
    let weights: Vec<f64> = (0..y.len()).map(|i| 0.5 + (i % 3) as f64).collect();
    let config = SelectionConfig::new(1, 4, 2, true, false).with_random_state(9);
    let clf = LogisticRegressionClassifier::default();

    let result =
        recursive_feature_selection_roc_auc(&clf, x.view(), &signed, Some(&weights), &config).unwrap();

    assert_eq!(result.selected_features, vec![0]);
}

struct MarginsOnly;

impl ClassifierModel for MarginsOnly {
    fn fit(
        &mut self,
        _x: ArrayView2<'_, f64>,
        _y: &[i32],
        _sample_weight: Option<&[f64]>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn predict_proba(&self, _x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        Err(anyhow!("margins only"))
    }

    fn fresh(&self) -> Box<dyn ClassifierModel> {
        Box::new(MarginsOnly)
    }

    fn characteristics(&self) -> ClassifierCharacteristics {
        ClassifierCharacteristics::new(true, false)
    }

    fn name(&self) -> &str {
        "margins_only"
    }
}

#[test]
fn classifier_without_predict_proba_is_rejected() {
    let (x, y) = synthetic();
    // Even an invalid fold count is reported after the capability check
    let config = SelectionConfig::new(2, 1, 1, true, true);

    let result = recursive_feature_selection_roc_auc(&MarginsOnly, x.view(), &y, None, &config);

    match result {
        Err(SelectionError::UnsupportedClassifier { name, missing }) => {
            assert_eq!(name, "margins_only");
            assert_eq!(missing, vec!["predict_proba"]);
        }
        other => panic!("expected UnsupportedClassifier, got {:?}", other),
    }
}

/// Fails to fit whenever the training data contains a NaN.
struct NanIntolerant(LogisticRegressionClassifier);

impl ClassifierModel for NanIntolerant {
    fn fit(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: &[i32],
        sample_weight: Option<&[f64]>,
    ) -> anyhow::Result<()> {
        if x.iter().any(|v| v.is_nan()) {
            return Err(anyhow!("input contains NaN"));
        }
        self.0.fit(x, y, sample_weight)
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        self.0.predict_proba(x)
    }

    fn fresh(&self) -> Box<dyn ClassifierModel> {
        Box::new(NanIntolerant(LogisticRegressionClassifier::default()))
    }
}

#[test]
fn a_failing_candidate_aborts_the_search() {
    init_logging();
    let (mut x, y) = synthetic();
    x[[7, 2]] = f64::NAN;
    let clf = NanIntolerant(LogisticRegressionClassifier::default());

    for n_jobs in [1, 3] {
        let config = SelectionConfig::new(2, 2, n_jobs, true, true).with_random_state(4);
        let result = recursive_feature_selection_roc_auc(&clf, x.view(), &y, None, &config);
        match result {
            Err(SelectionError::Candidate { feature, source }) => {
                assert_eq!(feature, 2);
                assert!(source.to_string().contains("NaN"));
            }
            other => panic!("expected candidate failure, got {:?}", other),
        }
    }
}

#[test]
fn nan_in_features_is_reported_not_stalled() {
    init_logging();
    let (mut x, y) = synthetic();
    // The logistic model passes the NaN through to its predictions
    x[[3, 4]] = f64::NAN;
    let clf = LogisticRegressionClassifier::default();

    for n_jobs in [1, 3] {
        let config = SelectionConfig::new(2, 2, n_jobs, true, true).with_random_state(6);
        let result = recursive_feature_selection_roc_auc(&clf, x.view(), &y, None, &config);
        assert!(
            matches!(result, Err(SelectionError::NonFiniteScore { feature: 4, .. })),
            "n_jobs={}: {:?}",
            n_jobs,
            result
        );
    }
}

/// Returns a single probability column instead of two.
struct SingleColumn;

impl ClassifierModel for SingleColumn {
    fn fit(
        &mut self,
        _x: ArrayView2<'_, f64>,
        _y: &[i32],
        _sample_weight: Option<&[f64]>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        Ok(Array2::from_elem((x.nrows(), 1), 0.5))
    }

    fn fresh(&self) -> Box<dyn ClassifierModel> {
        Box::new(SingleColumn)
    }
}

#[test]
fn malformed_probabilities_abort_the_search() {
    let (x, y) = synthetic();
    let config = SelectionConfig::new(1, 2, 1, true, true).with_random_state(2);

    let result = recursive_feature_selection_roc_auc(&SingleColumn, x.view(), &y, None, &config);

    match result {
        Err(SelectionError::ClassifierOutput {
            feature,
            rows,
            cols,
            expected_rows,
        }) => {
            assert_eq!(feature, 0);
            assert_eq!(cols, 1);
            assert_eq!(rows, expected_rows);
            assert_eq!(rows, 20);
        }
        other => panic!("expected ClassifierOutput, got {:?}", other),
    }
}

/// Predicts NaN for every sample.
struct NanPredictor;

impl ClassifierModel for NanPredictor {
    fn fit(
        &mut self,
        _x: ArrayView2<'_, f64>,
        _y: &[i32],
        _sample_weight: Option<&[f64]>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> anyhow::Result<Array2<f64>> {
        Ok(Array2::from_elem((x.nrows(), 2), f64::NAN))
    }

    fn fresh(&self) -> Box<dyn ClassifierModel> {
        Box::new(NanPredictor)
    }
}

#[test]
fn nan_probabilities_abort_the_search() {
    let (x, y) = synthetic();
    for n_jobs in [1, 2] {
        let config = SelectionConfig::new(1, 2, n_jobs, false, true).with_random_state(2);
        let result = recursive_feature_selection_roc_auc(&NanPredictor, x.view(), &y, None, &config);
        assert!(
            matches!(result, Err(SelectionError::NonFiniteScore { .. })),
            "{:?}",
            result
        );
    }
}
