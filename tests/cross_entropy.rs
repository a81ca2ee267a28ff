use bce_loss::{CrossEntropyEvaluator, LogPolicy, LossConfig, LossError, Reduction, cross_entropy};
use rand::prelude::*;

const TOL: f64 = 1e-4;

fn evaluator(policy: LogPolicy, reduction: Reduction) -> CrossEntropyEvaluator {
    CrossEntropyEvaluator::try_new(LossConfig::new(policy, reduction)).unwrap()
}

// ---------------------------------------------------------------------------
// Reference values
// ---------------------------------------------------------------------------

#[test]
fn negative_label_at_even_odds() {
    let loss = cross_entropy(&[0.0], &[0.5]).unwrap();
    assert!((loss - 0.6931).abs() < TOL, "got {loss}");
}

#[test]
fn confident_correct_positive() {
    let loss = cross_entropy(&[1.0], &[0.99]).unwrap();
    assert!((loss - 0.01005).abs() < 1e-5, "got {loss}");
}

#[test]
fn multi_example_total() {
    let loss = cross_entropy(&[1.0, 0.0, 1.0, 1.0], &[0.4, 0.6, 0.1, 0.5]).unwrap();
    let expected = -(0.4f64.ln() + 0.4f64.ln() + 0.1f64.ln() + 0.5f64.ln());
    assert!((loss - expected).abs() < 1e-12);
    assert!((loss - 4.8283).abs() < TOL, "got {loss}");
}

#[test]
fn mean_is_total_over_samples() {
    let labels = [1.0, 0.0, 1.0, 1.0];
    let predictions = [0.4, 0.6, 0.1, 0.5];
    let total = evaluator(LogPolicy::Strict, Reduction::Sum).evaluate(&labels, &predictions).unwrap();
    let mean = evaluator(LogPolicy::Strict, Reduction::Mean).evaluate(&labels, &predictions).unwrap();
    assert!((mean - total / 4.0).abs() < 1e-12);
}

#[test]
fn report_carries_accuracy_and_totals() {
    let report = evaluator(LogPolicy::Strict, Reduction::Mean)
        .report(&[1.0, 0.0, 1.0, 1.0], &[0.4, 0.6, 0.1, 0.5])
        .unwrap();
    assert_eq!(report.samples, 4);
    assert_eq!(report.clamped, 0);
    assert_eq!(report.accuracy, Some(0.25));
    assert!((report.loss * 4.0 - report.total_loss).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn length_mismatch() {
    let err = cross_entropy(&[0.0, 1.0], &[0.5]).unwrap_err();
    assert!(matches!(err, LossError::LengthMismatch { labels: 2, predictions: 1 }));
}

#[test]
fn empty_input_rejected_by_default() {
    assert!(matches!(cross_entropy(&[], &[]), Err(LossError::EmptyInput)));
}

#[test]
fn empty_input_allowed_is_zero() {
    let config = LossConfig { allow_empty: true, ..LossConfig::default() };
    let evaluator = CrossEntropyEvaluator::try_new(config).unwrap();
    let report = evaluator.report(&[], &[]).unwrap();
    assert_eq!(report.loss, 0.0);
    assert!(!report.loss.is_sign_negative());
    assert!(!report.total_loss.is_sign_negative());
    assert_eq!(report.accuracy, None);
}

#[test]
fn non_finite_label() {
    let err = cross_entropy(&[0.0, f64::INFINITY], &[0.5, 0.5]).unwrap_err();
    assert!(matches!(err, LossError::NonFiniteLabel { index: 1, .. }));
}

// ---------------------------------------------------------------------------
// Degenerate predictions under each policy
// ---------------------------------------------------------------------------

#[test]
fn strict_rejects_confident_wrong() {
    assert!(matches!(cross_entropy(&[1.0], &[0.0]), Err(LossError::Domain { index: 0, .. })));
    assert!(matches!(cross_entropy(&[0.0], &[1.0]), Err(LossError::Domain { index: 0, .. })));
}

#[test]
fn propagate_returns_infinity_for_confident_wrong() {
    let e = evaluator(LogPolicy::Propagate, Reduction::Sum);
    assert_eq!(e.evaluate(&[1.0], &[0.0]).unwrap(), f64::INFINITY);
    assert_eq!(e.evaluate(&[0.0], &[1.0]).unwrap(), f64::INFINITY);
}

#[test]
fn clamp_gives_a_large_finite_loss() {
    let e = evaluator(LogPolicy::Clamp { epsilon: 1e-7 }, Reduction::Sum);
    let report = e.report(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
    assert!(report.loss.is_finite());
    assert!((report.loss - 2.0 * -(1e-7f64).ln()).abs() < 1e-6);
    assert_eq!(report.clamped, 2);
}

#[test]
fn out_of_range_rejected_under_every_policy() {
    for policy in [LogPolicy::Strict, LogPolicy::clamp(), LogPolicy::Propagate] {
        let e = evaluator(policy, Reduction::Sum);
        assert!(matches!(e.evaluate(&[1.0], &[1.2]), Err(LossError::Domain { .. })));
        assert!(matches!(e.evaluate(&[1.0], &[-0.2]), Err(LossError::Domain { .. })));
    }
}

// ---------------------------------------------------------------------------
// Randomized properties
// ---------------------------------------------------------------------------

fn random_case(rng: &mut StdRng, n: usize) -> (Vec<f64>, Vec<f64>) {
    let labels = (0..n).map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 }).collect();
    // Bounds keep predictions strictly inside (0, 1).
    let predictions = (0..n).map(|_| rng.gen_range(1e-6..1.0 - 1e-6)).collect();
    (labels, predictions)
}

#[test]
fn loss_is_non_negative_for_valid_inputs() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let n = rng.gen_range(1..64);
        let (labels, predictions) = random_case(&mut rng, n);
        let loss = cross_entropy(&labels, &predictions).unwrap();
        assert!(loss >= 0.0, "loss {loss} for {labels:?} / {predictions:?}");
    }
}

#[test]
fn evaluation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let (labels, predictions) = random_case(&mut rng, 32);
    let first = cross_entropy(&labels, &predictions).unwrap();
    let second = cross_entropy(&labels, &predictions).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn evaluator_is_shareable_across_threads() {
    let e = evaluator(LogPolicy::Strict, Reduction::Sum);
    let expected = e.evaluate(&[1.0, 0.0], &[0.8, 0.3]).unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                assert_eq!(e.evaluate(&[1.0, 0.0], &[0.8, 0.3]).unwrap(), expected);
            });
        }
    });
}
