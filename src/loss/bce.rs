use tracing::debug;

use crate::data::batch::PredictionBatch;
use crate::error::{LossError, Result};
use crate::loss::loss_config::LossConfig;
use crate::report::loss_report::{LossReport, binary_accuracy};

/// Binary cross-entropy between ground-truth labels and predicted probabilities:
///
///   L = -Σ (y·ln(p) + (1 - y)·ln(1 - p))
///
/// The evaluator holds only its `LossConfig`; it keeps no state between calls
/// and can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyEvaluator {
    config: LossConfig,
}

impl CrossEntropyEvaluator {
    /// Builds an evaluator without checking the config. An invalid config is
    /// reported by the first call to `evaluate` / `report`.
    pub fn new(config: LossConfig) -> CrossEntropyEvaluator {
        CrossEntropyEvaluator { config }
    }

    /// Builds an evaluator, rejecting an invalid config up front.
    pub fn try_new(config: LossConfig) -> Result<CrossEntropyEvaluator> {
        config.validate()?;
        Ok(CrossEntropyEvaluator { config })
    }

    pub fn config(&self) -> &LossConfig {
        &self.config
    }

    /// Scalar loss after the configured reduction (`Sum` by default).
    ///
    /// # Errors
    /// - `LengthMismatch` if `labels` and `predictions` differ in length
    /// - `EmptyInput` if both are empty and `allow_empty` is off
    /// - `NonFiniteLabel` for a NaN or infinite label
    /// - `Domain` for a prediction the log policy refuses
    pub fn evaluate(&self, labels: &[f64], predictions: &[f64]) -> Result<f64> {
        Ok(self.report(labels, predictions)?.loss)
    }

    /// Same validation as `evaluate`, but returns the full `LossReport`.
    pub fn report(&self, labels: &[f64], predictions: &[f64]) -> Result<LossReport> {
        self.config.validate()?;

        if labels.len() != predictions.len() {
            return Err(LossError::LengthMismatch {
                labels: labels.len(),
                predictions: predictions.len(),
            });
        }
        if labels.is_empty() && !self.config.allow_empty {
            return Err(LossError::EmptyInput);
        }

        let (sum, clamped) = self.accumulate(labels, predictions)?;
        // Subtracting keeps an all-zero sum at +0.0 rather than -0.0.
        let total_loss = 0.0 - sum;
        let samples = labels.len();
        let loss = self.config.reduction.apply(total_loss, samples);

        debug!(
            samples,
            total_loss,
            loss,
            clamped,
            policy = %self.config.policy,
            reduction = %self.config.reduction,
            "evaluated binary cross-entropy"
        );

        Ok(LossReport {
            samples,
            total_loss,
            loss,
            reduction: self.config.reduction,
            policy: self.config.policy,
            clamped,
            accuracy: binary_accuracy(labels, predictions),
        })
    }

    /// Scores a `PredictionBatch` loaded from disk.
    pub fn evaluate_batch(&self, batch: &PredictionBatch) -> Result<LossReport> {
        if let Some(ref name) = batch.name {
            debug!(batch = %name, samples = batch.len(), "scoring prediction batch");
        }
        self.report(&batch.labels, &batch.predictions)
    }

    /// One pass over the inputs. Returns the (un-negated) sum of the
    /// per-example terms and the number of predictions the policy clamped.
    fn accumulate(&self, labels: &[f64], predictions: &[f64]) -> Result<(f64, usize)> {
        let mut sum = 0.0;
        let mut clamped = 0;

        for (i, (&y, &p)) in labels.iter().zip(predictions.iter()).enumerate() {
            if !y.is_finite() {
                return Err(LossError::NonFiniteLabel { index: i, value: y });
            }
            let (p, moved) = self.config.policy.admit(i, p)?;
            if moved {
                clamped += 1;
            }
            sum += weighted_ln(y, p) + weighted_ln(1.0 - y, 1.0 - p);
        }

        Ok((sum, clamped))
    }
}

/// `w·ln(x)`, with a zero weight contributing nothing even when `ln(x)` is -inf.
fn weighted_ln(w: f64, x: f64) -> f64 {
    if w == 0.0 { 0.0 } else { w * x.ln() }
}

/// Total binary cross-entropy under the default config: strict log domain,
/// summed over all examples, empty input rejected.
pub fn cross_entropy(labels: &[f64], predictions: &[f64]) -> Result<f64> {
    CrossEntropyEvaluator::default().evaluate(labels, predictions)
}
