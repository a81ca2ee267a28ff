use serde::Serialize;
use std::fmt;

use crate::loss::log_policy::LogPolicy;
use crate::loss::reduction::Reduction;

/// Decision threshold used for binary accuracy.
pub const THRESHOLD: f64 = 0.5;

/// Summary of one evaluation, produced by `CrossEntropyEvaluator::report`.
///
/// Output only. Infinite losses (possible under `LogPolicy::Propagate`)
/// serialize as `null` in JSON, which is how `serde_json` writes non-finite floats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossReport {
    /// Number of (label, prediction) pairs evaluated.
    pub samples: usize,
    /// Negated sum of the per-example terms, before reduction.
    pub total_loss: f64,
    /// `total_loss` after `reduction` was applied.
    pub loss: f64,
    pub reduction: Reduction,
    pub policy: LogPolicy,
    /// How many predictions the clamp policy moved; always 0 for other policies.
    pub clamped: usize,
    /// Fraction of examples on the same side of `THRESHOLD` as their label.
    /// `None` when there were no samples.
    pub accuracy: Option<f64>,
}

impl fmt::Display for LossReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loss = {:.6} ({} over {} samples, {})",
            self.loss, self.reduction, self.samples, self.policy
        )?;
        if self.clamped > 0 {
            write!(f, ", {} clamped", self.clamped)?;
        }
        if let Some(acc) = self.accuracy {
            write!(f, ", accuracy {:.2}%", acc * 100.0)?;
        }
        Ok(())
    }
}

/// Fraction of predictions that land on the same side of `THRESHOLD` as the label.
/// Callers guarantee equal lengths.
pub fn binary_accuracy(labels: &[f64], predictions: &[f64]) -> Option<f64> {
    let n = labels.len();
    if n == 0 {
        return None;
    }
    let correct = labels.iter().zip(predictions.iter())
        .filter(|(y, p)| (**p >= THRESHOLD) == (**y >= THRESHOLD))
        .count();
    Some(correct as f64 / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_counts_threshold_matches() {
        let acc = binary_accuracy(&[1.0, 0.0, 1.0, 1.0], &[0.4, 0.6, 0.1, 0.5]).unwrap();
        assert_eq!(acc, 0.25);
        assert_eq!(binary_accuracy(&[], &[]), None);
    }

    #[test]
    fn display_mentions_clamping_only_when_it_happened() {
        let mut report = LossReport {
            samples: 2,
            total_loss: 1.5,
            loss: 0.75,
            reduction: Reduction::Mean,
            policy: LogPolicy::Strict,
            clamped: 0,
            accuracy: Some(1.0),
        };
        assert_eq!(report.to_string(), "loss = 0.750000 (mean over 2 samples, strict), accuracy 100.00%");
        report.clamped = 1;
        assert!(report.to_string().contains("1 clamped"));
    }

    #[test]
    fn infinite_loss_serializes_as_null() {
        let report = LossReport {
            samples: 1,
            total_loss: f64::INFINITY,
            loss: f64::INFINITY,
            reduction: Reduction::Sum,
            policy: LogPolicy::Propagate,
            clamped: 0,
            accuracy: Some(0.0),
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert!(json["loss"].is_null());
        assert_eq!(json["policy"]["kind"], "propagate");
    }
}
