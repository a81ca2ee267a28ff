use serde::{Serialize, Deserialize};
use std::fmt;

use crate::error::{LossError, Result};

/// Clamp bound used when none is given (matches Keras' backend epsilon).
pub const DEFAULT_EPSILON: f64 = 1e-7;

/// Decides what happens to predictions at (or near) the edges of the log domain.
///
/// - `Strict`    — exactly 0 or 1 is rejected with `LossError::Domain`.
/// - `Clamp`     — predictions are moved into `[epsilon, 1 - epsilon]` first.
/// - `Propagate` — 0 and 1 are accepted; a confident wrong prediction yields +inf.
///   Terms whose weight is exactly zero are skipped, so `0 · ln(0)` is 0, not NaN.
///
/// Values outside `[0, 1]` and NaN are rejected under every policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogPolicy {
    #[default]
    Strict,
    Clamp { epsilon: f64 },
    Propagate,
}

impl LogPolicy {
    /// Clamp policy with `DEFAULT_EPSILON`.
    pub fn clamp() -> LogPolicy {
        LogPolicy::Clamp { epsilon: DEFAULT_EPSILON }
    }

    pub fn validate(&self) -> Result<()> {
        if let LogPolicy::Clamp { epsilon } = *self {
            if !(epsilon > 0.0 && epsilon < 0.5) {
                return Err(LossError::InvalidConfig(format!(
                    "clamp epsilon must lie in (0, 0.5), got {epsilon}"
                )));
            }
            // Below half an ulp of 1.0 the upper bound rounds back to 1.0.
            if 1.0 - epsilon == 1.0 {
                return Err(LossError::InvalidConfig(format!(
                    "clamp epsilon {epsilon} is too small to move predictions away from 1"
                )));
            }
        }
        Ok(())
    }

    /// Checks a single prediction and returns the value to take logarithms of,
    /// plus whether clamping moved it.
    pub(crate) fn admit(&self, index: usize, p: f64) -> Result<(f64, bool)> {
        if p.is_nan() || !(0.0..=1.0).contains(&p) {
            return Err(LossError::Domain { index, value: p });
        }
        match *self {
            LogPolicy::Strict => {
                if p == 0.0 || p == 1.0 {
                    Err(LossError::Domain { index, value: p })
                } else {
                    Ok((p, false))
                }
            }
            LogPolicy::Clamp { epsilon } => {
                let clamped = p.clamp(epsilon, 1.0 - epsilon);
                Ok((clamped, clamped != p))
            }
            LogPolicy::Propagate => Ok((p, false)),
        }
    }
}

impl fmt::Display for LogPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogPolicy::Strict => f.pad("strict"),
            LogPolicy::Clamp { epsilon } => f.pad(&format!("clamp(ε={epsilon:e})")),
            LogPolicy::Propagate => f.pad("propagate"),
        }
    }
}
