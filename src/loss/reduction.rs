use serde::{Serialize, Deserialize};
use std::fmt;

/// How per-example terms are combined into the reported loss.
///
/// - `Sum`  — total loss over all examples.
/// - `Mean` — total divided by the number of examples (framework convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    #[default]
    Sum,
    Mean,
}

impl Reduction {
    pub fn apply(&self, total: f64, samples: usize) -> f64 {
        match self {
            Reduction::Sum => total,
            Reduction::Mean if samples == 0 => 0.0,
            Reduction::Mean => total / samples as f64,
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Sum => f.pad("sum"),
            Reduction::Mean => f.pad("mean"),
        }
    }
}
