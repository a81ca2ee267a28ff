use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::loss::log_policy::LogPolicy;
use crate::loss::reduction::Reduction;

/// Configuration for a `CrossEntropyEvaluator`.
///
/// # Fields
/// - `policy`      — how predictions at the edge of the log domain are treated
/// - `reduction`   — `Sum` (total loss) or `Mean`
/// - `allow_empty` — when `true`, empty input evaluates to `0.0` instead of
///                   failing with `LossError::EmptyInput`
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LossConfig {
    pub policy: LogPolicy,
    pub reduction: Reduction,
    pub allow_empty: bool,
}

impl LossConfig {
    pub fn new(policy: LogPolicy, reduction: Reduction) -> Self {
        LossConfig {
            policy,
            reduction,
            allow_empty: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.policy.validate()
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads and validates a config previously written by `save_json`
    /// (or written by hand).
    pub fn load_json(path: &str) -> Result<LossConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: LossConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
