use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use bce_loss::loss::{LogPolicy, LossConfig, Reduction, DEFAULT_EPSILON};

#[derive(Parser)]
#[command(name = "bce-loss")]
#[command(author, version, about = "Score predicted probabilities against binary labels")]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON file holding a loss configuration; flags below override it
    #[arg(long, global = true, env = "BCE_LOSS_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to do with predictions of exactly 0 or 1
    #[arg(long, global = true, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Clamp bound, only meaningful with the clamp policy
    #[arg(long, global = true)]
    pub epsilon: Option<f64>,

    /// Report the total loss or the per-example mean
    #[arg(long, global = true, value_enum)]
    pub reduction: Option<ReductionArg>,

    /// Evaluate empty input to 0 instead of failing
    #[arg(long, global = true)]
    pub allow_empty: bool,

    /// Print the full report as JSON instead of the bare loss
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate comma-separated labels and predictions given on the command line
    Eval {
        /// Ground-truth labels, e.g. 1,0,1
        #[arg(long, value_delimiter = ',', required = true)]
        labels: Vec<f64>,

        /// Predicted probabilities, e.g. 0.9,0.2,0.7
        #[arg(long, value_delimiter = ',', required = true)]
        predictions: Vec<f64>,
    },

    /// Evaluate a JSON prediction batch file
    File {
        /// Path to a file of the form {"labels": [...], "predictions": [...]}
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Strict,
    Clamp,
    Propagate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReductionArg {
    Sum,
    Mean,
}

impl Cli {
    /// Config file (if any) with command-line overrides applied on top.
    pub fn loss_config(&self) -> Result<LossConfig> {
        let mut config = match &self.config {
            Some(path) => LossConfig::load_json(&path.to_string_lossy())
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => LossConfig::default(),
        };

        config.policy = match (self.policy, config.policy) {
            (Some(PolicyArg::Strict), _) => LogPolicy::Strict,
            (Some(PolicyArg::Propagate), _) => LogPolicy::Propagate,
            (Some(PolicyArg::Clamp), LogPolicy::Clamp { epsilon }) => LogPolicy::Clamp {
                epsilon: self.epsilon.unwrap_or(epsilon),
            },
            (Some(PolicyArg::Clamp), _) => LogPolicy::Clamp {
                epsilon: self.epsilon.unwrap_or(DEFAULT_EPSILON),
            },
            (None, LogPolicy::Clamp { epsilon }) => LogPolicy::Clamp {
                epsilon: self.epsilon.unwrap_or(epsilon),
            },
            (None, policy) => policy,
        };
        if self.epsilon.is_some() && !matches!(config.policy, LogPolicy::Clamp { .. }) {
            bail!("--epsilon only applies to the clamp policy (current policy: {})", config.policy);
        }

        if let Some(reduction) = self.reduction {
            config.reduction = match reduction {
                ReductionArg::Sum => Reduction::Sum,
                ReductionArg::Mean => Reduction::Mean,
            };
        }
        config.allow_empty |= self.allow_empty;

        config.validate()?;
        Ok(config)
    }
}
