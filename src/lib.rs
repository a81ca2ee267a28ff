pub mod error;
pub mod loss;
pub mod report;
pub mod data;

// Convenience re-exports
pub use error::{LossError, Result};
pub use loss::bce::{CrossEntropyEvaluator, cross_entropy};
pub use loss::log_policy::LogPolicy;
pub use loss::reduction::Reduction;
pub use loss::loss_config::LossConfig;
pub use report::loss_report::LossReport;
pub use data::batch::PredictionBatch;
