pub mod bce;
pub mod log_policy;
pub mod reduction;
pub mod loss_config;

pub use bce::{CrossEntropyEvaluator, cross_entropy};
pub use log_policy::{LogPolicy, DEFAULT_EPSILON};
pub use reduction::Reduction;
pub use loss_config::LossConfig;
