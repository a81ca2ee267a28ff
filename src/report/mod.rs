pub mod loss_report;

pub use loss_report::{LossReport, binary_accuracy};
