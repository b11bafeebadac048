pub mod config;
pub mod error;
pub mod types;

pub use config::{ExperimentConfig, LabConfig, VariantConfig};
pub use error::{BanditError, BanditResult};
pub use types::{ArmIndex, Reward, SelectionPolicy, StepRecord};
