use thiserror::Error;

pub type BanditResult<T> = Result<T, BanditError>;

#[derive(Error, Debug)]
pub enum BanditError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An arm index outside `[0, num_arms)` reached the engine. This is a
    /// selection defect, not a recoverable condition.
    #[error("Invalid argument: arm {arm} is out of range for {num_arms} arms")]
    InvalidArgument { arm: usize, num_arms: usize },

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),
}

impl BanditError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
