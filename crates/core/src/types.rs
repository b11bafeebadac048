use serde::{Deserialize, Serialize};

/// Index of one arm, always in `[0, num_arms)`.
pub type ArmIndex = usize;

pub type Reward = f64;

/// Action-selection policy, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Epsilon-greedy over the raw estimates.
    #[default]
    Greedy,
    /// Epsilon-greedy whose exploit branch compares estimate + confidence bonus.
    Ucb,
}

impl SelectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Ucb => "ucb",
        }
    }
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One executed step: which arm was pulled, what it paid, and the running
/// average reward after folding it in. `step` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: u64,
    pub arm: ArmIndex,
    pub reward: Reward,
    pub running_average: f64,
}
