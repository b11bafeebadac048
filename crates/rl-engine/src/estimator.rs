//! Incremental value estimation — per-arm sample averages and the overall
//! running average reward, updated without storing history.

use bandit_core::{ArmIndex, BanditError, BanditResult, Reward};
use serde::Serialize;

/// Folds `current` into an average over `n` samples (the new one included).
/// `n` must be at least 1.
pub fn update_average(previous: f64, current: Reward, n: u64) -> f64 {
    previous + (current - previous) / n as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueEstimator {
    estimates: Vec<f64>,
    visits: Vec<u64>,
    running_average: f64,
    steps: u64,
}

impl ValueEstimator {
    pub fn new(num_arms: usize, initial_estimate: f64) -> Self {
        Self {
            estimates: vec![initial_estimate; num_arms],
            visits: vec![0; num_arms],
            running_average: 0.0,
            steps: 0,
        }
    }

    /// Record one observed reward. The visit count is bumped before the
    /// division so it is never zero.
    pub fn update(&mut self, arm: ArmIndex, reward: Reward) -> BanditResult<()> {
        let num_arms = self.estimates.len();
        if arm >= num_arms {
            return Err(BanditError::InvalidArgument { arm, num_arms });
        }

        self.visits[arm] += 1;
        self.estimates[arm] = update_average(self.estimates[arm], reward, self.visits[arm]);

        self.steps += 1;
        self.running_average = update_average(self.running_average, reward, self.steps);
        Ok(())
    }

    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    pub fn visits(&self) -> &[u64] {
        &self.visits
    }

    pub fn running_average(&self) -> f64 {
        self.running_average
    }

    /// Steps recorded so far; always equals the sum of the visit counts.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn num_arms(&self) -> usize {
        self.estimates.len()
    }
}
