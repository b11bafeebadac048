//! Reward sources — one stochastic sample per pull from an arm's hidden
//! distribution.

use bandit_core::{ArmIndex, BanditError, BanditResult, Reward};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Produces rewards for arm pulls. Implementations must be memoryless: every
/// call is an independent draw.
pub trait RewardSource {
    fn num_arms(&self) -> usize;

    fn sample<R: Rng + ?Sized>(&self, arm: ArmIndex, rng: &mut R) -> BanditResult<Reward>;
}

/// Arms with fixed hidden means and a shared standard deviation (1.0 for the
/// classic testbed, 0.0 for deterministic rewards).
#[derive(Debug, Clone)]
pub struct GaussianArms {
    true_means: Vec<f64>,
    distributions: Vec<Normal<f64>>,
}

impl GaussianArms {
    pub fn new(true_means: &[f64], std_dev: f64) -> BanditResult<Self> {
        if !(std_dev.is_finite() && std_dev >= 0.0) {
            return Err(BanditError::invalid_config(format!(
                "reward std dev must be finite and non-negative, got {std_dev}"
            )));
        }

        let distributions = true_means
            .iter()
            .map(|&mean| {
                Normal::new(mean, std_dev).map_err(|e| {
                    BanditError::invalid_config(format!(
                        "cannot build reward distribution (mean {mean}, std dev {std_dev}): {e}"
                    ))
                })
            })
            .collect::<BanditResult<Vec<_>>>()?;

        Ok(Self {
            true_means: true_means.to_vec(),
            distributions,
        })
    }

    pub fn unit_variance(true_means: &[f64]) -> BanditResult<Self> {
        Self::new(true_means, 1.0)
    }

    /// Arm with the highest hidden mean, lowest index on ties. Reporting
    /// only; policies never see this.
    pub fn optimal_arm(&self) -> ArmIndex {
        let mut best = 0;
        for (i, &mean) in self.true_means.iter().enumerate() {
            if mean > self.true_means[best] {
                best = i;
            }
        }
        best
    }

    /// Expected reward of a policy that picks arms uniformly at random.
    pub fn mean_true_value(&self) -> f64 {
        if self.true_means.is_empty() {
            return 0.0;
        }
        self.true_means.iter().sum::<f64>() / self.true_means.len() as f64
    }
}

impl RewardSource for GaussianArms {
    fn num_arms(&self) -> usize {
        self.distributions.len()
    }

    fn sample<R: Rng + ?Sized>(&self, arm: ArmIndex, rng: &mut R) -> BanditResult<Reward> {
        let distribution = self.distributions.get(arm).ok_or(BanditError::InvalidArgument {
            arm,
            num_arms: self.distributions.len(),
        })?;
        Ok(distribution.sample(rng))
    }
}
