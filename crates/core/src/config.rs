use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BanditError, BanditResult};
use crate::types::SelectionPolicy;

/// Everything one simulation run needs. Each run owns its own copy; nothing
/// here is shared mutably between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub num_arms: usize,
    /// Hidden mean reward of each arm. Never shown to the policies.
    pub true_means: Vec<f64>,
    pub horizon: usize,
    #[serde(default)]
    pub policy: SelectionPolicy,
    pub epsilon: f64,
    /// Starting value of every estimate. Values above any plausible true
    /// mean make the greedy branch try every arm early on.
    #[serde(default = "default_greedy_initial_estimate")]
    pub initial_estimate: f64,
    /// Exploration constant `c` of the confidence bonus. Only read by UCB.
    #[serde(default = "default_ucb_constant")]
    pub ucb_constant: f64,
    #[serde(default = "default_reward_std_dev")]
    pub reward_std_dev: f64,
    /// Seed for the run's random generator; `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ExperimentConfig {
    /// Fail fast on anything that would make the run meaningless.
    pub fn validate(&self) -> BanditResult<()> {
        let result = self.check();
        if let Err(e) = &result {
            tracing::warn!(error = %e, policy = %self.policy, "rejected experiment configuration");
        }
        result
    }

    fn check(&self) -> BanditResult<()> {
        if self.num_arms < 1 {
            return Err(BanditError::invalid_config("num_arms must be at least 1"));
        }
        if self.horizon < 1 {
            return Err(BanditError::invalid_config("horizon must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(BanditError::invalid_config(format!(
                "epsilon must lie in [0, 1], got {}",
                self.epsilon
            )));
        }
        if self.true_means.len() != self.num_arms {
            return Err(BanditError::invalid_config(format!(
                "true_means has {} entries but num_arms is {}",
                self.true_means.len(),
                self.num_arms
            )));
        }
        if let Some(i) = self.true_means.iter().position(|m| !m.is_finite()) {
            return Err(BanditError::invalid_config(format!(
                "true_means[{i}] is not finite"
            )));
        }
        if !self.initial_estimate.is_finite() {
            return Err(BanditError::invalid_config("initial_estimate must be finite"));
        }
        if !(self.reward_std_dev.is_finite() && self.reward_std_dev >= 0.0) {
            return Err(BanditError::invalid_config(format!(
                "reward_std_dev must be finite and non-negative, got {}",
                self.reward_std_dev
            )));
        }
        if self.policy == SelectionPolicy::Ucb
            && !(self.ucb_constant.is_finite() && self.ucb_constant > 0.0)
        {
            return Err(BanditError::invalid_config(format!(
                "ucb_constant must be positive for the UCB policy, got {}",
                self.ucb_constant
            )));
        }
        Ok(())
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        let true_means = default_true_means();
        Self {
            num_arms: true_means.len(),
            true_means,
            horizon: default_horizon(),
            policy: SelectionPolicy::Greedy,
            epsilon: default_epsilon(),
            initial_estimate: default_greedy_initial_estimate(),
            ucb_constant: default_ucb_constant(),
            reward_std_dev: default_reward_std_dev(),
            seed: None,
        }
    }
}

/// One policy/epsilon combination in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub label: String,
    #[serde(default)]
    pub policy: SelectionPolicy,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_greedy_initial_estimate")]
    pub initial_estimate: f64,
    #[serde(default = "default_ucb_constant")]
    pub ucb_constant: f64,
}

/// Root configuration of a comparison set. Loaded from an optional TOML file
/// and then environment variables with the prefix `BANDIT_LAB__`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabConfig {
    #[serde(default = "default_true_means")]
    pub true_means: Vec<f64>,
    #[serde(default = "default_reward_std_dev")]
    pub reward_std_dev: f64,
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_variants")]
    pub variants: Vec<VariantConfig>,
}

impl LabConfig {
    pub fn load(path: Option<&Path>) -> BanditResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("BANDIT_LAB")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("true_means"),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Expand every variant into a validated run configuration. All variants
    /// share the same environment; with a base seed, variant `i` gets
    /// `seed + i`.
    pub fn experiments(&self) -> BanditResult<Vec<(String, ExperimentConfig)>> {
        if self.variants.is_empty() {
            return Err(BanditError::invalid_config("no variants configured"));
        }

        self.variants
            .iter()
            .enumerate()
            .map(|(i, variant)| {
                let experiment = ExperimentConfig {
                    num_arms: self.true_means.len(),
                    true_means: self.true_means.clone(),
                    horizon: self.horizon,
                    policy: variant.policy,
                    epsilon: variant.epsilon,
                    initial_estimate: variant.initial_estimate,
                    ucb_constant: variant.ucb_constant,
                    reward_std_dev: self.reward_std_dev,
                    seed: self.seed.map(|s| s.wrapping_add(i as u64)),
                };
                experiment.validate()?;
                Ok((variant.label.clone(), experiment))
            })
            .collect()
    }
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            true_means: default_true_means(),
            reward_std_dev: default_reward_std_dev(),
            horizon: default_horizon(),
            seed: None,
            variants: default_variants(),
        }
    }
}

// Default functions
fn default_true_means() -> Vec<f64> {
    vec![0.13, 0.50, -1.21, 0.73, 1.6, 1.12, -1.25, -2.45, -0.86, 1.39]
}
fn default_reward_std_dev() -> f64 {
    1.0
}
fn default_horizon() -> usize {
    1000
}
fn default_epsilon() -> f64 {
    0.1
}
fn default_greedy_initial_estimate() -> f64 {
    5.0
}
fn default_ucb_initial_estimate() -> f64 {
    10.0
}
fn default_ucb_constant() -> f64 {
    0.2
}
fn default_variants() -> Vec<VariantConfig> {
    let greedy = |label: &str, epsilon: f64| VariantConfig {
        label: label.to_string(),
        policy: SelectionPolicy::Greedy,
        epsilon,
        initial_estimate: default_greedy_initial_estimate(),
        ucb_constant: default_ucb_constant(),
    };
    let ucb = |label: &str, epsilon: f64| VariantConfig {
        label: label.to_string(),
        policy: SelectionPolicy::Ucb,
        epsilon,
        initial_estimate: default_ucb_initial_estimate(),
        ucb_constant: default_ucb_constant(),
    };
    vec![
        greedy("e=0.1", 0.1),
        greedy("e=0.2", 0.2),
        greedy("greedy", 0.0),
        ucb("e=0.1 with UCB", 0.1),
        ucb("e=0.2 with UCB", 0.2),
    ]
}
