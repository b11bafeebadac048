//! Simulation loop — drives one fixed-horizon run: select an arm, sample its
//! reward, update the estimates and emit the running average reward.

use bandit_core::{
    ArmIndex, BanditError, BanditResult, ExperimentConfig, SelectionPolicy, StepRecord,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::estimator::ValueEstimator;
use crate::reward::{GaussianArms, RewardSource};
use crate::selector::ActionSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationPhase {
    Init,
    Running,
    Done,
}

/// Final state of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentOutcome {
    pub policy: SelectionPolicy,
    pub epsilon: f64,
    /// Running average reward after each step; length equals the horizon.
    pub averages: Vec<f64>,
    pub estimates: Vec<f64>,
    pub visits: Vec<u64>,
    /// Per-step log, empty unless tracing was enabled with
    /// [`Simulation::with_trace`].
    pub trace: Vec<StepRecord>,
}

impl ExperimentOutcome {
    pub fn final_average(&self) -> f64 {
        self.averages.last().copied().unwrap_or(0.0)
    }

    pub fn arms_chosen(&self) -> Vec<ArmIndex> {
        self.trace.iter().map(|r| r.arm).collect()
    }
}

/// One run's private state. Nothing is shared between instances, so
/// comparisons build one `Simulation` per policy variant.
pub struct Simulation<S: RewardSource = GaussianArms> {
    config: ExperimentConfig,
    source: S,
    selector: ActionSelector,
    estimator: ValueEstimator,
    rng: StdRng,
    phase: SimulationPhase,
    averages: Vec<f64>,
    trace: Option<Vec<StepRecord>>,
}

impl Simulation<GaussianArms> {
    pub fn new(config: ExperimentConfig) -> BanditResult<Self> {
        config.validate()?;
        let source = GaussianArms::new(&config.true_means, config.reward_std_dev)?;
        Self::with_source(config, source)
    }
}

impl<S: RewardSource> Simulation<S> {
    pub fn with_source(config: ExperimentConfig, source: S) -> BanditResult<Self> {
        config.validate()?;
        if source.num_arms() != config.num_arms {
            return Err(BanditError::invalid_config(format!(
                "reward source has {} arms but num_arms is {}",
                source.num_arms(),
                config.num_arms
            )));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            selector: ActionSelector::from_config(&config),
            estimator: ValueEstimator::new(config.num_arms, config.initial_estimate),
            averages: Vec::with_capacity(config.horizon),
            phase: SimulationPhase::Init,
            trace: None,
            rng,
            source,
            config,
        })
    }

    /// Keep a per-step `(arm, reward)` log in the outcome.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::with_capacity(self.config.horizon));
        self
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn estimator(&self) -> &ValueEstimator {
        &self.estimator
    }

    pub fn averages(&self) -> &[f64] {
        &self.averages
    }

    pub fn step_index(&self) -> usize {
        self.averages.len()
    }

    /// Execute one step. Returns `Ok(false)` once the horizon is reached.
    pub fn step(&mut self) -> BanditResult<bool> {
        match self.phase {
            SimulationPhase::Done => return Ok(false),
            SimulationPhase::Init => {
                info!(
                    policy = %self.config.policy,
                    epsilon = self.config.epsilon,
                    arms = self.config.num_arms,
                    horizon = self.config.horizon,
                    initial_estimate = self.config.initial_estimate,
                    "bandit run started"
                );
                self.phase = SimulationPhase::Running;
            }
            SimulationPhase::Running => {}
        }

        let arm = self.selector.choose(&self.estimator, &mut self.rng)?;
        let reward = self.source.sample(arm, &mut self.rng)?;
        self.estimator.update(arm, reward)?;

        let running_average = self.estimator.running_average();
        self.averages.push(running_average);
        let step = self.averages.len() as u64;
        debug!(step, arm, reward, running_average, "bandit step");

        if let Some(trace) = self.trace.as_mut() {
            trace.push(StepRecord {
                step,
                arm,
                reward,
                running_average,
            });
        }

        if self.averages.len() >= self.config.horizon {
            self.phase = SimulationPhase::Done;
            info!(
                policy = %self.config.policy,
                epsilon = self.config.epsilon,
                final_average = running_average,
                "bandit run finished"
            );
        }
        Ok(true)
    }

    /// Drive the run to the horizon. Any failing step aborts the whole run.
    pub fn run(mut self) -> BanditResult<ExperimentOutcome> {
        while self.step()? {}
        Ok(self.into_outcome())
    }

    fn into_outcome(self) -> ExperimentOutcome {
        ExperimentOutcome {
            policy: self.config.policy,
            epsilon: self.config.epsilon,
            estimates: self.estimator.estimates().to_vec(),
            visits: self.estimator.visits().to_vec(),
            averages: self.averages,
            trace: self.trace.unwrap_or_default(),
        }
    }
}

/// Run one experiment with Gaussian arms and return the running average
/// reward after each step.
pub fn run_experiment(config: &ExperimentConfig) -> BanditResult<Vec<f64>> {
    let outcome = Simulation::new(config.clone())?.run()?;
    Ok(outcome.averages)
}

/// Run one experiment against a caller-supplied reward source, keeping the
/// step trace.
pub fn run_with_source<S: RewardSource>(
    config: &ExperimentConfig,
    source: S,
) -> BanditResult<ExperimentOutcome> {
    Simulation::with_source(config.clone(), source)?
        .with_trace()
        .run()
}
