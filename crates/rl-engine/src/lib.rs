//! Reinforcement Learning engine — k-armed bandit simulation comparing
//! epsilon-greedy and UCB-augmented epsilon-greedy action selection against
//! a fixed, hidden Gaussian reward distribution per arm.

pub mod comparison;
pub mod confidence;
pub mod estimator;
pub mod reward;
pub mod selector;
pub mod simulation;

pub use comparison::{run_comparison, ComparisonReport, VariantSeries, VariantSummary};
pub use confidence::ConfidenceBonus;
pub use estimator::ValueEstimator;
pub use reward::{GaussianArms, RewardSource};
pub use selector::ActionSelector;
pub use simulation::{
    run_experiment, run_with_source, ExperimentOutcome, Simulation, SimulationPhase,
};
