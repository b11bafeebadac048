//! Policy comparison — runs every configured variant against one shared
//! hidden environment and collects the running-average series.

use bandit_core::{ArmIndex, BanditResult, LabConfig, SelectionPolicy};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::reward::GaussianArms;
use crate::simulation::Simulation;

#[derive(Debug, Clone, Serialize)]
pub struct VariantSeries {
    pub label: String,
    pub policy: SelectionPolicy,
    pub epsilon: f64,
    pub initial_estimate: f64,
    pub final_average: f64,
    /// Share of steps that pulled the arm with the highest hidden mean.
    pub optimal_action_ratio: f64,
    pub averages: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantSummary {
    pub label: String,
    pub final_average: f64,
    pub optimal_action_ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub horizon: usize,
    /// Expected reward of uniformly random play; the baseline every policy
    /// should beat.
    pub mean_true_value: f64,
    pub best_arm: ArmIndex,
    pub series: Vec<VariantSeries>,
}

impl ComparisonReport {
    pub fn summary(&self) -> Vec<VariantSummary> {
        self.series
            .iter()
            .map(|s| VariantSummary {
                label: s.label.clone(),
                final_average: s.final_average,
                optimal_action_ratio: s.optimal_action_ratio,
            })
            .collect()
    }

    /// Variant with the highest final average; ties keep the earlier one.
    pub fn best_variant(&self) -> Option<&VariantSeries> {
        let mut best: Option<&VariantSeries> = None;
        for series in &self.series {
            if best.map_or(true, |b| series.final_average > b.final_average) {
                best = Some(series);
            }
        }
        best
    }
}

/// Run every variant in `lab`. All variants are validated before the first
/// run starts; any failure aborts the comparison with no partial report.
pub fn run_comparison(lab: &LabConfig) -> BanditResult<ComparisonReport> {
    let experiments = lab.experiments()?;
    let environment = GaussianArms::new(&lab.true_means, lab.reward_std_dev)?;
    let best_arm = environment.optimal_arm();

    let id = Uuid::new_v4();
    tracing::info!(
        comparison_id = %id,
        variants = experiments.len(),
        horizon = lab.horizon,
        "comparison started"
    );

    let mut series = Vec::with_capacity(experiments.len());
    for (label, experiment) in experiments {
        let initial_estimate = experiment.initial_estimate;
        let outcome = Simulation::with_source(experiment, environment.clone())?.run()?;

        let optimal_action_ratio =
            outcome.visits[best_arm] as f64 / outcome.averages.len() as f64;
        tracing::debug!(
            comparison_id = %id,
            label = %label,
            final_average = outcome.final_average(),
            optimal_action_ratio,
            "variant finished"
        );

        series.push(VariantSeries {
            final_average: outcome.final_average(),
            policy: outcome.policy,
            epsilon: outcome.epsilon,
            averages: outcome.averages,
            optimal_action_ratio,
            initial_estimate,
            label,
        });
    }

    Ok(ComparisonReport {
        id,
        created_at: Utc::now(),
        horizon: lab.horizon,
        mean_true_value: environment.mean_true_value(),
        best_arm,
        series,
    })
}
