//! Action selection — epsilon-greedy and UCB-augmented epsilon-greedy.

use bandit_core::{ArmIndex, BanditError, BanditResult, ExperimentConfig, SelectionPolicy};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::confidence::ConfidenceBonus;
use crate::estimator::ValueEstimator;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSelector {
    EpsilonGreedy {
        epsilon: f64,
    },
    UcbEpsilonGreedy {
        epsilon: f64,
        bonus: ConfidenceBonus,
    },
}

impl ActionSelector {
    pub fn from_config(config: &ExperimentConfig) -> Self {
        match config.policy {
            SelectionPolicy::Greedy => Self::EpsilonGreedy {
                epsilon: config.epsilon,
            },
            SelectionPolicy::Ucb => Self::UcbEpsilonGreedy {
                epsilon: config.epsilon,
                bonus: ConfidenceBonus::new(config.ucb_constant),
            },
        }
    }

    pub fn epsilon(&self) -> f64 {
        match self {
            Self::EpsilonGreedy { epsilon } | Self::UcbEpsilonGreedy { epsilon, .. } => *epsilon,
        }
    }

    pub fn choose<R: Rng + ?Sized>(
        &self,
        estimator: &ValueEstimator,
        rng: &mut R,
    ) -> BanditResult<ArmIndex> {
        match self {
            Self::EpsilonGreedy { epsilon } => select(estimator.estimates(), None, *epsilon, rng),
            Self::UcbEpsilonGreedy { epsilon, bonus } => {
                let bonuses = bonus.bonus(estimator.visits(), estimator.steps());
                select(estimator.estimates(), Some(bonuses.as_slice()), *epsilon, rng)
            }
        }
    }
}

/// Pick one arm. With probability `epsilon` the arm is drawn uniformly from
/// `[0, k)`; otherwise it is the lowest-index maximum of `estimate[i]`, or of
/// `estimate[i] + bonus[i]` when a bonus table is given.
pub fn select<R: Rng + ?Sized>(
    estimates: &[f64],
    bonuses: Option<&[f64]>,
    epsilon: f64,
    rng: &mut R,
) -> BanditResult<ArmIndex> {
    let num_arms = estimates.len();
    if num_arms == 0 {
        return Err(BanditError::InvalidArgument { arm: 0, num_arms });
    }
    if let Some(bonuses) = bonuses {
        if bonuses.len() != num_arms {
            // First index missing from the shorter table.
            return Err(BanditError::InvalidArgument {
                arm: bonuses.len().min(num_arms),
                num_arms,
            });
        }
    }

    if rng.gen::<f64>() < epsilon {
        return Ok(rng.gen_range(0..num_arms));
    }

    let arm = match bonuses {
        Some(bonuses) => argmax(estimates.iter().zip(bonuses).map(|(q, b)| q + b)),
        None => argmax(estimates.iter().copied()),
    };
    Ok(arm)
}

/// Index of the first maximal score. Strict comparison keeps the lowest
/// index on ties and never lets NaN win; falls back to 0.
pub fn argmax(scores: impl IntoIterator<Item = f64>) -> ArmIndex {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (i, score) in scores.into_iter().enumerate() {
        if score > best_score {
            best = i;
            best_score = score;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_argmax_lowest_index_on_tie() {
        assert_eq!(argmax([0.5, 0.5]), 0);
        assert_eq!(argmax([0.1, 0.7, 0.7, 0.2]), 1);
        assert_eq!(argmax([-3.0]), 0);
    }

    #[test]
    fn test_greedy_exploits_max_estimate() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let arm = select(&[0.2, 1.5, -0.4, 1.1], None, 0.0, &mut rng).unwrap();
            assert_eq!(arm, 1);
        }
    }

    #[test]
    fn test_bonus_changes_exploit_choice() {
        let mut rng = StdRng::seed_from_u64(5);
        let estimates = [1.0, 0.9];
        assert_eq!(select(&estimates, None, 0.0, &mut rng).unwrap(), 0);
        assert_eq!(select(&estimates, Some(&[0.0, 0.5][..]), 0.0, &mut rng).unwrap(), 1);
    }

    #[test]
    fn test_unvisited_arm_beats_high_estimate() {
        let mut rng = StdRng::seed_from_u64(5);
        let bonuses = ConfidenceBonus::new(0.2).bonus(&[3, 0, 0], 3);
        let arm = select(&[100.0, -5.0, -5.0], Some(bonuses.as_slice()), 0.0, &mut rng).unwrap();
        assert_eq!(arm, 1);
    }

    #[test]
    fn test_exploration_is_uniform_over_indices() {
        // All estimates equal: exploration must still spread over every arm.
        let mut rng = StdRng::seed_from_u64(99);
        let estimates = [1.0; 4];
        let mut counts = [0usize; 4];
        let draws = 20_000;
        for _ in 0..draws {
            counts[select(&estimates, None, 1.0, &mut rng).unwrap()] += 1;
        }
        for count in counts {
            let share = count as f64 / draws as f64;
            assert!((share - 0.25).abs() < 0.02, "share {share}");
        }
    }

    #[test]
    fn test_epsilon_rate_of_exploration() {
        let mut rng = StdRng::seed_from_u64(3);
        let estimates = [0.0, 0.0, 0.0, 0.0, 10.0];
        let draws = 20_000;
        let off_max = (0..draws)
            .filter(|_| select(&estimates, None, 0.2, &mut rng).unwrap() != 4)
            .count();
        // Explores 20% of the time and lands off the max in 4/5 of those.
        let share = off_max as f64 / draws as f64;
        assert!((share - 0.16).abs() < 0.02, "share {share}");
    }

    #[test]
    fn test_never_out_of_range() {
        let mut rng = StdRng::seed_from_u64(17);
        let estimates = [0.3, 0.1, 0.9];
        for _ in 0..1_000 {
            assert!(select(&estimates, None, 0.5, &mut rng).unwrap() < 3);
        }
    }

    #[test]
    fn test_malformed_tables_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            select(&[], None, 0.0, &mut rng),
            Err(BanditError::InvalidArgument { .. })
        ));
        assert!(matches!(
            select(&[0.0, 1.0], Some(&[0.0][..]), 0.0, &mut rng),
            Err(BanditError::InvalidArgument { arm: 1, num_arms: 2 })
        ));
        assert!(matches!(
            select(&[0.0, 1.0], Some(&[0.0, 0.0, 0.0][..]), 0.0, &mut rng),
            Err(BanditError::InvalidArgument { arm: 2, num_arms: 2 })
        ));
    }

    #[test]
    fn test_selector_from_config() {
        let config = ExperimentConfig {
            policy: SelectionPolicy::Ucb,
            epsilon: 0.2,
            ucb_constant: 1.5,
            ..Default::default()
        };
        let selector = ActionSelector::from_config(&config);
        assert_eq!(selector.epsilon(), 0.2);
        match selector {
            ActionSelector::UcbEpsilonGreedy { bonus, .. } => assert_eq!(bonus.constant(), 1.5),
            other => panic!("expected UCB selector, got {other:?}"),
        }
    }

    #[test]
    fn test_ucb_selector_tries_every_arm_first() {
        let selector = ActionSelector::UcbEpsilonGreedy {
            epsilon: 0.0,
            bonus: ConfidenceBonus::new(0.2),
        };
        let mut estimator = ValueEstimator::new(4, 10.0);
        let mut rng = StdRng::seed_from_u64(8);
        let mut chosen = Vec::new();
        for _ in 0..4 {
            let arm = selector.choose(&estimator, &mut rng).unwrap();
            estimator.update(arm, 20.0).unwrap();
            chosen.push(arm);
        }
        assert_eq!(chosen, vec![0, 1, 2, 3]);
    }
}
