//! End-to-end runs through the public engine API.

#[cfg(test)]
mod tests {
    use bandit_core::{BanditError, ExperimentConfig, LabConfig, SelectionPolicy};
    use bandit_rl_engine::{run_comparison, run_experiment, run_with_source, GaussianArms};

    /// Two arms paying exactly 0.0 and 1.0, pure greedy from 0.5.
    fn two_arm_greedy() -> ExperimentConfig {
        ExperimentConfig {
            num_arms: 2,
            true_means: vec![0.0, 1.0],
            horizon: 5,
            policy: SelectionPolicy::Greedy,
            epsilon: 0.0,
            initial_estimate: 0.5,
            ucb_constant: 0.2,
            reward_std_dev: 0.0,
            seed: Some(0),
        }
    }

    #[test]
    fn test_two_arm_running_average() {
        let averages = run_experiment(&two_arm_greedy()).unwrap();
        assert_eq!(averages.len(), 5);
        assert!(averages[0].abs() < f64::EPSILON);
        assert!((averages[1] - 0.5).abs() < 1e-12);
        assert!((averages[4] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_two_arm_trace_with_injected_source() {
        let config = two_arm_greedy();
        let source = GaussianArms::new(&config.true_means, 0.0).unwrap();
        let outcome = run_with_source(&config, source).unwrap();

        let arms: Vec<usize> = outcome.trace.iter().map(|r| r.arm).collect();
        assert_eq!(arms, vec![0, 1, 1, 1, 1]);
        let rewards: Vec<f64> = outcome.trace.iter().map(|r| r.reward).collect();
        assert_eq!(rewards, vec![0.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(outcome.trace[4].step, 5);
    }

    #[test]
    fn test_zero_horizon_fails_fast() {
        let config = ExperimentConfig {
            num_arms: 3,
            true_means: vec![0.1, 0.2, 0.3],
            horizon: 0,
            ..Default::default()
        };
        let err = run_experiment(&config).unwrap_err();
        assert!(matches!(err, BanditError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("horizon"));
    }

    #[test]
    fn test_mismatched_true_means_fails_fast() {
        let config = ExperimentConfig {
            num_arms: 4,
            ..two_arm_greedy()
        };
        assert!(matches!(
            run_experiment(&config),
            Err(BanditError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_default_comparison_beats_random_play() {
        let lab = LabConfig {
            seed: Some(2019),
            ..Default::default()
        };
        let report = run_comparison(&lab).unwrap();

        assert_eq!(report.series.len(), 5);
        assert_eq!(report.best_arm, 4);
        assert!((report.mean_true_value - (-0.03)).abs() < 1e-9);
        for series in &report.series {
            assert_eq!(series.averages.len(), 1000);
        }

        let explorer = report.series.iter().find(|s| s.label == "e=0.1").unwrap();
        assert!(
            explorer.final_average > report.mean_true_value + 0.5,
            "final average {}",
            explorer.final_average
        );
    }

    #[test]
    fn test_seeded_comparison_is_reproducible() {
        let lab = LabConfig {
            seed: Some(77),
            horizon: 300,
            ..Default::default()
        };
        let a = run_comparison(&lab).unwrap();
        let b = run_comparison(&lab).unwrap();
        assert_ne!(a.id, b.id);
        for (x, y) in a.series.iter().zip(&b.series) {
            assert_eq!(x.label, y.label);
            assert_eq!(x.averages, y.averages);
        }
    }

    #[test]
    fn test_report_serializes_for_plotting() {
        let lab = LabConfig {
            seed: Some(5),
            horizon: 20,
            ..Default::default()
        };
        let report = run_comparison(&lab).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["horizon"], 20);
        assert_eq!(json["series"][3]["policy"], "ucb");
        assert_eq!(json["series"][0]["label"], "e=0.1");
        assert_eq!(json["series"][0]["averages"].as_array().unwrap().len(), 20);
    }
}
