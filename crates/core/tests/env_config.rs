//! Environment-variable configuration. Kept in its own test binary so the
//! process-wide environment is not shared with other tests.

#[cfg(test)]
mod tests {
    use bandit_core::LabConfig;

    #[test]
    fn test_env_overrides_scalars_and_true_means_list() {
        std::env::set_var("BANDIT_LAB__HORIZON", "42");
        std::env::set_var("BANDIT_LAB__SEED", "9");
        std::env::set_var("BANDIT_LAB__TRUE_MEANS", "0.0,1.0,2.5");

        let lab = LabConfig::load(None);

        std::env::remove_var("BANDIT_LAB__HORIZON");
        std::env::remove_var("BANDIT_LAB__SEED");
        std::env::remove_var("BANDIT_LAB__TRUE_MEANS");

        let lab = lab.unwrap();
        assert_eq!(lab.horizon, 42);
        assert_eq!(lab.seed, Some(9));
        assert_eq!(lab.true_means, vec![0.0, 1.0, 2.5]);
        assert_eq!(lab.variants.len(), 5);
        assert!(lab.experiments().is_ok());
    }
}
