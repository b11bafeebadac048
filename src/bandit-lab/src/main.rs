//! Bandit Lab — runs the epsilon-greedy vs UCB comparison and prints the
//! running-average series as JSON for an external plotter.

use std::path::PathBuf;

use bandit_core::LabConfig;
use bandit_rl_engine::run_comparison;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "bandit-lab")]
#[command(about = "k-armed bandit policy comparison")]
#[command(version)]
struct Cli {
    /// TOML file with the comparison set (environment variables still apply)
    #[arg(long, env = "BANDIT_LAB_CONFIG")]
    config: Option<PathBuf>,

    /// Number of steps per run (overrides config)
    #[arg(long, env = "BANDIT_LAB__HORIZON")]
    horizon: Option<usize>,

    /// Base seed for reproducible runs (overrides config)
    #[arg(long, env = "BANDIT_LAB__SEED")]
    seed: Option<u64>,

    /// Print only the final average per variant
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bandit_lab=info,bandit_rl_engine=info".into()),
        )
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let mut lab = match LabConfig::load(cli.config.as_deref()) {
        Ok(lab) => lab,
        Err(e) if cli.config.is_none() => {
            warn!(error = %e, "Failed to load config, using defaults");
            LabConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(horizon) = cli.horizon {
        lab.horizon = horizon;
    }
    if let Some(seed) = cli.seed {
        lab.seed = Some(seed);
    }

    info!(
        arms = lab.true_means.len(),
        horizon = lab.horizon,
        variants = lab.variants.len(),
        seed = ?lab.seed,
        "Configuration loaded"
    );

    let report = run_comparison(&lab)?;

    if let Some(best) = report.best_variant() {
        info!(
            label = %best.label,
            final_average = best.final_average,
            baseline = report.mean_true_value,
            "Best variant"
        );
    }

    let output = if cli.summary {
        serde_json::to_string_pretty(&report.summary())?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");

    Ok(())
}
