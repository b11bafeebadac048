//! Upper-confidence-bound exploration bonus.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBonus {
    c: f64,
}

impl ConfidenceBonus {
    pub fn new(c: f64) -> Self {
        Self { c }
    }

    pub fn constant(&self) -> f64 {
        self.c
    }

    /// Bonus per arm after `n` steps: `c * sqrt(ln(n) / visits[i])`.
    ///
    /// Unvisited arms get `f64::INFINITY`, so any comparison of
    /// `estimate + bonus` prefers them over every visited arm.
    pub fn bonus(&self, visits: &[u64], n: u64) -> Vec<f64> {
        let log_n = if n > 0 { (n as f64).ln() } else { 0.0 };
        visits
            .iter()
            .map(|&count| {
                if count == 0 {
                    f64::INFINITY
                } else {
                    self.c * (log_n / count as f64).sqrt()
                }
            })
            .collect()
    }
}
