//! Serializable batch results.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::auction::{AuctionConfig, EquilibriumSet, PayoffTables};

/// How many equilibria `print_summary` lists per scenario.
const SUMMARY_LIMIT: usize = 5;

/// One equilibrium with the payoffs both bidders receive there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumPoint {
    /// Bidder 1's bid.
    pub b1: u32,
    /// Bidder 2's bid.
    pub b2: u32,
    /// Bidder 1's payoff at the equilibrium.
    pub payoff1: f64,
    /// Bidder 2's payoff at the equilibrium.
    pub payoff2: f64,
}

/// Result of one scenario: either its equilibria or the error that aborted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Bidder 1's valuation.
    pub v1: f64,
    /// Bidder 2's valuation.
    pub v2: f64,
    /// Format name as requested (may be invalid if the scenario failed).
    pub format: String,
    /// Number of equilibria found.
    pub num_equilibria: usize,
    /// Every equilibrium with its payoffs.
    pub equilibria: Vec<EquilibriumPoint>,
    /// Error text if the scenario failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioOutcome {
    /// Outcome for a solved scenario.
    pub fn solved(
        v1: f64,
        v2: f64,
        format: &str,
        tables: &PayoffTables,
        equilibria: &EquilibriumSet,
    ) -> Self {
        let points = equilibria
            .iter()
            .map(|&(b1, b2)| {
                let (payoff1, payoff2) = tables.payoffs_at(b1, b2);
                EquilibriumPoint {
                    b1,
                    b2,
                    payoff1,
                    payoff2,
                }
            })
            .collect();

        Self {
            v1,
            v2,
            format: format.to_string(),
            num_equilibria: equilibria.len(),
            equilibria: points,
            error: None,
        }
    }

    /// Outcome for a scenario that failed.
    pub fn failed(v1: f64, v2: f64, format: &str, error: String) -> Self {
        Self {
            v1,
            v2,
            format: format.to_string(),
            num_equilibria: 0,
            equilibria: Vec::new(),
            error: Some(error),
        }
    }

    /// Whether the scenario failed.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Results of a whole scenario batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutput {
    /// Inclusive grid bound used.
    pub max_bid: u32,
    /// Tie tolerance used.
    pub eps: f64,
    /// Outcomes in batch order.
    pub scenarios: Vec<ScenarioOutcome>,
    /// Wall-clock time for the batch.
    pub elapsed_seconds: f64,
}

impl BatchOutput {
    /// Empty output for a batch run with `config`.
    pub fn new(config: &AuctionConfig) -> Self {
        Self {
            max_bid: config.max_bid,
            eps: config.eps,
            scenarios: Vec::new(),
            elapsed_seconds: 0.0,
        }
    }

    /// Append a scenario outcome.
    pub fn add_scenario(&mut self, outcome: ScenarioOutcome) {
        self.scenarios.push(outcome);
    }

    /// Number of scenarios that failed.
    pub fn num_failed(&self) -> usize {
        self.scenarios.iter().filter(|s| s.is_failed()).count()
    }

    /// Save as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Print a per-scenario summary with payoffs at the first few equilibria.
    pub fn print_summary(&self) {
        println!("=== Summary (bids 0..={}) ===", self.max_bid);
        for outcome in &self.scenarios {
            println!(
                "\nValue profile: v1={}, v2={} | {}",
                outcome.v1, outcome.v2, outcome.format
            );

            if let Some(error) = &outcome.error {
                println!("  failed: {}", error);
                continue;
            }

            println!("Total equilibria found: {}", outcome.num_equilibria);
            if outcome.num_equilibria > SUMMARY_LIMIT {
                println!("  (Showing first {} of {})", SUMMARY_LIMIT, outcome.num_equilibria);
            }
            for point in outcome.equilibria.iter().take(SUMMARY_LIMIT) {
                println!(
                    "  -> ({}, {}): Payoffs = ({:.2}, {:.2})",
                    point.b1, point.b2, point.payoff1, point.payoff2
                );
            }
        }
        println!("\nTotal time: {:.3}s", self.elapsed_seconds);
    }
}
