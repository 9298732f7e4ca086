//! Scenario batches: valuation profiles × auction formats.
//!
//! Each scenario is solved independently. A scenario that fails (unknown
//! format, bad tables) is recorded as failed and the batch keeps going.
//! Scenarios may be solved in parallel, but results are always reported in
//! batch order.

pub mod output;
pub mod report;

use std::fs;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::auction::{
    check_valuations, AuctionConfig, AuctionError, AuctionFormat, ConfigError, EquilibriumSet,
    EquilibriumSolver, PayoffTables,
};

pub use output::{BatchOutput, EquilibriumPoint, ScenarioOutcome};
pub use report::{report_lines, CollectingReporter, NullReporter, Reporter, StdoutReporter};

/// A single auction to analyse: two valuations and a format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Bidder 1's valuation.
    pub v1: f64,
    /// Bidder 2's valuation.
    pub v2: f64,
    /// Payment rule.
    pub format: AuctionFormat,
}

/// Payoff tables and equilibria of a solved scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    /// The scenario that was solved.
    pub scenario: Scenario,
    /// Both bidders' payoff tables.
    pub tables: PayoffTables,
    /// All pure-strategy equilibria.
    pub equilibria: EquilibriumSet,
}

impl Scenario {
    /// Create a scenario.
    pub fn new(v1: f64, v2: f64, format: AuctionFormat) -> Self {
        Self { v1, v2, format }
    }

    /// Parse the format name and build the scenario.
    pub fn parse(v1: f64, v2: f64, format: &str) -> Result<Self, AuctionError> {
        Ok(Self::new(v1, v2, format.parse()?))
    }

    /// Both bidders' payoff tables for this scenario.
    pub fn payoff_tables(&self, config: &AuctionConfig) -> PayoffTables {
        PayoffTables::build(self.v1, self.v2, self.format, config)
    }

    /// Build tables and find all pure-strategy equilibria.
    ///
    /// Fails with [`AuctionError::InvalidValuation`] for infinite or NaN values.
    pub fn solve(&self, config: &AuctionConfig) -> Result<ScenarioResult, AuctionError> {
        check_valuations(self.v1, self.v2)?;
        let tables = self.payoff_tables(config);
        let equilibria = EquilibriumSolver::new(config.clone()).solve(&tables)?;
        Ok(ScenarioResult {
            scenario: *self,
            tables,
            equilibria,
        })
    }
}

impl ScenarioResult {
    /// Hand the equilibria to `reporter`.
    pub fn report(&self, reporter: &mut dyn Reporter) {
        reporter.report(&self.scenario, &self.equilibria);
    }
}

/// Cross product of valuation profiles and format names.
///
/// Formats are kept as names so an unknown one only fails its own scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBatch {
    /// `(v1, v2)` pairs.
    pub value_profiles: Vec<(f64, f64)>,
    /// Format names, e.g. "FPA" or "SPA".
    pub formats: Vec<String>,
}

impl Default for ScenarioBatch {
    fn default() -> Self {
        Self {
            value_profiles: vec![(50.0, 50.0), (70.0, 50.0), (49.0, 50.0)],
            formats: vec!["FPA".to_string(), "SPA".to_string()],
        }
    }
}

impl ScenarioBatch {
    /// Create a batch from profiles and format names.
    pub fn new(value_profiles: Vec<(f64, f64)>, formats: Vec<String>) -> Self {
        Self {
            value_profiles,
            formats,
        }
    }

    /// Load a batch from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse a batch from JSON, e.g.
    /// `{"value_profiles": [[50, 50]], "formats": ["FPA"]}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Number of scenarios in the batch.
    pub fn len(&self) -> usize {
        self.value_profiles.len() * self.formats.len()
    }

    /// Whether the batch has no scenarios.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(v1, v2, format)` for every scenario: profiles outer, formats inner.
    pub fn entries(&self) -> Vec<(f64, f64, &str)> {
        self.value_profiles
            .iter()
            .flat_map(|&(v1, v2)| self.formats.iter().map(move |f| (v1, v2, f.as_str())))
            .collect()
    }
}

/// Run every scenario in the batch and report results in batch order.
pub fn run_batch(
    batch: &ScenarioBatch,
    config: &AuctionConfig,
    reporter: &mut dyn Reporter,
) -> BatchOutput {
    run_batch_with_callback(batch, config, reporter, || {})
}

/// Like [`run_batch`], calling `on_scenario_done` as each scenario finishes
/// (possibly from a worker thread).
pub fn run_batch_with_callback<F>(
    batch: &ScenarioBatch,
    config: &AuctionConfig,
    reporter: &mut dyn Reporter,
    on_scenario_done: F,
) -> BatchOutput
where
    F: Fn() + Sync,
{
    let start = Instant::now();
    let entries = batch.entries();
    log::info!(
        "solving {} scenarios on bids 0..={} (eps = {:e})",
        entries.len(),
        config.max_bid,
        config.eps
    );

    let solve_entry = |&(v1, v2, format): &(f64, f64, &str)| {
        let result = solve_named(v1, v2, format, config);
        on_scenario_done();
        result
    };

    let results: Vec<Result<ScenarioResult, AuctionError>> = match config.num_threads {
        Some(0) | Some(1) => entries.iter().map(solve_entry).collect(),
        None => entries.par_iter().map(solve_entry).collect(),
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| entries.par_iter().map(solve_entry).collect()),
            Err(e) => {
                log::warn!("could not build {}-thread pool ({}), running sequentially", threads, e);
                entries.iter().map(solve_entry).collect()
            }
        },
    };

    let mut output = BatchOutput::new(config);
    for (&(v1, v2, format), result) in entries.iter().zip(results) {
        match result {
            Ok(solved) => {
                log::info!(
                    "({}, {}) {}: {} equilibria",
                    v1,
                    v2,
                    solved.scenario.format,
                    solved.equilibria.len()
                );
                solved.report(reporter);
                output.add_scenario(ScenarioOutcome::solved(
                    v1,
                    v2,
                    format,
                    &solved.tables,
                    &solved.equilibria,
                ));
            }
            Err(e) => {
                log::warn!("scenario ({}, {}) {} failed: {}", v1, v2, format, e);
                output.add_scenario(ScenarioOutcome::failed(v1, v2, format, e.to_string()));
            }
        }
    }

    output.elapsed_seconds = start.elapsed().as_secs_f64();
    output
}

fn solve_named(
    v1: f64,
    v2: f64,
    format: &str,
    config: &AuctionConfig,
) -> Result<ScenarioResult, AuctionError> {
    Scenario::parse(v1, v2, format)?.solve(config)
}
