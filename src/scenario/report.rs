//! Reporting of equilibrium results.
//!
//! The equilibrium search itself is pure; whatever should happen with the
//! result (printing, collecting for tests, logging) goes through a
//! [`Reporter`].

use crate::auction::EquilibriumSet;

use super::Scenario;

/// Receives the result of each solved scenario.
pub trait Reporter {
    /// Called once per scenario with its full equilibrium set.
    fn report(&mut self, scenario: &Scenario, equilibria: &EquilibriumSet);
}

/// Human-readable lines for a scenario: one per equilibrium, or a single line
/// saying none exists.
pub fn report_lines(scenario: &Scenario, equilibria: &EquilibriumSet) -> Vec<String> {
    if equilibria.is_empty() {
        return vec![format!(
            "When the value profile is ({}, {}), no equilibrium exists in {}.",
            scenario.v1, scenario.v2, scenario.format
        )];
    }

    equilibria
        .iter()
        .map(|(b1, b2)| {
            format!(
                "When the values are ({}, {}), the bid profile ({}, {}) is a Nash equilibrium in the {}.",
                scenario.v1, scenario.v2, b1, b2, scenario.format
            )
        })
        .collect()
}

/// Prints report lines to stdout.
#[derive(Debug, Default)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(&mut self, scenario: &Scenario, equilibria: &EquilibriumSet) {
        for line in report_lines(scenario, equilibria) {
            println!("{}", line);
        }
    }
}

/// Keeps report lines in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    lines: Vec<String>,
}

impl CollectingReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines reported so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, scenario: &Scenario, equilibria: &EquilibriumSet) {
        self.lines.extend(report_lines(scenario, equilibria));
    }
}

/// Discards everything. Useful when only the returned [`BatchOutput`] matters.
///
/// [`BatchOutput`]: super::BatchOutput
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _scenario: &Scenario, _equilibria: &EquilibriumSet) {}
}
