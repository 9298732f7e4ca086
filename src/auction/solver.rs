//! Pure-strategy Nash equilibrium search.
//!
//! A bid pair `(b1, b2)` is an equilibrium when `b1` is a best response to
//! `b2` in bidder 1's table and `b2` is a best response to `b1` in bidder 2's
//! table. Best responses are precomputed per opponent bid, so the whole search
//! is O(grid²).

use serde::{Deserialize, Serialize};

use crate::auction::best_response::BestResponses;
use crate::auction::config::AuctionConfig;
use crate::auction::error::AuctionError;
use crate::auction::payoff::{PayoffTable, PayoffTables};

/// Bid pairs that are mutual best responses, ordered by `b1` then `b2`.
///
/// Serialized as a plain list of pairs; a loaded list is sorted and
/// deduplicated so lookups stay valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<(u32, u32)>", from = "Vec<(u32, u32)>")]
pub struct EquilibriumSet {
    pairs: Vec<(u32, u32)>,
}

impl EquilibriumSet {
    /// Equilibria as `(b1, b2)` pairs in enumeration order.
    pub fn pairs(&self) -> &[(u32, u32)] {
        &self.pairs
    }

    /// Number of equilibria.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pure equilibrium exists.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether `(b1, b2)` is an equilibrium.
    pub fn contains(&self, b1: u32, b2: u32) -> bool {
        self.pairs.binary_search(&(b1, b2)).is_ok()
    }

    /// Iterate over the equilibria.
    pub fn iter(&self) -> impl Iterator<Item = &(u32, u32)> {
        self.pairs.iter()
    }
}

impl From<Vec<(u32, u32)>> for EquilibriumSet {
    fn from(mut pairs: Vec<(u32, u32)>) -> Self {
        pairs.sort_unstable();
        pairs.dedup();
        Self { pairs }
    }
}

impl From<EquilibriumSet> for Vec<(u32, u32)> {
    fn from(set: EquilibriumSet) -> Self {
        set.pairs
    }
}

impl IntoIterator for EquilibriumSet {
    type Item = (u32, u32);
    type IntoIter = std::vec::IntoIter<(u32, u32)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// Equilibrium finder for a fixed grid configuration.
///
/// # Example
/// ```
/// use auction_nash::auction::{AuctionConfig, AuctionFormat, EquilibriumSolver, PayoffTables};
///
/// let config = AuctionConfig::default();
/// let tables = PayoffTables::build(50.0, 50.0, AuctionFormat::FirstPrice, &config);
/// let equilibria = EquilibriumSolver::new(config).solve(&tables).unwrap();
/// assert_eq!(equilibria.pairs(), &[(48, 48), (49, 49), (50, 50)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EquilibriumSolver {
    config: AuctionConfig,
}

impl EquilibriumSolver {
    /// Create a solver for the given configuration.
    pub fn new(config: AuctionConfig) -> Self {
        Self { config }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &AuctionConfig {
        &self.config
    }

    /// Best responses of bidder 1 and bidder 2, each indexed by opponent bid.
    pub fn best_responses(
        &self,
        tables: &PayoffTables,
    ) -> Result<(BestResponses, BestResponses), AuctionError> {
        self.check_dimensions(&tables.bidder1)?;
        self.check_dimensions(&tables.bidder2)?;

        Ok((
            BestResponses::compute(&tables.bidder1, self.config.eps),
            BestResponses::compute(&tables.bidder2, self.config.eps),
        ))
    }

    /// Find every pure-strategy Nash equilibrium of the two tables.
    ///
    /// Fails with [`AuctionError::DimensionMismatch`] if either table does not
    /// cover the configured grid.
    pub fn solve(&self, tables: &PayoffTables) -> Result<EquilibriumSet, AuctionError> {
        let (br1, br2) = self.best_responses(tables)?;

        let mut pairs = Vec::new();
        for b1 in self.config.bids() {
            for b2 in self.config.bids() {
                if br1.is_best_response(b1, b2) && br2.is_best_response(b2, b1) {
                    pairs.push((b1, b2));
                }
            }
        }

        log::debug!("found {} equilibria", pairs.len());
        Ok(EquilibriumSet { pairs })
    }

    fn check_dimensions(&self, table: &PayoffTable) -> Result<(), AuctionError> {
        let expected = self.config.grid_size();
        if table.size() != expected {
            return Err(AuctionError::DimensionMismatch {
                expected,
                found: table.size(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::AuctionFormat;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn solve(v1: f64, v2: f64, format: AuctionFormat, config: &AuctionConfig) -> EquilibriumSet {
        let tables = PayoffTables::build(v1, v2, format, config);
        EquilibriumSolver::new(config.clone()).solve(&tables).unwrap()
    }

    #[test]
    fn test_second_price_equal_values() {
        let config = AuctionConfig::default();
        let equilibria = solve(50.0, 50.0, AuctionFormat::SecondPrice, &config);

        assert!(equilibria.contains(50, 50));
        assert!(equilibria.contains(100, 0));
        assert!(equilibria.contains(0, 100));
        assert!(equilibria.contains(50, 49));
        assert!(!equilibria.contains(60, 60));
        assert!(!equilibria.contains(49, 49));

        // b2 < 50 <= b1, b2 == 50, or b1 <= 50 < b2.
        let expected: Vec<(u32, u32)> = config
            .bids()
            .flat_map(|b1| config.bids().map(move |b2| (b1, b2)))
            .filter(|&(b1, b2)| (b2 < 50 && b1 >= 50) || b2 == 50 || (b1 <= 50 && b2 > 50))
            .collect();
        assert_eq!(expected.len(), 5201);
        assert_eq!(equilibria.pairs(), expected.as_slice());
    }

    #[test]
    fn test_first_price_equal_values() {
        let equilibria = solve(50.0, 50.0, AuctionFormat::FirstPrice, &AuctionConfig::default());
        assert_eq!(equilibria.pairs(), &[(48, 48), (49, 49), (50, 50)]);
    }

    #[test]
    fn test_first_price_close_asymmetric_values() {
        let equilibria = solve(49.0, 50.0, AuctionFormat::FirstPrice, &AuctionConfig::default());
        assert_eq!(equilibria.pairs(), &[(48, 48), (48, 49), (49, 49)]);
    }

    #[test]
    fn test_small_grid() {
        let config = AuctionConfig::new().with_max_bid(4);
        let equilibria = solve(4.0, 4.0, AuctionFormat::FirstPrice, &config);
        assert_eq!(equilibria.pairs(), &[(2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn test_single_bid_grid() {
        let config = AuctionConfig::new().with_max_bid(0);
        let equilibria = solve(-10.0, 5.0, AuctionFormat::SecondPrice, &config);
        assert_eq!(equilibria.pairs(), &[(0, 0)]);
    }

    #[test]
    fn test_truthful_bidding_in_second_price() {
        let config = AuctionConfig::new().with_max_bid(40);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..25 {
            let v1 = rng.gen_range(0..=40u32);
            let v2 = rng.gen_range(0..=40u32);
            let equilibria = solve(v1 as f64, v2 as f64, AuctionFormat::SecondPrice, &config);
            assert!(
                equilibria.contains(v1, v2),
                "truthful profile ({}, {}) should be an equilibrium",
                v1,
                v2
            );
        }
    }

    #[test]
    fn test_equilibria_are_mutual_best_responses() {
        let config = AuctionConfig::new().with_max_bid(25);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let v1: f64 = rng.gen_range(-5.0..30.0);
            let v2: f64 = rng.gen_range(-5.0..30.0);
            for format in AuctionFormat::all() {
                let tables = PayoffTables::build(v1, v2, *format, &config);
                let equilibria = EquilibriumSolver::new(config.clone()).solve(&tables).unwrap();

                for &(b1, b2) in equilibria.iter() {
                    let (p1, p2) = tables.payoffs_at(b1, b2);
                    for dev in config.bids() {
                        assert!(tables.bidder1.get(dev, b2) <= p1 + config.eps);
                        assert!(tables.bidder2.get(dev, b1) <= p2 + config.eps);
                    }
                }
            }
        }
    }

    #[test]
    fn test_solve_is_idempotent() {
        let config = AuctionConfig::default();
        let tables = PayoffTables::build(70.0, 50.0, AuctionFormat::SecondPrice, &config);
        let solver = EquilibriumSolver::new(config);
        let first = solver.solve(&tables).unwrap();
        let second = solver.solve(&tables).unwrap();
        assert_eq!(first, second);
        assert!(first.pairs().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_dimension_mismatch() {
        let small = AuctionConfig::new().with_max_bid(4);
        let tables = PayoffTables::build(3.0, 3.0, AuctionFormat::FirstPrice, &small);
        let solver = EquilibriumSolver::new(AuctionConfig::default());

        assert_eq!(
            solver.solve(&tables),
            Err(AuctionError::DimensionMismatch { expected: 101, found: 5 })
        );
    }

    #[test]
    fn test_mismatched_bidder_tables() {
        let config = AuctionConfig::new().with_max_bid(2);
        let mut tables = PayoffTables::build(2.0, 2.0, AuctionFormat::FirstPrice, &config);
        tables.bidder2 = PayoffTable::from_rows(vec![vec![0.0; 2], vec![0.0; 2]]).unwrap();

        let result = EquilibriumSolver::new(config).solve(&tables);
        assert_eq!(
            result,
            Err(AuctionError::DimensionMismatch { expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_loaded_table_of_wrong_size() {
        let config = AuctionConfig::new().with_max_bid(4);
        let tables = PayoffTables::build(4.0, 4.0, AuctionFormat::FirstPrice, &config);
        let mut json = serde_json::to_value(&tables).unwrap();

        // Drop the last row and column: still square, but 4x4 on a 5x5 grid.
        let rows = json["bidder1"].as_array_mut().unwrap();
        rows.pop();
        for row in rows.iter_mut() {
            row.as_array_mut().unwrap().pop();
        }
        let loaded: PayoffTables = serde_json::from_value(json).unwrap();

        assert_eq!(
            EquilibriumSolver::new(config).solve(&loaded),
            Err(AuctionError::DimensionMismatch { expected: 5, found: 4 })
        );
    }

    #[test]
    fn test_loaded_equilibria_are_ordered() {
        let set: EquilibriumSet = serde_json::from_str("[[4, 4], [2, 2], [3, 3], [2, 2]]").unwrap();
        assert_eq!(set.pairs(), &[(2, 2), (3, 3), (4, 4)]);
        assert!(set.contains(2, 2));
        assert!(set.contains(4, 4));
        assert!(!set.contains(2, 3));

        let config = AuctionConfig::new().with_max_bid(4);
        let solved = solve(4.0, 4.0, AuctionFormat::FirstPrice, &config);
        let json = serde_json::to_string(&solved).unwrap();
        assert_eq!(json, "[[2,2],[3,3],[4,4]]");
        assert_eq!(serde_json::from_str::<EquilibriumSet>(&json).unwrap(), solved);
    }
}
