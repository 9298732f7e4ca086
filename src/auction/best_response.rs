//! Best-response correspondences.
//!
//! For each opponent bid, the set of own bids that reach the column maximum
//! of a bidder's payoff table. Computed once per table so the equilibrium
//! search only does set lookups.

use rustc_hash::FxHashSet;

use super::payoff::PayoffTable;

/// Own bids that maximise payoff against one fixed opponent bid.
///
/// Never empty for finite payoffs: the grid is finite and non-empty, so a
/// maximum exists. Infinite valuations are rejected before tables are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestResponseSet {
    bids: FxHashSet<u32>,
}

impl BestResponseSet {
    /// Collect every own bid whose payoff is within `eps` of the best payoff
    /// in `payoffs` (indexed by own bid).
    pub fn from_payoffs<I>(payoffs: I, eps: f64) -> Self
    where
        I: Iterator<Item = f64> + Clone,
    {
        let max_payoff = payoffs.clone().fold(f64::NEG_INFINITY, f64::max);
        let bids = payoffs
            .enumerate()
            .filter(|&(_, payoff)| (payoff - max_payoff).abs() <= eps)
            .map(|(bid, _)| bid as u32)
            .collect();
        Self { bids }
    }

    /// Whether `bid` is a best response.
    #[inline]
    pub fn contains(&self, bid: u32) -> bool {
        self.bids.contains(&bid)
    }

    /// Number of best-response bids.
    pub fn len(&self) -> usize {
        self.bids.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    /// Best-response bids in ascending order.
    pub fn sorted(&self) -> Vec<u32> {
        let mut bids: Vec<u32> = self.bids.iter().copied().collect();
        bids.sort_unstable();
        bids
    }
}

/// A bidder's best-response set for every opponent bid.
#[derive(Debug, Clone, PartialEq)]
pub struct BestResponses {
    /// sets[opp] = best responses against opponent bid `opp`
    sets: Vec<BestResponseSet>,
}

impl BestResponses {
    /// Compute best responses for every column of `table`.
    pub fn compute(table: &PayoffTable, eps: f64) -> Self {
        let sets = (0..table.size() as u32)
            .map(|opp| BestResponseSet::from_payoffs(table.column(opp), eps))
            .collect();
        Self { sets }
    }

    /// Best responses against opponent bid `opp`.
    ///
    /// # Panics
    /// Panics if `opp` is outside the grid.
    pub fn against(&self, opp: u32) -> &BestResponseSet {
        &self.sets[opp as usize]
    }

    /// Whether `own` is a best response to `opp`.
    #[inline]
    pub fn is_best_response(&self, own: u32, opp: u32) -> bool {
        self.sets
            .get(opp as usize)
            .is_some_and(|set| set.contains(own))
    }

    /// Number of opponent bids covered.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether no opponent bids are covered.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterate `(opponent bid, best responses)` in ascending opponent bid order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &BestResponseSet)> {
        self.sets.iter().enumerate().map(|(opp, set)| (opp as u32, set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::{AuctionConfig, AuctionFormat, PayoffTables};

    #[test]
    fn test_ties_within_tolerance_are_kept() {
        let payoffs = [1.0, 3.0, 3.0 - 1e-13, 2.0];
        let set = BestResponseSet::from_payoffs(payoffs.iter().copied(), 1e-12);
        assert_eq!(set.sorted(), vec![1, 2]);

        let strict = BestResponseSet::from_payoffs(payoffs.iter().copied(), 0.0);
        assert_eq!(strict.sorted(), vec![1]);
    }

    #[test]
    fn test_first_price_best_responses() {
        // v = 4 on a 0..=4 grid.
        let config = AuctionConfig::new().with_max_bid(4);
        let tables = PayoffTables::build(4.0, 4.0, AuctionFormat::FirstPrice, &config);
        let br = BestResponses::compute(&tables.bidder1, config.eps);

        assert_eq!(br.len(), 5);
        assert_eq!(br.against(0).sorted(), vec![1]);
        assert_eq!(br.against(1).sorted(), vec![2]);
        assert_eq!(br.against(2).sorted(), vec![2, 3]);
        assert_eq!(br.against(3).sorted(), vec![3]);
        assert_eq!(br.against(4).sorted(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_second_price_best_responses() {
        let config = AuctionConfig::default();
        let tables = PayoffTables::build(50.0, 50.0, AuctionFormat::SecondPrice, &config);
        let br = BestResponses::compute(&tables.bidder1, config.eps);

        assert_eq!(br.against(10).sorted(), (11..=100).collect::<Vec<_>>());
        assert_eq!(br.against(50).len(), 101);
        assert_eq!(br.against(60).sorted(), (0..60).collect::<Vec<_>>());
        assert!(br.is_best_response(50, 50));
        assert!(!br.is_best_response(60, 60));
        assert!(!br.is_best_response(0, 101));
    }

    #[test]
    fn test_never_empty() {
        let config = AuctionConfig::new().with_max_bid(30);
        for &(v1, v2) in &[(10.0, 25.0), (-3.0, 0.0), (30.5, 30.5), (0.1, 0.2)] {
            for format in AuctionFormat::all() {
                let tables = PayoffTables::build(v1, v2, *format, &config);
                for table in [&tables.bidder1, &tables.bidder2] {
                    let br = BestResponses::compute(table, config.eps);
                    assert_eq!(br.len(), config.grid_size());
                    assert!(br.iter().all(|(_, set)| !set.is_empty()));
                }
            }
        }
    }
}
