//! Payoff tables for the two bidders.
//!
//! Each bidder gets a square table indexed `[own_bid][opp_bid]` covering the
//! whole bid grid. Tables are built once per scenario and never mutated.

use serde::{Deserialize, Serialize};

use super::config::AuctionConfig;
use super::error::{check_valuations, AuctionError};
use super::format::AuctionFormat;

/// A bidder's payoff over every (own bid, opponent bid) pair.
///
/// Stored row-major: row = own bid, column = opponent bid. Serialized as a
/// list of rows and checked to be square on the way back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct PayoffTable {
    size: usize,
    cells: Vec<f64>,
}

impl PayoffTable {
    /// Build a table by evaluating `payoff(own, opp)` on every grid cell.
    pub fn from_fn<F>(config: &AuctionConfig, mut payoff: F) -> Self
    where
        F: FnMut(u32, u32) -> f64,
    {
        let size = config.grid_size();
        let mut cells = Vec::with_capacity(size * size);
        for own in config.bids() {
            for opp in config.bids() {
                cells.push(payoff(own, opp));
            }
        }
        Self { size, cells }
    }

    /// Build a table from explicit rows (`rows[own][opp]`).
    ///
    /// Fails if the rows do not form a square table.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AuctionError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(AuctionError::DimensionMismatch {
                    expected: size,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    /// Number of bids per axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Payoff when the owner bids `own` against `opp`.
    ///
    /// # Panics
    /// Panics if either bid is outside the table.
    #[inline]
    pub fn get(&self, own: u32, opp: u32) -> f64 {
        let (own, opp) = (own as usize, opp as usize);
        assert!(own < self.size && opp < self.size, "bid outside payoff table");
        self.cells[own * self.size + opp]
    }

    /// Payoffs of every own bid against a fixed opponent bid, in own-bid order.
    pub fn column(&self, opp: u32) -> impl Iterator<Item = f64> + Clone + '_ {
        self.cells
            .iter()
            .skip(opp as usize)
            .step_by(self.size.max(1))
            .copied()
    }

    /// Row of payoffs for a fixed own bid.
    pub fn row(&self, own: u32) -> &[f64] {
        let start = own as usize * self.size;
        &self.cells[start..start + self.size]
    }
}

impl TryFrom<Vec<Vec<f64>>> for PayoffTable {
    type Error = AuctionError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<PayoffTable> for Vec<Vec<f64>> {
    fn from(table: PayoffTable) -> Self {
        table
            .cells
            .chunks(table.size.max(1))
            .map(<[f64]>::to_vec)
            .collect()
    }
}

/// Both bidders' payoff tables for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffTables {
    /// Bidder 1's payoffs, `[b1][b2]`.
    pub bidder1: PayoffTable,
    /// Bidder 2's payoffs, `[b2][b1]`.
    pub bidder2: PayoffTable,
}

impl PayoffTables {
    /// Build both tables for valuations `v1`, `v2` under `format`.
    ///
    /// Valuations are expected to be finite; see [`check_valuations`].
    ///
    /// # Example
    /// ```
    /// use auction_nash::auction::{AuctionConfig, AuctionFormat, PayoffTables};
    ///
    /// let tables = PayoffTables::build(50.0, 50.0, AuctionFormat::SecondPrice, &AuctionConfig::default());
    /// assert_eq!(tables.bidder1.get(20, 10), 40.0);
    /// assert_eq!(tables.bidder2.get(10, 20), 0.0);
    /// ```
    pub fn build(v1: f64, v2: f64, format: AuctionFormat, config: &AuctionConfig) -> Self {
        log::debug!(
            "building {}x{} payoff tables for ({}, {}) in {}",
            config.grid_size(),
            config.grid_size(),
            v1,
            v2,
            format
        );
        Self {
            bidder1: PayoffTable::from_fn(config, |own, opp| format.payoff(v1, own, opp)),
            bidder2: PayoffTable::from_fn(config, |own, opp| format.payoff(v2, own, opp)),
        }
    }

    /// Like [`PayoffTables::build`], but with the format given by name.
    ///
    /// The name and valuations are validated once before any table is built.
    pub fn build_named(
        v1: f64,
        v2: f64,
        format: &str,
        config: &AuctionConfig,
    ) -> Result<Self, AuctionError> {
        let format: AuctionFormat = format.parse()?;
        check_valuations(v1, v2)?;
        Ok(Self::build(v1, v2, format, config))
    }

    /// Payoffs `(bidder 1, bidder 2)` at the bid pair `(b1, b2)`.
    pub fn payoffs_at(&self, b1: u32, b2: u32) -> (f64, f64) {
        (self.bidder1.get(b1, b2), self.bidder2.get(b2, b1))
    }
}
