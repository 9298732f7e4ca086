//! Sealed-bid auction model and equilibrium finder.
//!
//! Two bidders submit integer bids on `0..=max_bid`. The higher bid wins, a
//! tie is a fair coin flip, and the loser pays nothing. The format decides
//! what the winner pays:
//!
//! | Format | Winner payoff        |
//! |--------|----------------------|
//! | FPA    | `value - own_bid`    |
//! | SPA    | `value - opp_bid`    |
//!
//! # Usage
//!
//! ```
//! use auction_nash::auction::{AuctionConfig, AuctionFormat, EquilibriumSolver, PayoffTables};
//!
//! let config = AuctionConfig::default();
//! let tables = PayoffTables::build(49.0, 50.0, AuctionFormat::FirstPrice, &config);
//! let equilibria = EquilibriumSolver::new(config).solve(&tables).unwrap();
//! assert_eq!(equilibria.pairs(), &[(48, 48), (48, 49), (49, 49)]);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! (v1, v2, format) ──► PayoffTables ──► BestResponses x2 ──► EquilibriumSet
//! ```

pub mod best_response;
pub mod config;
pub mod error;
pub mod format;
pub mod payoff;
pub mod solver;

pub use best_response::{BestResponseSet, BestResponses};
pub use config::{AuctionConfig, ConfigError, DEFAULT_EPS, DEFAULT_MAX_BID};
pub use error::{check_valuations, AuctionError};
pub use format::AuctionFormat;
pub use payoff::{PayoffTable, PayoffTables};
pub use solver::{EquilibriumSet, EquilibriumSolver};
