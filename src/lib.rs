//! # Auction Nash
//!
//! Pure-strategy Nash equilibria of two-bidder sealed-bid auctions on a
//! discrete bid grid.
//!
//! ## Features
//!
//! - **First- and second-price formats**: highest bid wins, ties split 50/50
//! - **Full payoff tables**: both bidders, every bid pair on `0..=max_bid`
//! - **Best-response search**: O(grid²) equilibrium enumeration with a
//!   configurable tie tolerance
//! - **Scenario batches**: valuation profiles × formats, optionally in parallel,
//!   with per-scenario failure isolation and JSON output
//!
//! ## Quick Start
//!
//! ```
//! use auction_nash::{AuctionConfig, AuctionFormat, Scenario};
//!
//! let config = AuctionConfig::default();
//! let result = Scenario::new(50.0, 50.0, AuctionFormat::SecondPrice)
//!     .solve(&config)
//!     .unwrap();
//!
//! // Truthful bidding is an equilibrium of the second-price auction.
//! assert!(result.equilibria.contains(50, 50));
//! ```
//!
//! ## Modules
//!
//! - [`auction`]: Payoff model and equilibrium finder
//! - [`scenario`]: Batch driver, reporting and output
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Scenario batch driver                       │
//! │  - valuation profiles × formats   - per-scenario isolation      │
//! │  - rayon parallelism              - Reporter / BatchOutput      │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ per scenario
//!                               ▼
//!    ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!    │ PayoffTables │ ──► │ BestResponses  │ ──► │  EquilibriumSet  │
//!    │  (A and B)   │     │ (per opp. bid) │     │ (mutual BR pairs)│
//!    └──────────────┘     └────────────────┘     └──────────────────┘
//! ```

#![warn(missing_docs)]

/// Auction payoff model and equilibrium finder.
///
/// This is the core module: payoff tables, best responses and the search.
pub mod auction;

/// Scenario batches, reporting and serializable output.
pub mod scenario;

// Re-export commonly used types at crate root for convenience
pub use auction::{
    AuctionConfig, AuctionError, AuctionFormat, EquilibriumSet, EquilibriumSolver, PayoffTables,
};
pub use scenario::{run_batch, BatchOutput, Reporter, Scenario, ScenarioBatch};
