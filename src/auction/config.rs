//! Configuration options for the equilibrium search.
//!
//! The bid grid bound and the tie tolerance are runtime settings so the grid
//! resolution can be changed (for example a 5×5 grid in tests) without
//! touching the payoff or search code.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default inclusive upper bound of the bid grid.
pub const DEFAULT_MAX_BID: u32 = 100;

/// Default absolute tolerance when comparing payoffs against a column maximum.
pub const DEFAULT_EPS: f64 = 1e-12;

/// Configuration for payoff construction and the equilibrium search.
///
/// # Example
/// ```
/// use auction_nash::auction::AuctionConfig;
///
/// let config = AuctionConfig::default();
/// assert_eq!(config.max_bid, 100);
/// assert_eq!(config.grid_size(), 101);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuctionConfig {
    /// Inclusive upper bound of the bid grid. Bids range over `0..=max_bid`.
    pub max_bid: u32,

    /// Absolute tolerance used when collecting best responses.
    ///
    /// Tie payoffs carry a 0.5 factor, so computed maxima are compared with
    /// `|payoff - max| <= eps` rather than exact equality.
    pub eps: f64,

    /// Number of threads for running scenarios in parallel.
    ///
    /// `None` uses the global rayon pool, `Some(0)` or `Some(1)` runs the
    /// batch sequentially.
    pub num_threads: Option<usize>,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            max_bid: DEFAULT_MAX_BID,
            eps: DEFAULT_EPS,
            num_threads: None,
        }
    }
}

impl AuctionConfig {
    /// Create a new AuctionConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bids on each axis of a payoff table.
    pub fn grid_size(&self) -> usize {
        self.max_bid as usize + 1
    }

    /// Iterator over every legal bid, ascending.
    pub fn bids(&self) -> impl Iterator<Item = u32> + Clone {
        0..=self.max_bid
    }

    /// Builder method: set the inclusive grid bound.
    pub fn with_max_bid(mut self, max_bid: u32) -> Self {
        self.max_bid = max_bid;
        self
    }

    /// Builder method: set the tie tolerance.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    ///
    /// Any grid bound is accepted; only the tolerance is checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.eps));
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    IoError(String),
    /// The configuration file is not valid JSON for this struct.
    ParseError(String),
    /// Tolerance is negative or not finite.
    InvalidTolerance(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidTolerance(val) => {
                write!(f, "Tolerance {} must be finite and non-negative", val)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
