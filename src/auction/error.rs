//! Errors raised while building payoff tables or searching for equilibria.

use super::config::ConfigError;

/// Errors that abort a single auction scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum AuctionError {
    /// The auction format name is not one of the recognised formats.
    InvalidFormat(String),
    /// A valuation is infinite or NaN.
    InvalidValuation(f64),
    /// A payoff table does not have the configured grid dimensions.
    DimensionMismatch {
        /// Expected number of bids per axis.
        expected: usize,
        /// Number of bids per axis actually found.
        found: usize,
    },
    /// The configuration is invalid.
    Config(ConfigError),
}

impl std::fmt::Display for AuctionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(name) => {
                write!(f, "Invalid auction format '{}' (expected FPA or SPA)", name)
            }
            Self::InvalidValuation(v) => write!(f, "Valuation {} is not a finite number", v),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "Payoff table is {}x{} but the bid grid is {}x{}",
                found, found, expected, expected
            ),
            Self::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for AuctionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

/// Fails with [`AuctionError::InvalidValuation`] unless both valuations are finite.
pub fn check_valuations(v1: f64, v2: f64) -> Result<(), AuctionError> {
    match [v1, v2].into_iter().find(|v| !v.is_finite()) {
        Some(v) => Err(AuctionError::InvalidValuation(v)),
        None => Ok(()),
    }
}

impl From<ConfigError> for AuctionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
