//! Auction formats and their payment rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AuctionError;

/// Sealed-bid auction format.
///
/// The format only decides what the winner pays; winner determination
/// (highest bid wins, ties split 50/50) is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionFormat {
    /// Winner pays their own bid.
    #[serde(rename = "FPA", alias = "first-price")]
    FirstPrice,
    /// Winner pays the opponent's bid.
    #[serde(rename = "SPA", alias = "second-price")]
    SecondPrice,
}

impl AuctionFormat {
    /// Both formats, first-price first.
    pub fn all() -> &'static [AuctionFormat] {
        &[AuctionFormat::FirstPrice, AuctionFormat::SecondPrice]
    }

    /// Short name used in reports ("FPA" / "SPA").
    pub fn short_name(&self) -> &'static str {
        match self {
            AuctionFormat::FirstPrice => "FPA",
            AuctionFormat::SecondPrice => "SPA",
        }
    }

    /// Payoff of an outright win for a bidder with `value`.
    #[inline]
    pub fn winner_payoff(&self, value: f64, own_bid: u32, opp_bid: u32) -> f64 {
        match self {
            AuctionFormat::FirstPrice => value - own_bid as f64,
            AuctionFormat::SecondPrice => value - opp_bid as f64,
        }
    }

    /// Expected payoff for a bidder with `value` at the bid pair, from that
    /// bidder's own perspective.
    #[inline]
    pub fn payoff(&self, value: f64, own_bid: u32, opp_bid: u32) -> f64 {
        if own_bid > opp_bid {
            self.winner_payoff(value, own_bid, opp_bid)
        } else if own_bid < opp_bid {
            0.0
        } else {
            0.5 * self.winner_payoff(value, own_bid, opp_bid)
        }
    }
}

impl fmt::Display for AuctionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for AuctionFormat {
    type Err = AuctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fpa" | "first-price" | "first_price" | "firstprice" => Ok(AuctionFormat::FirstPrice),
            "spa" | "second-price" | "second_price" | "secondprice" => {
                Ok(AuctionFormat::SecondPrice)
            }
            _ => Err(AuctionError::InvalidFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_names() {
        assert_eq!("FPA".parse::<AuctionFormat>().unwrap(), AuctionFormat::FirstPrice);
        assert_eq!("spa".parse::<AuctionFormat>().unwrap(), AuctionFormat::SecondPrice);
        assert_eq!(
            "First-Price".parse::<AuctionFormat>().unwrap(),
            AuctionFormat::FirstPrice
        );
        assert_eq!(
            " second_price ".parse::<AuctionFormat>().unwrap(),
            AuctionFormat::SecondPrice
        );
    }

    #[test]
    fn test_parse_unknown_format() {
        assert_eq!(
            "dutch".parse::<AuctionFormat>(),
            Err(AuctionError::InvalidFormat("dutch".to_string()))
        );
        assert!("".parse::<AuctionFormat>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for format in AuctionFormat::all() {
            assert_eq!(format.to_string().parse::<AuctionFormat>().unwrap(), *format);
        }
    }

    #[test]
    fn test_payment_rules() {
        let fpa = AuctionFormat::FirstPrice;
        let spa = AuctionFormat::SecondPrice;

        assert_eq!(fpa.payoff(50.0, 20, 10), 30.0);
        assert_eq!(spa.payoff(50.0, 20, 10), 40.0);
        assert_eq!(fpa.payoff(50.0, 10, 20), 0.0);
        assert_eq!(spa.payoff(50.0, 10, 20), 0.0);
        assert_eq!(fpa.payoff(50.0, 20, 20), 15.0);
        assert_eq!(spa.payoff(50.0, 20, 20), 15.0);
        // Overbidding can make winning a loss.
        assert_eq!(fpa.payoff(10.0, 30, 0), -20.0);
        assert_eq!(spa.payoff(-5.0, 0, 0), -2.5);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&AuctionFormat::FirstPrice).unwrap();
        assert_eq!(json, "\"FPA\"");
        let parsed: AuctionFormat = serde_json::from_str("\"second-price\"").unwrap();
        assert_eq!(parsed, AuctionFormat::SecondPrice);
    }
}
