//! Enumerations used throughout the risk calculator.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Trade direction
// ---------------------------------------------------------------------------

/// Which way the trade is opened.
///
/// Determines on which side of the entry the stop-loss and take-profit sit,
/// and in which direction scale-in levels move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    /// Buy first: stop below entry, take-profit above.
    #[default]
    #[serde(alias = "buy", alias = "LONG", alias = "Long")]
    Long,
    /// Sell first: stop above entry, take-profit below.
    #[serde(alias = "sell", alias = "SHORT", alias = "Short")]
    Short,
}

impl TradeDirection {
    /// Multiplier applied to the previous level's price when scaling in.
    ///
    /// Adding to a position happens as price moves against it, so Long levels
    /// step down (`1 - step`) and Short levels step up (`1 + step`).
    #[inline]
    pub fn adverse_factor(self, step_percent: Decimal) -> Decimal {
        match self {
            Self::Long => Decimal::ONE - step_percent,
            Self::Short => Decimal::ONE + step_percent,
        }
    }
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
        }
    }
}

impl FromStr for TradeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" | "buy" => Ok(Self::Long),
            "short" | "sell" => Ok(Self::Short),
            other => Err(format!("unknown trade direction: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Binding source
// ---------------------------------------------------------------------------

/// Which input control last wrote a bound value.
///
/// A stop or take-profit is edited through two controls (a range slider and a
/// free-form numeric field) that must always show the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingSource {
    Slider,
    Manual,
    /// Seeded by the calculator itself (defaults, re-clamping).
    Calculated,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("Long".parse::<TradeDirection>(), Ok(TradeDirection::Long));
        assert_eq!(" BUY ".parse::<TradeDirection>(), Ok(TradeDirection::Long));
        assert_eq!("short".parse::<TradeDirection>(), Ok(TradeDirection::Short));
        assert_eq!("sell".parse::<TradeDirection>(), Ok(TradeDirection::Short));
        assert!("flat".parse::<TradeDirection>().is_err());
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&TradeDirection::Short).unwrap();
        assert_eq!(json, "\"short\"");
        let dir: TradeDirection = serde_json::from_str("\"buy\"").unwrap();
        assert_eq!(dir, TradeDirection::Long);
    }

    #[test]
    fn adverse_factor_by_direction() {
        assert_eq!(TradeDirection::Long.adverse_factor(dec!(0.02)), dec!(0.98));
        assert_eq!(TradeDirection::Short.adverse_factor(dec!(0.02)), dec!(1.02));
    }
}
