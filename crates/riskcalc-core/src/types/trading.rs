//! Sizing-related data structures: risk inputs, price ranges, results.
//!
//! These flow from the caller (runner or any UI layer) into the
//! [`RiskSizer`](crate::sizer::RiskSizer) and back out for rendering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Risk inputs (caller -> sizer)
// ---------------------------------------------------------------------------

/// The three numbers a single-entry sizing needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskInputs {
    /// Price at which the position is opened.
    pub entry_price: Decimal,
    /// Stop-loss price.
    pub stop_price: Decimal,
    /// Maximum loss in USD the trade may realize at the stop.
    pub max_risk_usd: Decimal,
}

impl RiskInputs {
    pub fn new(entry_price: Decimal, stop_price: Decimal, max_risk_usd: Decimal) -> Self {
        Self { entry_price, stop_price, max_risk_usd }
    }

    /// Absolute distance between entry and stop.
    #[inline]
    pub fn risk_per_share(&self) -> Decimal {
        (self.entry_price - self.stop_price).abs()
    }
}

// ---------------------------------------------------------------------------
// Price bounds
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` range a stop or take-profit may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceBounds {
    /// Build a range, forcing `max` to at least `min + tick`.
    pub fn new(min: Decimal, max: Decimal, tick: Decimal) -> Self {
        Self { min, max: max.max(min + tick) }
    }

    /// Restrict `value` to `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: Decimal) -> Decimal {
        value.max(self.min).min(self.max)
    }

    #[inline]
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

impl std::fmt::Display for PriceBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Stop-loss and take-profit ranges for one entry price and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBounds {
    pub stop: PriceBounds,
    pub take_profit: PriceBounds,
}

// ---------------------------------------------------------------------------
// Sizing result (sizer -> caller)
// ---------------------------------------------------------------------------

/// Outcome of sizing one instrument with all risk in a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingResult {
    pub entry_price: Decimal,
    /// Stop actually used, after clamping into `bounds.stop`.
    pub stop_price: Decimal,
    /// Take-profit actually used, after clamping into `bounds.take_profit`.
    pub take_profit_price: Decimal,
    pub risk_per_share: Decimal,
    /// Largest share count whose loss at the stop stays within budget.
    pub max_quantity: u64,
    pub bounds: RiskBounds,
}

impl SizingResult {
    /// Loss realized if the full `max_quantity` is stopped out.
    pub fn risk_at_stop(&self) -> Decimal {
        self.risk_per_share * Decimal::from(self.max_quantity)
    }

    /// Reward-to-risk ratio, or `None` when the stop distance is zero.
    pub fn reward_to_risk(&self) -> Option<Decimal> {
        if self.risk_per_share.is_zero() {
            return None;
        }
        Some((self.take_profit_price - self.entry_price).abs() / self.risk_per_share)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn bounds_force_one_tick_width() {
        let b = PriceBounds::new(dec!(5), dec!(4), dec!(0.01));
        assert_eq!(b.min, dec!(5));
        assert_eq!(b.max, dec!(5.01));
    }

    #[test]
    fn clamp_inside_and_outside() {
        let b = PriceBounds::new(dec!(80), dec!(99), dec!(0.01));
        assert_eq!(b.clamp(dec!(90)), dec!(90));
        assert_eq!(b.clamp(dec!(10)), dec!(80));
        assert_eq!(b.clamp(dec!(150)), dec!(99));
        assert!(b.contains(dec!(99)));
        assert!(!b.contains(dec!(99.01)));
    }

    #[test]
    fn risk_per_share_is_absolute() {
        assert_eq!(RiskInputs::new(dec!(100), dec!(98), dec!(20)).risk_per_share(), dec!(2));
        assert_eq!(RiskInputs::new(dec!(100), dec!(103), dec!(20)).risk_per_share(), dec!(3));
    }

    #[test]
    fn reward_to_risk() {
        let bounds = RiskBounds {
            stop: PriceBounds::new(dec!(80), dec!(99), dec!(0.01)),
            take_profit: PriceBounds::new(dec!(101), dec!(120), dec!(0.01)),
        };
        let mut r = SizingResult {
            entry_price: dec!(100),
            stop_price: dec!(98),
            take_profit_price: dec!(106),
            risk_per_share: dec!(2),
            max_quantity: 10,
            bounds,
        };
        assert_eq!(r.reward_to_risk(), Some(dec!(3)));
        assert_eq!(r.risk_at_stop(), dec!(20));
        r.risk_per_share = Decimal::ZERO;
        assert_eq!(r.reward_to_risk(), None);
    }
}
