//! Risk sizing: stop/take-profit ranges and risk-to-quantity conversion.
//!
//! The sizer answers two questions for one instrument:
//!
//! 1. Where may the stop-loss and take-profit sit, given the entry price and
//!    direction? ([`RiskSizer::compute_risk_bounds`])
//! 2. How many shares can be opened so that hitting the stop loses at most
//!    the risk budget? ([`RiskSizer::compute_max_quantity`])
//!
//! Share counts are always truncated toward zero, never rounded, so the
//! result can never authorize a loss above the budget.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::config::SizerSettings;
use crate::error::{CalcError, CalcResult, ensure_positive};
use crate::types::{LevelPlanEntry, PriceBounds, RiskBounds, RiskInputs, SizingResult, TradeDirection};

/// Stateless risk calculator parameterized by tick size and bound band.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskSizer {
    settings: SizerSettings,
}

impl RiskSizer {
    pub fn new(settings: SizerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SizerSettings {
        &self.settings
    }

    /// Valid stop-loss and take-profit ranges for `entry_price`.
    ///
    /// With default settings and a Long trade the stop lies in
    /// `[0.80·e, 0.99·e]` and the take-profit in `[1.01·e, 1.20·e]`; Short
    /// swaps the two. Every bound is floored at one tick (two for the upper
    /// end) so tiny prices still yield a usable, non-empty range.
    pub fn compute_risk_bounds(&self, entry_price: Decimal, direction: TradeDirection) -> CalcResult<RiskBounds> {
        let entry = ensure_positive("entry_price", entry_price)?;

        let below = self.band(entry * (Decimal::ONE - self.settings.far_pct), entry * (Decimal::ONE - self.settings.near_pct));
        let above = self.band(entry * (Decimal::ONE + self.settings.near_pct), entry * (Decimal::ONE + self.settings.far_pct));

        let bounds = match direction {
            TradeDirection::Long => RiskBounds { stop: below, take_profit: above },
            TradeDirection::Short => RiskBounds { stop: above, take_profit: below },
        };
        debug!(%entry, %direction, stop = %bounds.stop, take_profit = %bounds.take_profit, "risk bounds");
        Ok(bounds)
    }

    fn band(&self, low: Decimal, high: Decimal) -> PriceBounds {
        let tick = self.settings.min_tick;
        PriceBounds::new(low.max(tick), high.max(tick + tick), tick)
    }

    /// Largest whole share count whose loss at the stop is within budget.
    ///
    /// Returns 0, not an error, for a zero stop distance or a non-positive
    /// budget: both are ordinary transient states while inputs are edited.
    /// A share count that does not fit in `u64` (or a quotient outside the
    /// decimal range) is [`CalcError::Overflow`].
    pub fn compute_max_quantity(&self, entry_price: Decimal, stop_price: Decimal, max_risk_usd: Decimal) -> CalcResult<u64> {
        ensure_positive("entry_price", entry_price)?;
        ensure_positive("stop_price", stop_price)?;

        let risk_per_share = risk_per_share(entry_price, stop_price);
        if risk_per_share.is_zero() {
            debug!(%entry_price, "zero stop distance, cannot size");
            return Ok(0);
        }
        if max_risk_usd <= Decimal::ZERO {
            debug!(%max_risk_usd, "empty risk budget");
            return Ok(0);
        }

        let raw = max_risk_usd.checked_div(risk_per_share).ok_or(CalcError::Overflow("max_quantity"))?.trunc();
        let mut qty = raw.to_u64().ok_or(CalcError::Overflow("max_quantity"))?;
        // Decimal division rounds at 28 significant digits; step back if the
        // rounding pushed us one share over budget.
        let cost = Decimal::from(qty).checked_mul(risk_per_share).ok_or(CalcError::Overflow("max_quantity"))?;
        if cost > max_risk_usd {
            qty = qty.saturating_sub(1);
        }
        Ok(qty)
    }

    /// Seed values for stop and take-profit before the user edits them.
    ///
    /// Returns `(reference·(1 − pct), reference·(1 + pct))`, each at least one
    /// tick. The seeds are direction-agnostic; clamping them into
    /// [`RiskBounds`] moves them to the nearest valid edge.
    pub fn default_targets(&self, reference_price: Decimal) -> (Decimal, Decimal) {
        let pct = self.settings.default_target_pct;
        let tick = self.settings.min_tick;
        let stop = (reference_price * (Decimal::ONE - pct)).max(tick);
        let take_profit = (reference_price * (Decimal::ONE + pct)).max(tick);
        (stop, take_profit)
    }

    /// Size one instrument: bounds, clamped stop/target, max quantity.
    pub fn size(&self, inputs: &RiskInputs, take_profit: Decimal, direction: TradeDirection) -> CalcResult<SizingResult> {
        let bounds = self.compute_risk_bounds(inputs.entry_price, direction)?;
        let stop_price = bounds.stop.clamp(inputs.stop_price);
        let take_profit_price = bounds.take_profit.clamp(take_profit);
        let max_quantity = self.compute_max_quantity(inputs.entry_price, stop_price, inputs.max_risk_usd)?;

        Ok(SizingResult {
            entry_price: inputs.entry_price,
            stop_price,
            take_profit_price,
            risk_per_share: risk_per_share(inputs.entry_price, stop_price),
            max_quantity,
            bounds,
        })
    }
}

/// Absolute distance between entry and stop.
#[inline]
pub fn risk_per_share(entry_price: Decimal, stop_price: Decimal) -> Decimal {
    (entry_price - stop_price).abs()
}

/// Shares per entry when `max_quantity` is split evenly over `entries`.
pub fn suggested_shares_per_entry(max_quantity: u64, entries: usize) -> u64 {
    if entries == 0 {
        return 0;
    }
    max_quantity / entries as u64
}

/// Even scale-in plan for levels `1..entries`, at least one share each.
///
/// Level 0 only anchors the average, so the plan has `entries - 1` items.
pub fn suggested_plan(max_quantity: u64, entries: usize) -> Vec<LevelPlanEntry> {
    let per_entry = suggested_shares_per_entry(max_quantity, entries).max(1);
    (1..entries).map(|_| LevelPlanEntry::new(per_entry)).collect()
}
