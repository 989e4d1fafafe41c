//! Caller-owned per-instrument editing state.
//!
//! A stop-loss (or take-profit) is typically edited through two controls, a
//! range slider and a numeric field, that must always agree. Instead of
//! keeping one copy per control and syncing them on every change, a
//! [`BoundValue`] stores the single value both controls read; whichever
//! control the user touched writes through [`BoundValue::set`].
//!
//! [`TradeTicket`] groups the inputs for one instrument. Changing the entry
//! price or direction recomputes the allowed ranges and pulls previously
//! chosen stop/take-profit values back inside them.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{CalcResult, ensure_positive};
use crate::sizer::RiskSizer;
use crate::types::{BindingSource, PriceBounds, RiskBounds, RiskInputs, SizingResult, TradeDirection};

/// One logical value shared by every control that displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundValue {
    value: Decimal,
    last_source: BindingSource,
}

impl BoundValue {
    pub fn new(value: Decimal) -> Self {
        Self { value, last_source: BindingSource::Calculated }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Control that produced the current value.
    pub fn last_source(&self) -> BindingSource {
        self.last_source
    }

    /// Write `value` from `source`, clamped into `bounds`. Returns the stored value.
    pub fn set(&mut self, source: BindingSource, value: Decimal, bounds: &PriceBounds) -> Decimal {
        self.value = bounds.clamp(value);
        self.last_source = source;
        self.value
    }

    /// Re-clamp after the bounds moved. Returns `true` if the value changed.
    fn rebound(&mut self, bounds: &PriceBounds) -> bool {
        let clamped = bounds.clamp(self.value);
        if clamped == self.value {
            return false;
        }
        self.value = clamped;
        self.last_source = BindingSource::Calculated;
        true
    }
}

/// Editable inputs for one instrument, always kept mutually consistent.
#[derive(Debug, Clone)]
pub struct TradeTicket {
    symbol: String,
    sizer: RiskSizer,
    entry_price: Decimal,
    direction: TradeDirection,
    max_risk_usd: Decimal,
    bounds: RiskBounds,
    stop: BoundValue,
    take_profit: BoundValue,
}

impl TradeTicket {
    /// Open a ticket with stop and take-profit seeded from `entry_price`.
    pub fn open(
        sizer: RiskSizer,
        symbol: impl Into<String>,
        entry_price: Decimal,
        direction: TradeDirection,
        max_risk_usd: Decimal,
    ) -> CalcResult<Self> {
        let bounds = sizer.compute_risk_bounds(entry_price, direction)?;
        let (stop_seed, tp_seed) = sizer.default_targets(entry_price);

        Ok(Self {
            symbol: symbol.into(),
            sizer,
            entry_price,
            direction,
            max_risk_usd,
            bounds,
            stop: BoundValue::new(bounds.stop.clamp(stop_seed)),
            take_profit: BoundValue::new(bounds.take_profit.clamp(tp_seed)),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn entry_price(&self) -> Decimal {
        self.entry_price
    }

    pub fn direction(&self) -> TradeDirection {
        self.direction
    }

    pub fn max_risk_usd(&self) -> Decimal {
        self.max_risk_usd
    }

    pub fn bounds(&self) -> &RiskBounds {
        &self.bounds
    }

    pub fn stop(&self) -> &BoundValue {
        &self.stop
    }

    pub fn take_profit(&self) -> &BoundValue {
        &self.take_profit
    }

    /// Change the entry price; rejected (state untouched) if not positive.
    pub fn set_entry_price(&mut self, price: Decimal) -> CalcResult<()> {
        ensure_positive("entry_price", price)?;
        self.entry_price = price;
        self.refresh()
    }

    pub fn set_direction(&mut self, direction: TradeDirection) -> CalcResult<()> {
        self.direction = direction;
        self.refresh()
    }

    pub fn set_max_risk_usd(&mut self, max_risk_usd: Decimal) {
        self.max_risk_usd = max_risk_usd;
    }

    pub fn set_stop(&mut self, source: BindingSource, value: Decimal) -> Decimal {
        self.stop.set(source, value, &self.bounds.stop)
    }

    pub fn set_take_profit(&mut self, source: BindingSource, value: Decimal) -> Decimal {
        self.take_profit.set(source, value, &self.bounds.take_profit)
    }

    /// Recompute bounds and clamp stop/take-profit into them.
    pub fn refresh(&mut self) -> CalcResult<()> {
        self.bounds = self.sizer.compute_risk_bounds(self.entry_price, self.direction)?;
        let stop_moved = self.stop.rebound(&self.bounds.stop);
        let tp_moved = self.take_profit.rebound(&self.bounds.take_profit);
        if stop_moved || tp_moved {
            debug!(
                symbol = %self.symbol,
                stop = %self.stop.value(),
                take_profit = %self.take_profit.value(),
                "re-clamped targets after bounds change"
            );
        }
        Ok(())
    }

    pub fn risk_inputs(&self) -> RiskInputs {
        RiskInputs::new(self.entry_price, self.stop.value(), self.max_risk_usd)
    }

    /// Size the ticket with its current values.
    pub fn evaluate(&self) -> CalcResult<SizingResult> {
        self.sizer.size(&self.risk_inputs(), self.take_profit.value(), self.direction)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn ticket(direction: TradeDirection) -> TradeTicket {
        TradeTicket::open(RiskSizer::default(), "AAPL", dec!(100), direction, dec!(20)).unwrap()
    }

    #[test]
    fn open_seeds_two_percent_targets() {
        let t = ticket(TradeDirection::Long);
        assert_eq!(t.stop().value(), dec!(98));
        assert_eq!(t.take_profit().value(), dec!(102));
        assert_eq!(t.stop().last_source(), BindingSource::Calculated);
        assert_eq!(t.evaluate().unwrap().max_quantity, 10);
    }

    #[test]
    fn open_short_clamps_seeds() {
        let t = ticket(TradeDirection::Short);
        assert_eq!(t.stop().value(), dec!(101));
        assert_eq!(t.take_profit().value(), dec!(99));
    }

    #[test]
    fn both_controls_share_one_value() {
        let mut t = ticket(TradeDirection::Long);
        assert_eq!(t.set_stop(BindingSource::Slider, dec!(95)), dec!(95));
        assert_eq!(t.stop().value(), dec!(95));
        assert_eq!(t.set_stop(BindingSource::Manual, dec!(96.5)), dec!(96.5));
        assert_eq!(t.stop().value(), dec!(96.5));
        assert_eq!(t.stop().last_source(), BindingSource::Manual);
    }

    #[test]
    fn manual_entry_outside_range_is_clamped() {
        let mut t = ticket(TradeDirection::Long);
        assert_eq!(t.set_stop(BindingSource::Manual, dec!(10)), dec!(80));
        assert_eq!(t.set_take_profit(BindingSource::Slider, dec!(500)), dec!(120));
    }

    #[test]
    fn entry_change_reclamps_previous_selection() {
        let mut t = ticket(TradeDirection::Long);
        t.set_stop(BindingSource::Slider, dec!(81));
        t.set_entry_price(dec!(110)).unwrap();
        // new stop range is [88, 108.9]
        assert_eq!(t.stop().value(), dec!(88));
        assert_eq!(t.stop().last_source(), BindingSource::Calculated);
        // 102 is below the new take-profit floor of 111.1
        assert_eq!(t.take_profit().value(), dec!(111.10));
    }

    #[test]
    fn direction_flip_moves_targets_across_entry() {
        let mut t = ticket(TradeDirection::Long);
        t.set_direction(TradeDirection::Short).unwrap();
        assert!(t.stop().value() > t.entry_price());
        assert!(t.take_profit().value() < t.entry_price());
    }

    #[test]
    fn invalid_entry_leaves_state() {
        let mut t = ticket(TradeDirection::Long);
        assert!(t.set_entry_price(Decimal::ZERO).is_err());
        assert_eq!(t.entry_price(), dec!(100));
        assert_eq!(t.stop().value(), dec!(98));
    }

    #[test]
    fn risk_budget_edit() {
        let mut t = ticket(TradeDirection::Long);
        t.set_max_risk_usd(dec!(50));
        assert_eq!(t.evaluate().unwrap().max_quantity, 25);
        t.set_max_risk_usd(Decimal::ZERO);
        assert_eq!(t.evaluate().unwrap().max_quantity, 0);
    }
}
