//! Per-instrument evaluation: config entry in, report data out.

use riskcalc_core::config::{InstrumentConfig, SizerSettings};
use riskcalc_core::quote::{PriceSource, entry_price_for};
use riskcalc_core::session::TradeTicket;
use riskcalc_core::sizer::{suggested_plan, suggested_shares_per_entry};
use riskcalc_core::{BindingSource, CalcResult, Position, PositionBuilder, RiskSizer, SizingResult, TradeDirection};
use rust_decimal::Decimal;
use tracing::debug;

/// Everything the report needs for one instrument.
#[derive(Debug, Clone)]
pub struct InstrumentReport {
    pub symbol: String,
    pub direction: TradeDirection,
    /// Last price from the quote table, if any.
    pub market_price: Option<Decimal>,
    pub sizing: SizingResult,
    pub entries: usize,
    /// Even split of `max_quantity` over `entries`.
    pub shares_per_entry: u64,
    pub step_percent: Decimal,
    pub position: Position,
}

/// Resolve prices, size the trade and build its scale-in levels.
pub fn evaluate_instrument(
    inst: &InstrumentConfig,
    settings: &SizerSettings,
    quotes: &dyn PriceSource,
) -> CalcResult<InstrumentReport> {
    let symbol = inst.normalized_symbol();
    let market_price = quotes.last_price(&symbol);
    let entry = entry_price_for(quotes, &symbol, inst.entry_price)?;

    let sizer = RiskSizer::new(*settings);
    let mut ticket = TradeTicket::open(sizer, symbol.clone(), entry, inst.direction, inst.max_risk_usd)?;
    if let Some(stop) = inst.stop_price {
        let used = ticket.set_stop(BindingSource::Manual, stop);
        if used != stop {
            debug!(%symbol, requested = %stop, %used, "stop clamped into range");
        }
    }
    if let Some(tp) = inst.take_profit_price {
        let used = ticket.set_take_profit(BindingSource::Manual, tp);
        if used != tp {
            debug!(%symbol, requested = %tp, %used, "take-profit clamped into range");
        }
    }

    let sizing = ticket.evaluate()?;
    let plan = inst.level_plan().unwrap_or_else(|| suggested_plan(sizing.max_quantity, inst.entries));
    let position =
        PositionBuilder::new(settings.max_levels).build_levels(entry, inst.direction, &plan, inst.step_percent)?;

    Ok(InstrumentReport {
        symbol,
        direction: inst.direction,
        market_price,
        sizing,
        entries: inst.entries,
        shares_per_entry: suggested_shares_per_entry(sizing.max_quantity, inst.entries),
        step_percent: inst.step_percent,
        position,
    })
}
