//! Plain-text rendering of instrument reports.
//!
//! Formatting lives here and only here: the core hands back exact decimals,
//! the report rounds them to cents for display.

use std::fmt;

use rust_decimal::Decimal;

use crate::evaluate::InstrumentReport;

/// Format a price as `$123.45`.
pub fn format_price(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}

/// Format a fraction as a percentage, e.g. `0.02` -> `2.00%`.
pub fn format_pct(fraction: Decimal) -> String {
    format!("{:.2}%", (fraction * Decimal::ONE_HUNDRED).round_dp(2))
}

impl fmt::Display for InstrumentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.sizing;

        writeln!(f, "=== {} ({}) ===", self.symbol, self.direction)?;
        match self.market_price {
            Some(p) => writeln!(f, "market price:      {}", format_price(p))?,
            None => writeln!(f, "market price:      unavailable")?,
        }
        writeln!(f, "entry price:       {}", format_price(s.entry_price))?;
        writeln!(
            f,
            "stop loss:         {}  (range {} .. {})",
            format_price(s.stop_price),
            format_price(s.bounds.stop.min),
            format_price(s.bounds.stop.max)
        )?;
        writeln!(
            f,
            "take profit:       {}  (range {} .. {})",
            format_price(s.take_profit_price),
            format_price(s.bounds.take_profit.min),
            format_price(s.bounds.take_profit.max)
        )?;
        writeln!(f, "risk per share:    {}", format_price(s.risk_per_share))?;
        writeln!(f, "max shares:        {}", s.max_quantity)?;
        if let Some(rr) = s.reward_to_risk() {
            writeln!(f, "reward/risk:       {:.2}", rr.round_dp(2))?;
        }

        if self.entries > 1 {
            writeln!(
                f,
                "scale-in:          {} entries, ~{} shares each, {} between levels",
                self.entries,
                self.shares_per_entry,
                format_pct(self.step_percent)
            )?;
        }

        if self.position.len() > 1 {
            writeln!(f, "{:>5}  {:>12}  {:>6}  {:>8}  {:>12}", "level", "price", "added", "total", "average")?;
            for level in &self.position {
                writeln!(
                    f,
                    "{:>5}  {:>12}  {:>6}  {:>8}  {:>12}",
                    level.level,
                    format_price(level.price),
                    level.quantity_at_level,
                    level.cumulative_quantity,
                    format_price(level.weighted_average_price)
                )?;
            }
        }
        Ok(())
    }
}
