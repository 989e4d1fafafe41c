//! Scale-in position builder.
//!
//! Models adding to a position as price moves against it: each level sits a
//! fixed percentage beyond the previous one (compounded, not measured from
//! the initial price), and the weighted-average entry is tracked after every
//! level with running sums, so a plan of N levels costs O(N).

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{CalcError, CalcResult, ensure_positive};
use crate::types::{EntryLevel, LevelPlanEntry, Position, TradeDirection};

/// Builds [`Position`]s from a level plan.
#[derive(Debug, Clone, Copy)]
pub struct PositionBuilder {
    max_levels: usize,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self { max_levels: 10 }
    }
}

impl PositionBuilder {
    /// `max_levels` counts level 0, so a plan may hold `max_levels - 1` items.
    pub fn new(max_levels: usize) -> Self {
        Self { max_levels: max_levels.max(1) }
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Compute levels `0..=plan.len()`.
    ///
    /// Level 0 is the initial entry: it carries no shares and its average is
    /// the initial price. Level `i` is priced at `price[i-1]·(1 ∓ step)` and
    /// adds `plan[i-1].quantity` shares; its average is the quantity-weighted
    /// mean over levels `1..=i`.
    ///
    /// # Errors
    ///
    /// - [`CalcError::InvalidPrice`] if `initial_price <= 0`
    /// - [`CalcError::InvalidStep`] if `step_percent` is not in `(0, 1)`
    /// - [`CalcError::InvalidQuantity`] for a zero-share level
    /// - [`CalcError::TooManyLevels`] if the plan exceeds `max_levels`
    /// - [`CalcError::Overflow`] if the share total leaves `u64` or a level
    ///   cost leaves the decimal range
    pub fn build_levels(
        &self,
        initial_price: Decimal,
        direction: TradeDirection,
        level_plan: &[LevelPlanEntry],
        step_percent: Decimal,
    ) -> CalcResult<Position> {
        let initial_price = ensure_positive("initial_price", initial_price)?;
        if step_percent <= Decimal::ZERO || step_percent >= Decimal::ONE {
            return Err(CalcError::InvalidStep(step_percent));
        }
        if level_plan.len() + 1 > self.max_levels {
            return Err(CalcError::TooManyLevels { requested: level_plan.len() + 1, max: self.max_levels });
        }
        if let Some(idx) = level_plan.iter().position(|e| e.quantity == 0) {
            return Err(CalcError::InvalidQuantity { level: idx + 1 });
        }

        let factor = direction.adverse_factor(step_percent);

        let mut levels = Vec::with_capacity(level_plan.len() + 1);
        levels.push(EntryLevel {
            level: 0,
            price: initial_price,
            quantity_at_level: 0,
            cumulative_quantity: 0,
            weighted_average_price: initial_price,
        });

        let mut price = initial_price;
        let mut cumulative: u64 = 0;
        let mut weighted_sum = Decimal::ZERO;

        for (idx, entry) in level_plan.iter().enumerate() {
            price = price.checked_mul(factor).ok_or(CalcError::Overflow("level price"))?;
            cumulative = cumulative.checked_add(entry.quantity).ok_or(CalcError::Overflow("cumulative quantity"))?;
            weighted_sum = price
                .checked_mul(Decimal::from(entry.quantity))
                .and_then(|cost| weighted_sum.checked_add(cost))
                .ok_or(CalcError::Overflow("weighted sum"))?;
            let weighted_average_price = weighted_sum
                .checked_div(Decimal::from(cumulative))
                .ok_or(CalcError::Overflow("weighted average"))?;

            levels.push(EntryLevel {
                level: idx + 1,
                price,
                quantity_at_level: entry.quantity,
                cumulative_quantity: cumulative,
                weighted_average_price,
            });
        }

        debug!(
            %initial_price,
            %direction,
            %step_percent,
            levels = levels.len(),
            total_quantity = cumulative,
            "built scale-in position"
        );
        Ok(Position::from_levels(levels))
    }
}
