//! Scale-in position structures: the per-level plan and the computed levels.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shares added at one scale-in level (level 1 onwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPlanEntry {
    pub quantity: u64,
}

impl LevelPlanEntry {
    pub fn new(quantity: u64) -> Self {
        Self { quantity }
    }
}

impl From<u64> for LevelPlanEntry {
    fn from(quantity: u64) -> Self {
        Self { quantity }
    }
}

/// One computed row of a scale-in position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLevel {
    /// 0 for the initial entry, then 1, 2, ...
    pub level: usize,
    pub price: Decimal,
    /// Shares added at this level (always 0 for level 0).
    pub quantity_at_level: u64,
    pub cumulative_quantity: u64,
    pub weighted_average_price: Decimal,
}

/// Ordered levels `0..=N` of a scale-in plan.
///
/// Level 0 anchors the sequence at the initial price with no shares; every
/// following level adds its planned quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    levels: Vec<EntryLevel>,
}

impl Position {
    pub(crate) fn from_levels(levels: Vec<EntryLevel>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[EntryLevel] {
        &self.levels
    }

    pub fn last(&self) -> Option<&EntryLevel> {
        self.levels.last()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Total shares across all levels.
    pub fn total_quantity(&self) -> u64 {
        self.last().map_or(0, |l| l.cumulative_quantity)
    }

    /// Weighted-average entry after the final level.
    pub fn average_price(&self) -> Option<Decimal> {
        self.last().map(|l| l.weighted_average_price)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntryLevel> {
        self.levels.iter()
    }
}

impl<'a> IntoIterator for &'a Position {
    type Item = &'a EntryLevel;
    type IntoIter = std::slice::Iter<'a, EntryLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

impl std::fmt::Display for EntryLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "L{} price={} +{} cum={} avg={}",
            self.level, self.price, self.quantity_at_level, self.cumulative_quantity, self.weighted_average_price
        )
    }
}
