//! Market price lookup and the entry-price fallback rule.
//!
//! Quote retrieval itself lives outside the calculator; anything that can
//! answer "what is the last price of X" implements [`PriceSource`]. A source
//! signals failure by returning `None` or a non-positive price, and the
//! caller then falls back to a manually entered price via
//! [`resolve_entry_price`]. Zero is never accepted as an entry price.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{CalcError, CalcResult};

/// Anything that can report a last traded price for a symbol.
pub trait PriceSource {
    /// Last price for `symbol`, or `None` if unavailable.
    fn last_price(&self, symbol: &str) -> Option<Decimal>;
}

/// Fixed symbol → price table, typically loaded from the config file.
///
/// Symbols are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct StaticQuotes {
    prices: HashMap<String, Decimal>,
}

impl StaticQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: &str, price: Decimal) {
        self.prices.insert(symbol.trim().to_uppercase(), price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl From<&HashMap<String, Decimal>> for StaticQuotes {
    fn from(map: &HashMap<String, Decimal>) -> Self {
        let mut quotes = Self::new();
        for (symbol, price) in map {
            quotes.insert(symbol, *price);
        }
        quotes
    }
}

impl PriceSource for StaticQuotes {
    fn last_price(&self, symbol: &str) -> Option<Decimal> {
        self.prices.get(&symbol.trim().to_uppercase()).copied()
    }
}

/// Pick the entry price: a positive quote wins, else a positive manual price.
pub fn resolve_entry_price(symbol: &str, quote: Option<Decimal>, manual: Option<Decimal>) -> CalcResult<Decimal> {
    match quote {
        Some(q) if q > Decimal::ZERO => {
            debug!(symbol, price = %q, "entry from quote");
            return Ok(q);
        }
        Some(q) => warn!(symbol, price = %q, "ignoring non-positive quote"),
        None => debug!(symbol, "no quote available"),
    }

    match manual {
        Some(m) if m > Decimal::ZERO => {
            debug!(symbol, price = %m, "entry from manual price");
            Ok(m)
        }
        _ => Err(CalcError::PriceUnavailable(symbol.to_string())),
    }
}

/// Look up `symbol` in `source` and apply [`resolve_entry_price`].
pub fn entry_price_for(source: &dyn PriceSource, symbol: &str, manual: Option<Decimal>) -> CalcResult<Decimal> {
    resolve_entry_price(symbol, source.last_price(symbol), manual)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn quote_wins_over_manual() {
        assert_eq!(resolve_entry_price("AAPL", Some(dec!(187.2)), Some(dec!(180))), Ok(dec!(187.2)));
    }

    #[test]
    fn zero_quote_falls_back_to_manual() {
        assert_eq!(resolve_entry_price("AAPL", Some(Decimal::ZERO), Some(dec!(180))), Ok(dec!(180)));
        assert_eq!(resolve_entry_price("AAPL", None, Some(dec!(180))), Ok(dec!(180)));
    }

    #[test]
    fn nothing_usable() {
        assert_eq!(
            resolve_entry_price("AAPL", Some(Decimal::ZERO), Some(Decimal::ZERO)),
            Err(CalcError::PriceUnavailable("AAPL".into()))
        );
        assert!(resolve_entry_price("AAPL", None, None).is_err());
    }

    #[test]
    fn static_quotes_case_insensitive() {
        let mut map = HashMap::new();
        map.insert("aapl".to_string(), dec!(187.2));
        let quotes = StaticQuotes::from(&map);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes.last_price("AAPL"), Some(dec!(187.2)));
        assert_eq!(quotes.last_price(" aApl "), Some(dec!(187.2)));
        assert_eq!(quotes.last_price("GOOG"), None);
        assert_eq!(entry_price_for(&quotes, "GOOG", Some(dec!(140))), Ok(dec!(140)));
    }
}
