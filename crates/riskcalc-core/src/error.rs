//! Typed error definitions for the risk calculator.
//!
//! Provides [`CalcError`] for input-validation failures that are more
//! informative than plain `anyhow::Error` strings. All variants implement
//! `std::error::Error` via `thiserror`, so they integrate seamlessly with
//! `anyhow::Result` in the runner.
//!
//! Degenerate inputs (zero stop distance, empty risk budget, empty level plan)
//! are *not* errors: the sizer and builder return neutral results for them.

use rust_decimal::Decimal;
use thiserror::Error;

/// Precondition violations reported by the sizing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A price that must be strictly positive was zero or negative.
    #[error("invalid {field}: {value} (must be > 0)")]
    InvalidPrice { field: &'static str, value: Decimal },

    /// Scale-in step percentage outside the open interval (0, 1).
    #[error("invalid step percent: {0} (must be in (0, 1))")]
    InvalidStep(Decimal),

    /// A level plan entry carried zero shares. `level` is 1-based.
    #[error("invalid quantity at level {level}: must be > 0")]
    InvalidQuantity { level: usize },

    /// The level plan asks for more entries than the builder allows.
    #[error("too many entry levels: {requested} (max {max})")]
    TooManyLevels { requested: usize, max: usize },

    /// An intermediate amount left the representable range. Carries the
    /// quantity being computed.
    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),

    /// Neither a market quote nor a manual entry price is usable.
    #[error("no usable entry price for {0}")]
    PriceUnavailable(String),

    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience alias used across the core crate.
pub type CalcResult<T> = Result<T, CalcError>;

/// Reject a non-positive price with [`CalcError::InvalidPrice`].
pub(crate) fn ensure_positive(field: &'static str, value: Decimal) -> CalcResult<Decimal> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(CalcError::InvalidPrice { field, value })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn positive_passes_through() {
        assert_eq!(ensure_positive("entry_price", dec!(1.5)), Ok(dec!(1.5)));
    }

    #[test]
    fn zero_and_negative_rejected() {
        assert_eq!(
            ensure_positive("stop_price", Decimal::ZERO),
            Err(CalcError::InvalidPrice { field: "stop_price", value: Decimal::ZERO })
        );
        assert!(ensure_positive("stop_price", dec!(-3)).is_err());
    }

    #[test]
    fn messages_name_the_field() {
        let err = CalcError::InvalidPrice { field: "entry_price", value: dec!(-1) };
        assert_eq!(err.to_string(), "invalid entry_price: -1 (must be > 0)");
        assert_eq!(CalcError::InvalidQuantity { level: 2 }.to_string(), "invalid quantity at level 2: must be > 0");
        assert_eq!(CalcError::Overflow("max_quantity").to_string(), "arithmetic overflow computing max_quantity");
    }
}
