//! Configuration parsing for the risk calculator.
//!
//! The runner reads a single JSON file. The top-level structure contains
//! logging metadata, sizer settings, an optional quote table and an
//! `instruments` array where each entry describes one trade to size.
//!
//! # Example config
//!
//! ```json
//! {
//!   "RiskCalc": { "module_name": "riskcalc", "log_path": "/tmp/log" },
//!   "sizer": { "min_tick": "0.01", "near_pct": "0.01", "far_pct": "0.20" },
//!   "quotes": { "AAPL": "187.20" },
//!   "instruments": [{
//!     "symbol": "AAPL",
//!     "direction": "long",
//!     "stop_price": "183.00",
//!     "max_risk_usd": "20",
//!     "entries": 3,
//!     "step_percent": "0.02"
//!   }]
//! }
//! ```
//!
//! Decimal fields accept either JSON strings or numbers; strings keep the
//! exact digits.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};
use crate::types::{LevelPlanEntry, TradeDirection};

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Module metadata (name, log path).
    #[serde(rename = "RiskCalc")]
    pub meta: Option<ModuleMeta>,

    /// Bound and tick policy shared by every instrument.
    #[serde(default)]
    pub sizer: SizerSettings,

    /// Last known prices by symbol, used before falling back to manual entries.
    #[serde(default)]
    pub quotes: HashMap<String, Decimal>,

    /// One entry per instrument to size.
    pub instruments: Vec<InstrumentConfig>,
}

/// Module metadata block.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleMeta {
    pub module_name: Option<String>,
    pub log_path: Option<String>,
}

impl AppConfig {
    /// Returns the module name, defaulting to `"riskcalc"`.
    pub fn module_name(&self) -> String {
        self.meta.as_ref().and_then(|m| m.module_name.clone()).unwrap_or_else(|| "riskcalc".into())
    }

    /// Returns the log path.
    pub fn log_path(&self) -> Option<String> {
        self.meta.as_ref().and_then(|m| m.log_path.clone())
    }

    /// Log directory to use: the command-line override if given, else the
    /// `log_path` of the meta block.
    pub fn effective_log_dir(&self, cli_override: Option<&str>) -> Option<String> {
        cli_override.map(str::to_owned).or_else(|| self.log_path())
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> CalcResult<()> {
        self.sizer.validate()?;

        if self.instruments.is_empty() {
            return Err(CalcError::Config("no instruments configured".into()));
        }
        for inst in &self.instruments {
            inst.validate(self.sizer.max_levels)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sizer settings
// ---------------------------------------------------------------------------

/// Tick size and the percentage band that stop/take-profit must fall in.
///
/// With the defaults a Long stop must sit 1%..20% below entry and the
/// take-profit 1%..20% above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizerSettings {
    /// Smallest representable price increment.
    #[serde(default = "default_min_tick")]
    pub min_tick: Decimal,

    /// Closest a stop or target may sit to entry, as a fraction.
    #[serde(default = "default_near_pct")]
    pub near_pct: Decimal,

    /// Farthest a stop or target may sit from entry, as a fraction.
    #[serde(default = "default_far_pct")]
    pub far_pct: Decimal,

    /// Distance used to seed a stop/target before the user edits it.
    #[serde(default = "default_target_pct")]
    pub default_target_pct: Decimal,

    /// Maximum number of entries (level 0 included) in a scale-in plan.
    #[serde(default = "default_max_levels")]
    pub max_levels: usize,
}

impl Default for SizerSettings {
    fn default() -> Self {
        Self {
            min_tick: default_min_tick(),
            near_pct: default_near_pct(),
            far_pct: default_far_pct(),
            default_target_pct: default_target_pct(),
            max_levels: default_max_levels(),
        }
    }
}

impl SizerSettings {
    pub fn validate(&self) -> CalcResult<()> {
        if self.min_tick <= Decimal::ZERO {
            return Err(CalcError::Config(format!("min_tick must be > 0, got {}", self.min_tick)));
        }
        if !(Decimal::ZERO < self.near_pct && self.near_pct < self.far_pct && self.far_pct < Decimal::ONE) {
            return Err(CalcError::Config(format!(
                "expected 0 < near_pct < far_pct < 1, got near={} far={}",
                self.near_pct, self.far_pct
            )));
        }
        if self.default_target_pct <= Decimal::ZERO || self.default_target_pct >= Decimal::ONE {
            return Err(CalcError::Config(format!(
                "default_target_pct must be in (0, 1), got {}",
                self.default_target_pct
            )));
        }
        if self.max_levels == 0 {
            return Err(CalcError::Config("max_levels must be >= 1".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Instruments
// ---------------------------------------------------------------------------

/// A single instrument to size.
///
/// Any price left out is derived: entry from the quote table, stop and
/// take-profit from the default target distance.
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentConfig {
    /// Ticker symbol (case-insensitive).
    pub symbol: String,

    #[serde(default)]
    pub direction: TradeDirection,

    /// Manual entry price, used when no quote is available.
    pub entry_price: Option<Decimal>,

    pub stop_price: Option<Decimal>,

    pub take_profit_price: Option<Decimal>,

    /// Budget lost if the stop is hit (default: 20).
    #[serde(default = "default_max_risk_usd")]
    pub max_risk_usd: Decimal,

    /// Total entries including the initial one (default: 1).
    #[serde(default = "default_entries")]
    pub entries: usize,

    /// Price move between scale-in levels, as a fraction (default: 0.02).
    #[serde(default = "default_step_percent")]
    pub step_percent: Decimal,

    /// Explicit shares per scale-in level (length `entries - 1`). When
    /// absent, the max quantity is split evenly.
    pub level_quantities: Option<Vec<u64>>,
}

impl InstrumentConfig {
    /// Upper-cased symbol as used for quote lookups.
    pub fn normalized_symbol(&self) -> String {
        self.symbol.trim().to_uppercase()
    }

    /// Explicit level plan, if one was configured.
    pub fn level_plan(&self) -> Option<Vec<LevelPlanEntry>> {
        self.level_quantities.as_ref().map(|q| q.iter().copied().map(LevelPlanEntry::from).collect())
    }

    fn validate(&self, max_levels: usize) -> CalcResult<()> {
        let sym = self.normalized_symbol();
        if sym.is_empty() {
            return Err(CalcError::Config("instrument with empty symbol".into()));
        }
        if self.entries == 0 || self.entries > max_levels {
            return Err(CalcError::Config(format!(
                "{sym}: entries must be in 1..={max_levels}, got {}",
                self.entries
            )));
        }
        if let Some(q) = &self.level_quantities {
            if q.len() != self.entries - 1 {
                return Err(CalcError::Config(format!(
                    "{sym}: level_quantities has {} item(s), expected {}",
                    q.len(),
                    self.entries - 1
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Default helpers (used by serde)
// ---------------------------------------------------------------------------

fn default_min_tick() -> Decimal {
    dec!(0.01)
}

fn default_near_pct() -> Decimal {
    dec!(0.01)
}

fn default_far_pct() -> Decimal {
    dec!(0.20)
}

fn default_target_pct() -> Decimal {
    dec!(0.02)
}

fn default_max_levels() -> usize {
    10
}

fn default_max_risk_usd() -> Decimal {
    dec!(20)
}

fn default_entries() -> usize {
    1
}

fn default_step_percent() -> Decimal {
    dec!(0.02)
}

/// Parse a JSON config string and validate it.
pub fn parse_config(content: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load, parse and validate a JSON config file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "RiskCalc": { "module_name": "calc", "log_path": "/tmp/log" },
        "quotes": { "AAPL": "187.20", "GOOG": 141 },
        "instruments": [
            { "symbol": "aapl", "direction": "long", "stop_price": "183.00", "entries": 3 },
            { "symbol": "TSLA", "direction": "sell", "entry_price": "250", "level_quantities": [] }
        ]
    }"#;

    #[test]
    fn parse_sample_with_defaults() {
        let cfg = parse_config(SAMPLE).unwrap();
        assert_eq!(cfg.module_name(), "calc");
        assert_eq!(cfg.log_path().as_deref(), Some("/tmp/log"));
        assert_eq!(cfg.sizer, SizerSettings::default());
        assert_eq!(cfg.quotes["AAPL"], dec!(187.20));
        assert_eq!(cfg.quotes["GOOG"], dec!(141));

        let aapl = &cfg.instruments[0];
        assert_eq!(aapl.normalized_symbol(), "AAPL");
        assert_eq!(aapl.direction, TradeDirection::Long);
        assert_eq!(aapl.stop_price, Some(dec!(183.00)));
        assert_eq!(aapl.max_risk_usd, dec!(20));
        assert_eq!(aapl.step_percent, dec!(0.02));
        assert!(aapl.level_plan().is_none());

        let tsla = &cfg.instruments[1];
        assert_eq!(tsla.direction, TradeDirection::Short);
        assert_eq!(tsla.entries, 1);
        assert_eq!(tsla.level_plan(), Some(vec![]));
    }

    #[test]
    fn module_name_defaults() {
        let cfg = parse_config(r#"{ "instruments": [{ "symbol": "X" }] }"#).unwrap();
        assert_eq!(cfg.module_name(), "riskcalc");
        assert!(cfg.log_path().is_none());
        assert!(cfg.effective_log_dir(None).is_none());
    }

    #[test]
    fn log_dir_override_beats_meta_block() {
        let cfg = parse_config(SAMPLE).unwrap();
        assert_eq!(cfg.effective_log_dir(None).as_deref(), Some("/tmp/log"));
        assert_eq!(cfg.effective_log_dir(Some("/var/log/calc")).as_deref(), Some("/var/log/calc"));
    }

    #[test]
    fn rejects_empty_instruments() {
        let err = parse_config(r#"{ "instruments": [] }"#).unwrap_err();
        assert!(err.to_string().contains("no instruments"));
    }

    #[test]
    fn rejects_plan_length_mismatch() {
        let err =
            parse_config(r#"{ "instruments": [{ "symbol": "X", "entries": 3, "level_quantities": [5] }] }"#).unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn rejects_entries_out_of_range() {
        assert!(parse_config(r#"{ "instruments": [{ "symbol": "X", "entries": 0 }] }"#).is_err());
        assert!(parse_config(r#"{ "instruments": [{ "symbol": "X", "entries": 11 }] }"#).is_err());
    }

    #[test]
    fn rejects_inverted_band() {
        let err = parse_config(
            r#"{ "sizer": { "near_pct": "0.3", "far_pct": "0.2" }, "instruments": [{ "symbol": "X" }] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("near_pct"));
    }

    #[test]
    fn rejects_blank_symbol() {
        assert!(parse_config(r#"{ "instruments": [{ "symbol": "  " }] }"#).is_err());
    }
}
