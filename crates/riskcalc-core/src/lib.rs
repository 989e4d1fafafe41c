//! # riskcalc-core
//!
//! Core crate for the trade risk calculator, providing:
//!
//! - **Types** (`types`): trade direction, price bounds, sizing results, scale-in levels
//! - **Risk sizing** (`sizer`): stop/take-profit ranges and max share count for a risk budget
//! - **Position building** (`builder`): scale-in levels with running weighted-average entry
//! - **Session state** (`session`): caller-owned ticket with single-source bound values
//! - **Quotes** (`quote`): `PriceSource` trait and entry-price fallback
//! - **Configuration** (`config`): JSON config deserialization and validation
//! - **Error types** (`error`): `CalcError` via thiserror
//! - **Logging** (`logging`): tracing-based structured logging
//!
//! Everything except `config::load_config` and `logging` is pure: no I/O and
//! no shared state, so instruments can be evaluated independently.

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod quote;
pub mod session;
pub mod sizer;
pub mod types;

pub use builder::PositionBuilder;
pub use error::{CalcError, CalcResult};
pub use sizer::RiskSizer;
// Re-export types at crate root for convenience.
pub use types::*;
