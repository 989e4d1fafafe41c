//! Core data types and enums shared by the sizer, the position builder and
//! the caller-owned session state.

pub mod enums;
pub mod position;
pub mod trading;

pub use enums::*;
pub use position::*;
pub use trading::*;
