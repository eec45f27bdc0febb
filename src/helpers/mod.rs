//! Helper Utilities
//!
//! Ratio arithmetic, date bucketing and config directory lookup.

mod dates;
mod fs;
mod ratio;

pub use dates::*;
pub use fs::*;
pub use ratio::*;
