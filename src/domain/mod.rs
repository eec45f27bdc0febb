//! Domain - Pure Data Structures
//!
//! These types carry no store logic and represent the filtering domain.

pub mod bucket;
pub mod config;
pub mod selection;

pub use bucket::*;
pub use config::*;
pub use selection::*;
