//! State Management Layer
//!
//! Filter stores shared by the cards of a dashboard. Each store owns a
//! disjoint slice of filter state and publishes an event after every change:
//!
//! ```text
//! View Action → Store Method → State Update → publish → View Refresh
//! ```

mod category_filter;
mod context;
mod range_filter;
mod timeline;

pub use category_filter::*;
pub use context::*;
pub use range_filter::*;
pub use timeline::*;
