//! Eventing - Store change notifications
//!
//! ```text
//! View Action → Store Method → State Update → publish → Subscribers → View Refresh
//! ```

mod filter_event;
mod subscribers;

pub use filter_event::*;
pub use subscribers::*;
