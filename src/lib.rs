//! Dashboard Filters Library
//!
//! Cross-filtering state for event-management dashboards: a category filter
//! store that rescales sibling cards, and a timeline range store that
//! rescales every card to the selected weeks.

pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod helpers;
pub mod states;
