//! Filter Events
//!
//! Events published by the filter stores after each state change.

use crate::domain::{DragHandle, GroupId};

/// Published by [`crate::states::CategoryFilterStore`]
#[derive(Clone, Debug, PartialEq)]
pub enum CategoryFilterEvent {
    /// A category was added to or removed from the selection
    Toggled {
        /// Card the category belongs to
        group_id: GroupId,
        /// Toggled category label
        category_name: String,
        /// Whether the category is selected after the toggle
        selected: bool,
    },

    /// Selections were removed in bulk
    Cleared {
        /// Card that was cleared, `None` when every card was
        group_id: Option<GroupId>,
        /// Number of selections removed
        removed: usize,
    },
}

/// Published by [`crate::states::RangeFilterStore`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RangeFilterEvent {
    /// Range bounds or the active flag changed
    RangeChanged {
        start: usize,
        end: usize,
        active: bool,
    },

    /// A slider drag started, switched handle or ended
    DragChanged {
        dragging: bool,
        handle: Option<DragHandle>,
    },
}
