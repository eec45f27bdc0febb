//! Selection - Category filter entries

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier of an independently filterable card
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct GroupId(pub Arc<str>);

impl GroupId {
    /// Create a new GroupId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One active category filter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategorySelection {
    /// Card the selection belongs to
    pub group_id: GroupId,
    /// Selected category label within the card
    pub category_name: String,
    /// Render color, passed through untouched
    pub display_color: String,
    /// Share of the card total this category represented when selected
    pub ratio: f64,
}

impl CategorySelection {
    /// Whether this entry is keyed by `(group_id, category_name)`
    pub fn matches(&self, group_id: &GroupId, category_name: &str) -> bool {
        self.group_id == *group_id && self.category_name == category_name
    }
}

/// How a card should render one of its items given the active filters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemEmphasis {
    /// No filter applies to the item's card
    Normal,
    /// The item itself is selected
    Selected,
    /// The card is filtered and this item is not part of the selection
    Dimmed,
}
