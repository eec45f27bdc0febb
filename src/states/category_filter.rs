//! Category Filter Store
//!
//! Tracks which categories are selected across independent cards and answers
//! the queries cards need to dim their own items or rescale their totals.

use crate::constants::DEFAULT_SELECTION_RATIO;
use crate::domain::{CategorySelection, GroupId, ValidationPolicy};
use crate::error::{InvalidRatioSnafu, Result};
use crate::eventing::{CategoryFilterEvent, Subscribers, SubscriptionId};
use crate::helpers::{clamp_unit, is_unit, mean};
use ahash::AHashMap;
use crossbeam_channel::Receiver;
use tracing::{debug, warn};

/// Category filter state shared by every card of a dashboard
#[derive(Debug, Default)]
pub struct CategoryFilterStore {
    /// Active selections in insertion order
    selections: Vec<CategorySelection>,
    /// Handling of ratios outside `[0, 1]`
    ratio_policy: ValidationPolicy,
    /// Change observers
    subscribers: Subscribers<CategoryFilterEvent>,
}

impl CategoryFilterStore {
    /// Create an empty store with the default validation policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with an explicit ratio policy
    pub fn with_policy(ratio_policy: ValidationPolicy) -> Self {
        Self {
            ratio_policy,
            ..Self::default()
        }
    }

    // ==================== Getters ====================

    /// Policy applied to incoming ratios
    pub fn policy(&self) -> ValidationPolicy {
        self.ratio_policy
    }

    /// All selections in insertion order
    pub fn selections(&self) -> &[CategorySelection] {
        &self.selections
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Whether `(group_id, category_name)` is selected
    pub fn is_item_selected(&self, group_id: &str, category_name: &str) -> bool {
        self.selections
            .iter()
            .any(|s| s.group_id.as_str() == group_id && s.category_name == category_name)
    }

    /// Whether the card has any selection
    pub fn is_group_filtered(&self, group_id: &str) -> bool {
        self.selections.iter().any(|s| s.group_id.as_str() == group_id)
    }

    /// Selections of one card in insertion order
    pub fn group_filters(&self, group_id: &str) -> Vec<&CategorySelection> {
        self.selections
            .iter()
            .filter(|s| s.group_id.as_str() == group_id)
            .collect()
    }

    /// Every selected category name across cards
    ///
    /// The same name selected in two cards appears twice.
    pub fn selected_names(&self) -> Vec<&str> {
        self.selections.iter().map(|s| s.category_name.as_str()).collect()
    }

    /// Distinct cards with at least one selection, in first-selection order
    pub fn filtered_groups(&self) -> Vec<&GroupId> {
        let mut groups: Vec<&GroupId> = Vec::new();
        for selection in &self.selections {
            if !groups.contains(&&selection.group_id) {
                groups.push(&selection.group_id);
            }
        }
        groups
    }

    /// Sum of a card's selection ratios, clamped into `[0, 1]`
    ///
    /// Returns 1 for an unfiltered card.
    pub fn group_ratio(&self, group_id: &str) -> f64 {
        let filters = self.group_filters(group_id);
        if filters.is_empty() {
            return 1.0;
        }
        clamp_unit(filters.iter().map(|s| s.ratio).sum::<f64>())
    }

    /// Scaling factor a card should apply given the filters of every other card
    ///
    /// Ratios are summed per card and clamped into `[0, 1]`; the result is the
    /// mean of those per-card sums, or 1 when no other card is filtered.
    pub fn cross_group_ratio(&self, exclude_group_id: &str) -> f64 {
        let mut sums: AHashMap<&str, f64> = AHashMap::new();
        for selection in &self.selections {
            let group = selection.group_id.as_str();
            if group == exclude_group_id {
                continue;
            }
            *sums.entry(group).or_insert(0.0) += selection.ratio;
        }

        mean(sums.into_values().map(clamp_unit)).unwrap_or(1.0)
    }

    // ==================== Setters ====================

    /// Select a category, or deselect it if already selected
    ///
    /// Returns whether the category is selected after the call. Under
    /// [`ValidationPolicy::Reject`] a ratio outside `[0, 1]` fails and the
    /// store is left unchanged.
    pub fn toggle_filter(
        &mut self,
        group_id: impl Into<GroupId>,
        category_name: impl Into<String>,
        color: impl Into<String>,
        ratio: f64,
    ) -> Result<bool> {
        let group_id = group_id.into();
        let category_name = category_name.into();

        if let Some(pos) = self
            .selections
            .iter()
            .position(|s| s.matches(&group_id, &category_name))
        {
            self.selections.remove(pos);
            debug!(group = %group_id, category = %category_name, "Category deselected");
            self.subscribers.publish(&CategoryFilterEvent::Toggled {
                group_id,
                category_name,
                selected: false,
            });
            return Ok(false);
        }

        let ratio = self.accept_ratio(ratio)?;
        self.selections.push(CategorySelection {
            group_id: group_id.clone(),
            category_name: category_name.clone(),
            display_color: color.into(),
            ratio,
        });
        debug!(group = %group_id, category = %category_name, ratio, "Category selected");
        self.subscribers.publish(&CategoryFilterEvent::Toggled {
            group_id,
            category_name,
            selected: true,
        });
        Ok(true)
    }

    /// [`Self::toggle_filter`] with the whole card as ratio
    pub fn toggle_filter_default(
        &mut self,
        group_id: impl Into<GroupId>,
        category_name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<bool> {
        self.toggle_filter(group_id, category_name, color, DEFAULT_SELECTION_RATIO)
    }

    /// Remove every selection; returns how many were removed
    pub fn clear_filter(&mut self) -> usize {
        let removed = self.selections.len();
        if removed == 0 {
            return 0;
        }
        self.selections.clear();
        debug!(removed, "All category filters cleared");
        self.subscribers.publish(&CategoryFilterEvent::Cleared {
            group_id: None,
            removed,
        });
        removed
    }

    /// Remove the selections of one card; returns how many were removed
    pub fn clear_group_filters(&mut self, group_id: &str) -> usize {
        let before = self.selections.len();
        self.selections.retain(|s| s.group_id.as_str() != group_id);
        let removed = before - self.selections.len();
        if removed == 0 {
            return 0;
        }
        debug!(group = group_id, removed, "Group filters cleared");
        self.subscribers.publish(&CategoryFilterEvent::Cleared {
            group_id: Some(GroupId::from(group_id)),
            removed,
        });
        removed
    }

    fn accept_ratio(&self, ratio: f64) -> Result<f64> {
        if is_unit(ratio) {
            return Ok(ratio);
        }
        match self.ratio_policy {
            ValidationPolicy::Permissive => Ok(ratio),
            ValidationPolicy::Clamp => {
                let clamped = clamp_unit(ratio);
                warn!(ratio, clamped, "Selection ratio outside [0, 1], clamping");
                Ok(clamped)
            }
            ValidationPolicy::Reject => InvalidRatioSnafu { ratio }.fail(),
        }
    }

    // ==================== Subscriptions ====================

    /// Register a change callback
    pub fn subscribe(&mut self, callback: impl FnMut(&CategoryFilterEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Remove a change callback
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Receive change events through a channel
    pub fn subscribe_channel(&mut self) -> Receiver<CategoryFilterEvent> {
        self.subscribers.subscribe_channel()
    }
}
