//! Filter Context
//!
//! Owns one instance of each filter store for a dashboard and derives the
//! display values cards render. The stores stay independent; this is where
//! they are composed.

use crate::domain::{Breakdown, FilterConfig, ItemEmphasis};
use crate::error::Result;
use crate::helpers::scale_count;
use crate::states::{CategoryFilterStore, RangeFilterStore};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Filter state for one dashboard, passed down to its cards
#[derive(Debug)]
pub struct FilterContext {
    categories: CategoryFilterStore,
    range: RangeFilterStore,
}

/// Point-in-time summary of both stores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSnapshot {
    pub selections: usize,
    pub filtered_groups: Vec<String>,
    pub range_start: usize,
    pub range_end: usize,
    pub range_active: bool,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub total_registrations: u64,
    pub selection_ratio: f64,
    pub breakdown: Breakdown,
}

impl FilterContext {
    /// Build both stores from configuration
    pub fn new(config: &FilterConfig) -> Result<Self> {
        let categories = CategoryFilterStore::with_policy(config.validation.ratio);
        let range = RangeFilterStore::generate(&config.timeline, config.validation.range)?;
        info!(
            ratio_policy = ?config.validation.ratio,
            range_policy = ?config.validation.range,
            "Filter context created"
        );
        Ok(Self { categories, range })
    }

    /// Compose already constructed stores
    pub fn from_parts(categories: CategoryFilterStore, range: RangeFilterStore) -> Self {
        Self { categories, range }
    }

    pub fn categories(&self) -> &CategoryFilterStore {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CategoryFilterStore {
        &mut self.categories
    }

    pub fn range(&self) -> &RangeFilterStore {
        &self.range
    }

    pub fn range_mut(&mut self) -> &mut RangeFilterStore {
        &mut self.range
    }

    /// Factor a card applies to its raw metrics
    pub fn display_scale(&self, group_id: &str) -> f64 {
        self.categories.cross_group_ratio(group_id) * self.range.selection_ratio()
    }

    /// A card's raw count after cross-filtering and the timeline range
    pub fn scaled_value(&self, group_id: &str, raw: u64) -> u64 {
        scale_count(raw, self.display_scale(group_id))
    }

    /// How a card renders one of its items
    pub fn item_emphasis(&self, group_id: &str, category_name: &str) -> ItemEmphasis {
        if self.categories.is_item_selected(group_id, category_name) {
            ItemEmphasis::Selected
        } else if self.categories.is_group_filtered(group_id) {
            ItemEmphasis::Dimmed
        } else {
            ItemEmphasis::Normal
        }
    }

    /// Clear every category filter and reset the range
    pub fn reset(&mut self) {
        self.categories.clear_filter();
        self.range.reset_range();
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        let (date_from, date_to) = self.range.date_range();
        FilterSnapshot {
            selections: self.categories.len(),
            filtered_groups: self
                .categories
                .filtered_groups()
                .iter()
                .map(|g| g.to_string())
                .collect(),
            range_start: self.range.start(),
            range_end: self.range.end(),
            range_active: self.range.is_active(),
            date_from,
            date_to,
            total_registrations: self.range.total_registrations(),
            selection_ratio: self.range.selection_ratio(),
            breakdown: self.range.breakdown_totals(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TimeBucket, ValidationPolicy};
    use approx::assert_abs_diff_eq;
    use chrono::Days;

    fn context() -> FilterContext {
        let day0 = NaiveDate::from_ymd_opt(2025, 1, 6).expect("date");
        let weeks = (0..10)
            .map(|index| {
                let start_date = day0 + Days::new(7 * index as u64);
                TimeBucket {
                    index,
                    start_date,
                    end_date: start_date + Days::new(6),
                    count: 10,
                    breakdown: Breakdown::new(),
                }
            })
            .collect();
        let range = RangeFilterStore::from_buckets(weeks, ValidationPolicy::Clamp).expect("range");
        FilterContext::from_parts(CategoryFilterStore::new(), range)
    }

    #[test]
    fn unfiltered_values_pass_through() {
        let ctx = context();
        assert_eq!(ctx.display_scale("cardA"), 1.0);
        assert_eq!(ctx.scaled_value("cardA", 250), 250);
        assert_eq!(ctx.item_emphasis("cardA", "Gold"), ItemEmphasis::Normal);
    }

    #[test]
    fn scale_composes_cross_ratio_and_range() {
        let mut ctx = context();
        ctx.categories_mut()
            .toggle_filter("cardA", "Gold", "#fff", 0.4)
            .expect("toggle");
        ctx.categories_mut()
            .toggle_filter("cardB", "Silver", "#000", 0.6)
            .expect("toggle");
        ctx.range_mut().set_range(0, 4).expect("set range");

        assert_abs_diff_eq!(ctx.display_scale("cardC"), 0.25, epsilon = 1e-12);
        assert_eq!(ctx.scaled_value("cardC", 1000), 250);
        // cardA only sees cardB's filter
        assert_eq!(ctx.scaled_value("cardA", 1000), 300);
    }

    #[test]
    fn emphasis_dims_unselected_items() {
        let mut ctx = context();
        ctx.categories_mut()
            .toggle_filter("cardA", "Gold", "#fff", 0.4)
            .expect("toggle");

        assert_eq!(ctx.item_emphasis("cardA", "Gold"), ItemEmphasis::Selected);
        assert_eq!(ctx.item_emphasis("cardA", "Silver"), ItemEmphasis::Dimmed);
        assert_eq!(ctx.item_emphasis("cardB", "Silver"), ItemEmphasis::Normal);
    }

    #[test]
    fn reset_clears_both_stores() {
        let mut ctx = context();
        ctx.categories_mut()
            .toggle_filter("cardA", "Gold", "#fff", 0.4)
            .expect("toggle");
        ctx.range_mut().set_range(2, 3).expect("set range");

        ctx.reset();

        let snapshot = ctx.snapshot();
        assert_eq!(snapshot.selections, 0);
        assert_eq!((snapshot.range_start, snapshot.range_end), (0, 9));
        assert!(!snapshot.range_active);
        assert_eq!(snapshot.total_registrations, 100);
    }

    #[test]
    fn independent_contexts_do_not_share_state() {
        let mut a = context();
        let b = context();
        a.categories_mut()
            .toggle_filter("cardA", "Gold", "#fff", 0.4)
            .expect("toggle");
        assert!(a.categories().is_group_filtered("cardA"));
        assert!(!b.categories().is_group_filtered("cardA"));
    }

    #[test]
    fn built_from_config() {
        let mut config = FilterConfig::default();
        config.timeline.seed = Some(11);
        config.validation.range = ValidationPolicy::Reject;

        let mut ctx = FilterContext::new(&config).expect("context");
        assert_eq!(ctx.range().policy(), ValidationPolicy::Reject);
        assert!(ctx.range_mut().set_range(5, 2).is_err());

        let json = serde_json::to_string(&ctx.snapshot()).expect("json");
        assert!(json.contains("\"range_active\":false"));
    }
}
