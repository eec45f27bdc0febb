//! Range Filter Store
//!
//! Holds the immutable week buckets of the timeline slider and the selected
//! inclusive index range, and computes aggregates over that range.

use crate::domain::{Breakdown, DragHandle, TimeBucket, TimelineConfig, ValidationPolicy};
use crate::error::{EmptyTimelineSnafu, InvalidRangeSnafu, NonContiguousTimelineSnafu, Result};
use crate::eventing::{RangeFilterEvent, Subscribers, SubscriptionId};
use crate::helpers::{is_next_day, share_of};
use crate::states::generate_buckets;
use chrono::NaiveDate;
use crossbeam_channel::Receiver;
use snafu::ensure;
use tracing::{debug, info, warn};

/// Timeline range state shared by every card of a dashboard
#[derive(Debug)]
pub struct RangeFilterStore {
    /// Buckets, never mutated after construction
    weeks: Vec<TimeBucket>,
    /// First selected bucket index
    start: usize,
    /// Last selected bucket index (inclusive)
    end: usize,
    /// Whether the user narrowed the range since the last reset
    active: bool,
    /// Whether a slider handle is being dragged
    is_dragging: bool,
    /// Handle under the pointer while dragging
    drag_handle: Option<DragHandle>,
    /// Handling of inverted `set_range` input
    range_policy: ValidationPolicy,
    /// Change observers
    subscribers: Subscribers<RangeFilterEvent>,
}

impl RangeFilterStore {
    /// Create a store over explicit buckets
    ///
    /// Buckets must be non-empty, indexed `0..n` in order, and each must
    /// start the day after its predecessor ends.
    pub fn from_buckets(weeks: Vec<TimeBucket>, range_policy: ValidationPolicy) -> Result<Self> {
        ensure!(!weeks.is_empty(), EmptyTimelineSnafu);

        for (index, bucket) in weeks.iter().enumerate() {
            ensure!(
                bucket.index == index && bucket.start_date <= bucket.end_date,
                NonContiguousTimelineSnafu { index }
            );
            if index > 0 {
                ensure!(
                    is_next_day(weeks[index - 1].end_date, bucket.start_date),
                    NonContiguousTimelineSnafu { index }
                );
            }
        }

        let end = weeks.len() - 1;
        Ok(Self {
            weeks,
            start: 0,
            end,
            active: false,
            is_dragging: false,
            drag_handle: None,
            range_policy,
            subscribers: Subscribers::new(),
        })
    }

    /// Create a store over generated buckets
    pub fn generate(config: &TimelineConfig, range_policy: ValidationPolicy) -> Result<Self> {
        let store = Self::from_buckets(generate_buckets(config), range_policy)?;
        info!(
            weeks = store.len(),
            total = store.grand_total(),
            "Range filter store created"
        );
        Ok(store)
    }

    // ==================== Getters ====================

    /// All buckets in order
    pub fn weeks(&self) -> &[TimeBucket] {
        &self.weeks
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    /// Always false; a store holds at least one bucket
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.weeks.len() - 1
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn drag_handle(&self) -> Option<DragHandle> {
        self.drag_handle
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.range_policy
    }

    /// Buckets in `[start, end]`; empty if a permissive call inverted the range
    pub fn selected_weeks(&self) -> &[TimeBucket] {
        self.weeks.get(self.start..=self.end).unwrap_or(&[])
    }

    /// Registrations inside the selected range
    pub fn total_registrations(&self) -> u64 {
        self.selected_weeks().iter().map(|w| w.count).sum()
    }

    /// Registrations per category inside the selected range
    pub fn breakdown_totals(&self) -> Breakdown {
        let mut totals = Breakdown::new();
        for week in self.selected_weeks() {
            for (category, count) in &week.breakdown {
                *totals.entry(category.clone()).or_insert(0) += count;
            }
        }
        totals
    }

    /// First day of the start bucket and last day of the end bucket
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.weeks[self.start].start_date, self.weeks[self.end].end_date)
    }

    /// Registrations over the whole timeline
    pub fn grand_total(&self) -> u64 {
        self.weeks.iter().map(|w| w.count).sum()
    }

    /// Share of all registrations inside the selected range
    ///
    /// Cards multiply their metrics by this factor. Returns 1 when the
    /// timeline has no registrations at all.
    pub fn selection_ratio(&self) -> f64 {
        share_of(self.total_registrations(), self.grand_total())
    }

    /// Index of the bucket containing `date`
    pub fn bucket_at(&self, date: NaiveDate) -> Option<usize> {
        let pos = self.weeks.partition_point(|w| w.end_date < date);
        self.weeks
            .get(pos)
            .filter(|w| w.contains(date))
            .map(|w| w.index)
    }

    // ==================== Setters ====================

    /// Select `[start, end]`, clamping each bound into the timeline
    ///
    /// Inverted input is swapped under [`ValidationPolicy::Clamp`], kept under
    /// `Permissive`, and rejected under `Reject`.
    pub fn set_range(&mut self, start: i64, end: i64) -> Result<()> {
        let (start, end) = match self.range_policy {
            ValidationPolicy::Permissive => (start, end),
            ValidationPolicy::Clamp if start > end => {
                warn!(start, end, "Inverted range, swapping bounds");
                (end, start)
            }
            ValidationPolicy::Clamp => (start, end),
            ValidationPolicy::Reject => {
                ensure!(
                    start <= end,
                    InvalidRangeSnafu {
                        start,
                        end,
                        last_index: self.last_index(),
                    }
                );
                (start, end)
            }
        };

        let start = self.clamp_index(start, 0, self.last_index());
        let end = self.clamp_index(end, 0, self.last_index());
        self.apply(start, end, true);
        Ok(())
    }

    /// Move the start bound, clamped into `[0, end]`
    pub fn set_range_start(&mut self, start: i64) {
        let start = self.clamp_index(start, 0, self.end);
        self.apply(start, self.end, true);
    }

    /// Move the end bound, clamped into `[start, last_index]`
    pub fn set_range_end(&mut self, end: i64) {
        let end = self.clamp_index(end, self.start, self.last_index());
        self.apply(self.start, end, true);
    }

    /// Select the whole timeline and mark the range inactive
    pub fn reset_range(&mut self) {
        self.apply(0, self.last_index(), false);
    }

    /// Start, switch or end a slider drag session
    ///
    /// The handle is dropped when dragging stops.
    pub fn set_dragging(&mut self, dragging: bool, handle: Option<DragHandle>) {
        let handle = if dragging { handle } else { None };
        if self.is_dragging == dragging && self.drag_handle == handle {
            return;
        }
        self.is_dragging = dragging;
        self.drag_handle = handle;
        debug!(dragging, ?handle, "Drag state changed");
        self.subscribers
            .publish(&RangeFilterEvent::DragChanged { dragging, handle });
    }

    /// Move whichever bound the active drag holds to `index`
    ///
    /// Returns false when no handle is being dragged.
    pub fn drag_to(&mut self, index: i64) -> bool {
        if !self.is_dragging {
            return false;
        }
        match self.drag_handle {
            Some(DragHandle::Start) => self.set_range_start(index),
            Some(DragHandle::End) => self.set_range_end(index),
            None => return false,
        }
        true
    }

    fn clamp_index(&self, index: i64, lo: usize, hi: usize) -> usize {
        let clamped = index.max(lo as i64).min(hi as i64);
        if clamped != index {
            debug!(index, lo, hi, "Range index clamped");
        }
        clamped as usize
    }

    fn apply(&mut self, start: usize, end: usize, active: bool) {
        if self.start == start && self.end == end && self.active == active {
            return;
        }
        self.start = start;
        self.end = end;
        self.active = active;
        debug!(start, end, active, "Range changed");
        self.subscribers
            .publish(&RangeFilterEvent::RangeChanged { start, end, active });
    }

    // ==================== Subscriptions ====================

    /// Register a change callback
    pub fn subscribe(&mut self, callback: impl FnMut(&RangeFilterEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Remove a change callback
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Receive change events through a channel
    pub fn subscribe_channel(&mut self) -> Receiver<RangeFilterEvent> {
        self.subscribers.subscribe_channel()
    }
}
