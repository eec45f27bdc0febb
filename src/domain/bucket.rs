//! Bucket - Timeline week buckets and drag handles

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category registration counts for a bucket or a range
pub type Breakdown = BTreeMap<String, u64>;

/// One fixed-width timeline interval with its registration counts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// Dense 0-based position in the timeline
    pub index: usize,
    /// First day of the bucket (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the bucket (inclusive)
    pub end_date: NaiveDate,
    /// Registrations in the bucket
    pub count: u64,
    /// Registrations per category, never summing past `count`
    pub breakdown: Breakdown,
}

impl TimeBucket {
    /// Whether `date` falls within this bucket
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Sum of the category breakdown
    pub fn breakdown_sum(&self) -> u64 {
        self.breakdown.values().sum()
    }
}

/// The slider handle a pointer drag is moving
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragHandle {
    Start,
    End,
}
