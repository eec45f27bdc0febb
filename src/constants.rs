//! Filter Constants
//!
//! Defaults for the timeline generator and configuration lookup.

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "dashboard-filters.toml";

/// Project directory qualifiers (see `directories::ProjectDirs`)
pub const PROJECT_QUALIFIER: &str = "com";
pub const PROJECT_ORGANIZATION: &str = "dashboard";
pub const PROJECT_APPLICATION: &str = "dashboard-filters";

/// Default timeline window (registration opens / event date)
pub const DEFAULT_TIMELINE_START: (i32, u32, u32) = (2025, 1, 6);
pub const DEFAULT_TIMELINE_END: (i32, u32, u32) = (2025, 6, 29);

/// Width of one timeline bucket in days
pub const DEFAULT_BUCKET_DAYS: u32 = 7;

/// Growth curve shape for synthetic registration counts
pub const DEFAULT_BASE_COUNT: u64 = 20;
pub const DEFAULT_GROWTH: f64 = 6.0;
pub const DEFAULT_JITTER: f64 = 0.3;

/// Default registration categories and their fixed shares of each bucket
pub const DEFAULT_CATEGORY_SHARES: &[(&str, f64)] = &[
    ("Early Bird", 0.35),
    ("Regular", 0.40),
    ("VIP", 0.12),
    ("Student", 0.08),
];

/// Ratio applied when a category is toggled without an explicit share
pub const DEFAULT_SELECTION_RATIO: f64 = 1.0;
