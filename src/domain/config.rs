//! Config - Filter Configuration
//!
//! Loaded from a TOML file; every field is optional and falls back to the
//! defaults in [`crate::constants`].

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_BASE_COUNT, DEFAULT_BUCKET_DAYS, DEFAULT_CATEGORY_SHARES,
    DEFAULT_GROWTH, DEFAULT_JITTER, DEFAULT_TIMELINE_END, DEFAULT_TIMELINE_START,
};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info};

/// Main filter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Timeline bucket generation
    pub timeline: TimelineConfig,
    /// Handling of out-of-domain inputs
    pub validation: ValidationConfig,
}

/// Timeline generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// First day of the first bucket
    pub start_date: NaiveDate,
    /// Last day covered by the timeline
    pub end_date: NaiveDate,
    /// Bucket width in days
    pub bucket_days: u32,
    /// Expected registrations in the first bucket
    pub base_count: u64,
    /// Multiplier reached by the last bucket on top of the base count
    pub growth: f64,
    /// Relative random spread applied to each bucket, in `[0, 1)`
    pub jitter: f64,
    /// Fixed RNG seed; `None` draws from entropy
    pub seed: Option<u64>,
    /// Category shares used for every bucket breakdown
    pub categories: Vec<CategoryShare>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        let (sy, sm, sd) = DEFAULT_TIMELINE_START;
        let (ey, em, ed) = DEFAULT_TIMELINE_END;
        Self {
            start_date: NaiveDate::from_ymd_opt(sy, sm, sd).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(ey, em, ed).unwrap_or_default(),
            bucket_days: DEFAULT_BUCKET_DAYS,
            base_count: DEFAULT_BASE_COUNT,
            growth: DEFAULT_GROWTH,
            jitter: DEFAULT_JITTER,
            seed: None,
            categories: DEFAULT_CATEGORY_SHARES
                .iter()
                .map(|(name, share)| CategoryShare {
                    name: (*name).to_string(),
                    share: *share,
                })
                .collect(),
        }
    }
}

/// A category and its fixed share of every bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub share: f64,
}

/// How stores treat inputs outside their documented domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Accept the input as given
    Permissive,
    /// Bring the input into its domain and log a warning
    #[default]
    Clamp,
    /// Return an error and leave state unchanged
    Reject,
}

/// Validation policies per input kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Applied to category selection ratios
    pub ratio: ValidationPolicy,
    /// Applied to range bounds
    pub range: ValidationPolicy,
}

impl FilterConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = ?path, "Loading filter config");
        let value = std::fs::read_to_string(path)?;
        Self::from_toml_str(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to load filter config");
            e
        })
    }

    /// Load the config file from the platform config directory
    ///
    /// A missing file yields the defaults.
    pub fn try_load_default() -> Result<Self> {
        let path = get_or_create_config_dir()?.join(CONFIG_FILE_NAME);
        if !path.exists() {
            info!(path = ?path, "No filter config found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        let timeline = &self.timeline;
        if timeline.end_date < timeline.start_date {
            return Err(invalid(format!(
                "end_date {} is before start_date {}",
                timeline.end_date, timeline.start_date
            )));
        }
        if timeline.bucket_days == 0 {
            return Err(invalid("bucket_days must be at least 1"));
        }
        if !timeline.growth.is_finite() || timeline.growth < 0.0 {
            return Err(invalid(format!("growth {} must be >= 0", timeline.growth)));
        }
        if !timeline.jitter.is_finite() || !(0.0..1.0).contains(&timeline.jitter) {
            return Err(invalid(format!("jitter {} must be in [0, 1)", timeline.jitter)));
        }

        let mut total = 0.0;
        for category in &timeline.categories {
            if !category.share.is_finite() || category.share < 0.0 {
                return Err(invalid(format!(
                    "category {:?} has invalid share {}",
                    category.name, category.share
                )));
            }
            total += category.share;
        }
        // Small tolerance for shares written as decimals
        if total > 1.0 + 1e-9 {
            return Err(invalid(format!("category shares sum to {total}, above 1")));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        message: message.into(),
    }
}
