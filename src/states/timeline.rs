//! Timeline Generator
//!
//! Builds the synthetic week buckets a range store is created with. Counts
//! follow a quadratic growth curve toward the end date with uniform jitter;
//! breakdowns apply fixed category shares to each count.

use crate::domain::{Breakdown, CategoryShare, TimeBucket, TimelineConfig};
use crate::helpers::{portion, week_windows};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Generate buckets for a timeline config
///
/// Deterministic when `config.seed` is set.
pub fn generate_buckets(config: &TimelineConfig) -> Vec<TimeBucket> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_buckets_with(config, &mut rng)
}

/// Generate buckets drawing jitter from `rng`
pub fn generate_buckets_with<R: Rng>(config: &TimelineConfig, rng: &mut R) -> Vec<TimeBucket> {
    let windows = week_windows(config.start_date, config.end_date, config.bucket_days);
    let last = windows.len().saturating_sub(1);
    let jitter = config.jitter.clamp(0.0, 0.99);

    let buckets: Vec<TimeBucket> = windows
        .into_iter()
        .enumerate()
        .map(|(index, (start_date, end_date))| {
            let progress = if last == 0 { 1.0 } else { index as f64 / last as f64 };
            let expected = config.base_count as f64 * (1.0 + config.growth * progress * progress);
            let factor = if jitter > 0.0 {
                rng.gen_range((1.0 - jitter)..=(1.0 + jitter))
            } else {
                1.0
            };
            let count = (expected * factor).round().max(0.0) as u64;

            TimeBucket {
                index,
                start_date,
                end_date,
                count,
                breakdown: breakdown_for(count, &config.categories),
            }
        })
        .collect();

    info!(
        buckets = buckets.len(),
        start = %config.start_date,
        end = %config.end_date,
        "Generated timeline buckets"
    );
    buckets
}

/// Split a count by fixed category shares
pub fn breakdown_for(count: u64, categories: &[CategoryShare]) -> Breakdown {
    categories
        .iter()
        .map(|c| (c.name.clone(), portion(count, c.share)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::is_next_day;
    use chrono::NaiveDate;

    fn config(seed: Option<u64>) -> TimelineConfig {
        TimelineConfig {
            seed,
            ..TimelineConfig::default()
        }
    }

    #[test]
    fn default_timeline_is_contiguous() {
        let buckets = generate_buckets(&config(Some(1)));
        assert_eq!(buckets.len(), 25);
        assert_eq!(
            buckets[0].start_date,
            NaiveDate::from_ymd_opt(2025, 1, 6).expect("date")
        );
        for (i, pair) in buckets.windows(2).enumerate() {
            assert_eq!(pair[0].index, i);
            assert!(is_next_day(pair[0].end_date, pair[1].start_date));
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate_buckets(&config(Some(42)));
        let b = generate_buckets(&config(Some(42)));
        assert_eq!(a, b);
    }

    #[test]
    fn counts_grow_toward_end() {
        let buckets = generate_buckets(&config(Some(7)));
        let half = buckets.len() / 2;
        let early: u64 = buckets[..half].iter().map(|b| b.count).sum();
        let late: u64 = buckets[buckets.len() - half..].iter().map(|b| b.count).sum();
        assert!(late > early, "late {late} should exceed early {early}");
    }

    #[test]
    fn zero_jitter_follows_curve() {
        let cfg = TimelineConfig {
            jitter: 0.0,
            growth: 3.0,
            base_count: 10,
            ..TimelineConfig::default()
        };
        let buckets = generate_buckets(&cfg);
        assert_eq!(buckets[0].count, 10);
        assert_eq!(buckets[buckets.len() - 1].count, 40);
        for pair in buckets.windows(2) {
            assert!(pair[0].count <= pair[1].count);
        }
    }

    #[test]
    fn breakdown_never_exceeds_count() {
        for bucket in generate_buckets(&config(Some(3))) {
            assert!(bucket.breakdown_sum() <= bucket.count);
            assert_eq!(bucket.breakdown.len(), 4);
        }
    }

    #[test]
    fn breakdown_uses_floor_of_share() {
        let shares = vec![
            CategoryShare { name: "A".into(), share: 0.5 },
            CategoryShare { name: "B".into(), share: 0.25 },
        ];
        let breakdown = breakdown_for(11, &shares);
        assert_eq!(breakdown.get("A"), Some(&5));
        assert_eq!(breakdown.get("B"), Some(&2));
    }
}
