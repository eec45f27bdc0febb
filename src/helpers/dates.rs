//! Date bucketing utilities.

use chrono::{Days, NaiveDate};

/// Split `[start, end]` into consecutive windows of `width_days` days
///
/// Windows are inclusive on both ends and contiguous. A window is emitted for
/// every start day up to and including `end`, so the last window may extend
/// past `end` to keep every window the same width.
pub fn week_windows(start: NaiveDate, end: NaiveDate, width_days: u32) -> Vec<(NaiveDate, NaiveDate)> {
    if width_days == 0 || end < start {
        return Vec::new();
    }

    let step = Days::new(u64::from(width_days));
    let span = Days::new(u64::from(width_days - 1));
    let mut windows = Vec::new();
    let mut cursor = start;

    while cursor <= end {
        let Some(window_end) = cursor.checked_add_days(span) else {
            break;
        };
        windows.push((cursor, window_end));
        let Some(next) = cursor.checked_add_days(step) else {
            break;
        };
        cursor = next;
    }

    windows
}

/// Whether `next` starts the day after `prev` ends
pub fn is_next_day(prev_end: NaiveDate, next_start: NaiveDate) -> bool {
    prev_end.succ_opt() == Some(next_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn windows_are_contiguous_weeks() {
        let windows = week_windows(date(2025, 1, 6), date(2025, 2, 2), 7);
        assert_eq!(windows.len(), 4);
        assert_eq!(windows[0], (date(2025, 1, 6), date(2025, 1, 12)));
        assert_eq!(windows[3], (date(2025, 1, 27), date(2025, 2, 2)));
        for pair in windows.windows(2) {
            assert!(is_next_day(pair[0].1, pair[1].0));
        }
    }

    #[test]
    fn partial_last_window_keeps_width() {
        let windows = week_windows(date(2025, 1, 6), date(2025, 1, 14), 7);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1], (date(2025, 1, 13), date(2025, 1, 19)));
    }

    #[test]
    fn single_day_range_yields_one_window() {
        let windows = week_windows(date(2025, 3, 1), date(2025, 3, 1), 7);
        assert_eq!(windows, vec![(date(2025, 3, 1), date(2025, 3, 7))]);
    }

    #[test]
    fn degenerate_inputs_yield_nothing() {
        assert!(week_windows(date(2025, 3, 1), date(2025, 2, 1), 7).is_empty());
        assert!(week_windows(date(2025, 3, 1), date(2025, 4, 1), 0).is_empty());
    }
}
