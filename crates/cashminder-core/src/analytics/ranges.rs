//! Named analytics windows relative to "today"

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};

use super::types::{RangeKey, TimeRange};

/// Resolve every named window against the local clock
pub fn resolve_time_ranges() -> BTreeMap<RangeKey, TimeRange> {
    resolve_time_ranges_at(Local::now().naive_local())
}

/// Resolve every named window as of `now`
///
/// `now` is truncated to midnight first; every window ends at that midnight.
pub fn resolve_time_ranges_at(now: NaiveDateTime) -> BTreeMap<RangeKey, TimeRange> {
    RangeKey::all()
        .iter()
        .map(|key| (*key, resolve_range_at(*key, now)))
        .collect()
}

/// Resolve a single named window as of `now`
pub fn resolve_range_at(key: RangeKey, now: NaiveDateTime) -> TimeRange {
    let today = now.date();
    let start = match key {
        RangeKey::Last7Days => today - Duration::days(6),
        RangeKey::Last30Days => today - Duration::days(29),
        RangeKey::Last3Months => months_back(first_of_month(today), 3),
        RangeKey::Last6Months => months_back(first_of_month(today), 6),
        RangeKey::YearToDate => first_of_year(today),
    };

    // start <= today for every key, so build directly
    TimeRange {
        start: midnight(start),
        end: midnight(today),
        label: key.label().to_string(),
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub(crate) fn first_of_year(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.ordinal0() as i64)
}

fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDateTime {
        date(2024, 3, 15).and_hms_opt(14, 30, 0).unwrap()
    }

    #[test]
    fn test_all_keys_resolved() {
        let ranges = resolve_time_ranges_at(now());
        assert_eq!(ranges.len(), 5);
        for key in RangeKey::all() {
            assert!(ranges.contains_key(key));
        }
    }

    #[test]
    fn test_ranges_end_at_today_midnight() {
        for range in resolve_time_ranges_at(now()).values() {
            assert_eq!(range.end, midnight(date(2024, 3, 15)));
            assert!(range.start <= range.end);
        }
    }

    #[test]
    fn test_day_windows() {
        let ranges = resolve_time_ranges_at(now());
        assert_eq!(ranges[&RangeKey::Last7Days].start, midnight(date(2024, 3, 9)));
        assert_eq!(ranges[&RangeKey::Last30Days].start, midnight(date(2024, 2, 15)));
    }

    #[test]
    fn test_month_windows_start_on_first() {
        let ranges = resolve_time_ranges_at(now());
        assert_eq!(ranges[&RangeKey::Last3Months].start, midnight(date(2023, 12, 1)));
        assert_eq!(ranges[&RangeKey::Last6Months].start, midnight(date(2023, 9, 1)));
    }

    #[test]
    fn test_year_to_date() {
        let ranges = resolve_time_ranges_at(now());
        let ytd = &ranges[&RangeKey::YearToDate];
        assert_eq!(ytd.start, midnight(date(2024, 1, 1)));
        assert_eq!(ytd.label, "Year to date");
    }

    #[test]
    fn test_month_windows_on_month_end() {
        // Aug 31 has no Feb/May counterpart; the month start is used instead
        let now = date(2024, 8, 31).and_hms_opt(9, 0, 0).unwrap();
        let ranges = resolve_time_ranges_at(now);
        assert_eq!(ranges[&RangeKey::Last6Months].start, midnight(date(2024, 2, 1)));
        assert_eq!(ranges[&RangeKey::Last3Months].start, midnight(date(2024, 5, 1)));
    }

    #[test]
    fn test_first_of_helpers() {
        assert_eq!(first_of_month(date(2024, 2, 29)), date(2024, 2, 1));
        assert_eq!(first_of_year(date(2024, 12, 31)), date(2024, 1, 1));
    }
}
