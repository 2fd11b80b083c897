//! Date-Range Resolver Module
//! Turns a period preset (or a manual override) into a concrete start/end
//! date pair anchored on the current date.

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Selectable history window: presets and manual picks never reach further
/// back than this many months before today.
const HISTORY_MONTHS: u32 = 24;

/// Named period shortcuts offered in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Last30Days,
    PreviousMonth,
    Last3Months,
    Last6Months,
    LastYear,
    AllTime,
}

impl Default for Preset {
    fn default() -> Self {
        Preset::Last30Days
    }
}

impl Preset {
    /// All presets in display order.
    pub const ALL: [Preset; 6] = [
        Preset::Last30Days,
        Preset::PreviousMonth,
        Preset::Last3Months,
        Preset::Last6Months,
        Preset::LastYear,
        Preset::AllTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Last30Days => "Last 30 days",
            Preset::PreviousMonth => "Previous month",
            Preset::Last3Months => "Last 3 months",
            Preset::Last6Months => "Last 6 months",
            Preset::LastYear => "Last year",
            Preset::AllTime => "All time",
        }
    }
}

/// Inclusive date range with `start <= end` guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the endpoints if they arrive inverted.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start > end {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Clamp both endpoints into `[min, max]`. Keeps `start <= end`.
    pub fn clamp_to(&self, min: NaiveDate, max: NaiveDate) -> Self {
        Self {
            start: self.start.clamp(min, max),
            end: self.end.clamp(min, max),
        }
    }
}

/// Lower bound of the selectable window: two calendar years before `today`.
pub fn history_floor(today: NaiveDate) -> NaiveDate {
    sub_months(today, HISTORY_MONTHS)
}

/// Calendar-aware month subtraction. chrono clamps to the last valid day of
/// the target month (2024-03-31 minus 1 month is 2024-02-29), which is the
/// rule this crate uses everywhere.
fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Resolve a preset to its default range, anchored on `today`.
pub fn resolve_preset(preset: Preset, today: NaiveDate) -> DateRange {
    match preset {
        Preset::Last30Days => DateRange::new(today - Duration::days(30), today),
        Preset::PreviousMonth => {
            let first_of_this_month = today.with_day(1).unwrap_or(today);
            let last_of_prev_month = first_of_this_month - Duration::days(1);
            let first_of_prev_month = last_of_prev_month.with_day(1).unwrap_or(last_of_prev_month);
            DateRange::new(first_of_prev_month, last_of_prev_month)
        }
        Preset::Last3Months => DateRange::new(sub_months(today, 3), today),
        Preset::Last6Months => DateRange::new(sub_months(today, 6), today),
        Preset::LastYear => DateRange::new(sub_months(today, 12), today),
        Preset::AllTime => DateRange::new(history_floor(today), today),
    }
}

/// Resolve the effective range for a user interaction.
///
/// A manual override wins over the preset; inverted pairs are swapped and the
/// result is clamped to `[today - 2y, today]`. Pure function of its inputs.
pub fn resolve(
    preset: Preset,
    today: NaiveDate,
    manual: Option<(NaiveDate, NaiveDate)>,
) -> DateRange {
    match manual {
        Some((start, end)) => DateRange::new(start, end).clamp_to(history_floor(today), today),
        None => resolve_preset(preset, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn last_30_days_spans_30_days_back() {
        let today = d(2024, 3, 15);
        let range = resolve_preset(Preset::Last30Days, today);
        assert_eq!(range.end, today);
        assert_eq!(range.start, d(2024, 2, 14));
    }

    #[test]
    fn previous_month_handles_leap_february() {
        let range = resolve_preset(Preset::PreviousMonth, d(2024, 3, 5));
        assert_eq!(range.start, d(2024, 2, 1));
        assert_eq!(range.end, d(2024, 2, 29));
    }

    #[test]
    fn previous_month_rolls_over_year_boundary() {
        let range = resolve_preset(Preset::PreviousMonth, d(2024, 1, 10));
        assert_eq!(range.start, d(2023, 12, 1));
        assert_eq!(range.end, d(2023, 12, 31));
    }

    #[test]
    fn all_time_starts_two_years_back() {
        let today = d(2024, 6, 1);
        let range = resolve_preset(Preset::AllTime, today);
        assert_eq!(range.start, d(2022, 6, 1));
        assert_eq!(range.end, today);
    }

    #[test]
    fn month_subtraction_clamps_to_end_of_shorter_month() {
        // 2024-03-31 minus one calendar month lands on leap-day February.
        assert_eq!(sub_months(d(2024, 3, 31), 1), d(2024, 2, 29));
        assert_eq!(sub_months(d(2023, 5, 31), 2), d(2023, 3, 31));
    }

    #[test]
    fn every_preset_yields_ordered_range() {
        let anchors = [d(2024, 1, 1), d(2024, 2, 29), d(2023, 12, 31), d(2024, 7, 4)];
        for today in anchors {
            for preset in Preset::ALL {
                let range = resolve_preset(preset, today);
                assert!(range.start <= range.end, "{:?} @ {}", preset, today);
            }
        }
    }

    #[test]
    fn resolver_is_deterministic() {
        let today = d(2024, 5, 20);
        for preset in Preset::ALL {
            assert_eq!(
                resolve(preset, today, None),
                resolve(preset, today, None)
            );
        }
    }

    #[test]
    fn inverted_manual_range_is_swapped() {
        let today = d(2024, 2, 15);
        let range = resolve(
            Preset::Last30Days,
            today,
            Some((d(2024, 1, 31), d(2024, 1, 1))),
        );
        assert_eq!(range.start, d(2024, 1, 1));
        assert_eq!(range.end, d(2024, 1, 31));
    }

    #[test]
    fn manual_range_is_clamped_to_history_window() {
        let today = d(2024, 6, 1);
        let range = resolve(
            Preset::AllTime,
            today,
            Some((d(2019, 1, 1), d(2030, 1, 1))),
        );
        assert_eq!(range.start, history_floor(today));
        assert_eq!(range.end, today);
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));
        assert!(range.contains(d(2024, 1, 1)));
        assert!(range.contains(d(2024, 1, 31)));
        assert!(!range.contains(d(2024, 2, 1)));
    }
}
