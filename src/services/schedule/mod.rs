// Pattern schedule
// Which model pattern is active on which calendar date

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::pattern::{ModelPattern, PatternId};
use crate::services::holiday::HolidayCalendar;
use crate::utils::date::YearMonth;

/// Which days of a month a bulk apply touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulkPolicy {
    /// Monday to Friday, holidays excluded
    Weekday,
    /// Saturday, Sunday and holidays
    Weekend,
}

impl BulkPolicy {
    pub fn matches(&self, date: NaiveDate, holidays: &HolidayCalendar) -> bool {
        let rest_day = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let holiday = holidays.is_holiday(date);
        match self {
            BulkPolicy::Weekday => !rest_day && !holiday,
            BulkPolicy::Weekend => rest_day || holiday,
        }
    }
}

/// Date -> pattern id assignments. Dates without an entry have no pattern
/// stored and render with the default (first) pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternSchedule {
    entries: BTreeMap<NaiveDate, PatternId>,
}

impl PatternSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: NaiveDate) -> Option<PatternId> {
        self.entries.get(&date).copied()
    }

    /// Assign one date, replacing any previous pattern.
    pub fn assign(&mut self, date: NaiveDate, pattern: PatternId) {
        self.entries.insert(date, pattern);
    }

    pub fn unassign(&mut self, date: NaiveDate) -> Option<PatternId> {
        self.entries.remove(&date)
    }

    /// Assign `pattern` to every day of `month` matching `policy`, overwriting
    /// those days only. Returns the number of days assigned.
    pub fn apply_bulk(
        &mut self,
        month: YearMonth,
        policy: BulkPolicy,
        pattern: PatternId,
        holidays: &HolidayCalendar,
    ) -> usize {
        let mut applied = 0;
        for date in month.days().filter(|date| policy.matches(*date, holidays)) {
            self.entries.insert(date, pattern);
            applied += 1;
        }
        log::info!("Applied {} to {} {:?} days of {}", pattern, applied, policy, month);
        applied
    }

    /// Remove every assignment in `month`. Returns how many were removed.
    pub fn clear_month(&mut self, month: YearMonth) -> usize {
        let before = self.entries.len();
        self.entries.retain(|date, _| !month.contains(*date));
        let removed = before - self.entries.len();
        log::info!("Cleared {} assignments in {}", removed, month);
        removed
    }

    /// Point every entry for `from` at `to`. Returns how many moved.
    pub fn reassign(&mut self, from: PatternId, to: PatternId) -> usize {
        let mut moved = 0;
        for pattern in self.entries.values_mut().filter(|pattern| **pattern == from) {
            *pattern = to;
            moved += 1;
        }
        moved
    }

    pub fn references(&self, pattern: PatternId) -> bool {
        self.entries.values().any(|id| *id == pattern)
    }

    /// Assignments falling in `month`, in date order.
    pub fn in_month(&self, month: YearMonth) -> impl Iterator<Item = (NaiveDate, PatternId)> + '_ {
        self.entries
            .iter()
            .filter(move |(date, _)| month.contains(**date))
            .map(|(date, id)| (*date, *id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, PatternId)> + '_ {
        self.entries.iter().map(|(date, id)| (*date, *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pattern shown for `date`: the scheduled one, else the first pattern.
/// `None` only when `patterns` is empty.
pub fn resolve_active<'a>(
    patterns: &'a [ModelPattern],
    schedule: &PatternSchedule,
    date: NaiveDate,
) -> Option<&'a ModelPattern> {
    schedule
        .get(date)
        .and_then(|id| patterns.iter().find(|pattern| pattern.id == id))
        .or_else(|| patterns.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> YearMonth {
        YearMonth::new(2025, 1).unwrap()
    }

    #[test]
    fn test_weekday_skips_wednesday_holiday() {
        let holidays = HolidayCalendar::japanese();
        let mut schedule = PatternSchedule::new();
        let applied = schedule.apply_bulk(january(), BulkPolicy::Weekday, PatternId(2), &holidays);

        // 23 weekdays in January 2025, minus New Year (Wed) and Coming of Age Day (Mon)
        assert_eq!(applied, 21);
        assert_eq!(schedule.get(date(2025, 1, 1)), None);
        assert_eq!(schedule.get(date(2025, 1, 2)), Some(PatternId(2)));
        assert_eq!(schedule.get(date(2025, 1, 4)), None);
    }

    #[test]
    fn test_weekend_includes_holidays() {
        let holidays = HolidayCalendar::japanese();
        let mut schedule = PatternSchedule::new();
        let applied = schedule.apply_bulk(january(), BulkPolicy::Weekend, PatternId(3), &holidays);

        assert_eq!(applied, 10);
        assert_eq!(schedule.get(date(2025, 1, 1)), Some(PatternId(3)));
        assert_eq!(schedule.get(date(2025, 1, 13)), Some(PatternId(3)));
        assert_eq!(schedule.get(date(2025, 1, 4)), Some(PatternId(3)));
        assert_eq!(schedule.get(date(2025, 1, 2)), None);
    }

    #[test]
    fn test_bulk_overwrites_matching_days_only() {
        let holidays = HolidayCalendar::japanese();
        let mut schedule = PatternSchedule::new();
        schedule.assign(date(2025, 1, 4), PatternId(9));
        schedule.assign(date(2025, 1, 6), PatternId(9));

        schedule.apply_bulk(january(), BulkPolicy::Weekday, PatternId(1), &holidays);
        assert_eq!(schedule.get(date(2025, 1, 4)), Some(PatternId(9)));
        assert_eq!(schedule.get(date(2025, 1, 6)), Some(PatternId(1)));
    }

    #[test]
    fn test_clear_month_leaves_other_months() {
        let mut schedule = PatternSchedule::new();
        schedule.assign(date(2024, 12, 31), PatternId(1));
        schedule.assign(date(2025, 1, 1), PatternId(1));
        schedule.assign(date(2025, 1, 31), PatternId(2));
        schedule.assign(date(2025, 2, 1), PatternId(2));

        assert_eq!(schedule.clear_month(january()), 2);
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.in_month(january()).count(), 0);
        assert_eq!(schedule.get(date(2025, 2, 1)), Some(PatternId(2)));
    }

    #[test]
    fn test_reassign() {
        let mut schedule = PatternSchedule::new();
        schedule.assign(date(2024, 6, 1), PatternId(2));
        schedule.assign(date(2024, 6, 2), PatternId(2));
        schedule.assign(date(2024, 6, 3), PatternId(3));

        assert_eq!(schedule.reassign(PatternId(2), PatternId(1)), 2);
        assert!(!schedule.references(PatternId(2)));
        assert_eq!(schedule.get(date(2024, 6, 3)), Some(PatternId(3)));
    }

    #[test]
    fn test_resolve_active_falls_back_to_first() {
        let patterns = vec![
            ModelPattern::new(PatternId(1), "A", "#000000"),
            ModelPattern::new(PatternId(2), "B", "#FFFFFF"),
        ];
        let mut schedule = PatternSchedule::new();
        schedule.assign(date(2024, 6, 1), PatternId(2));
        schedule.assign(date(2024, 6, 2), PatternId(7));

        let name = |d| resolve_active(&patterns, &schedule, d).map(|p| p.name.as_str());
        assert_eq!(name(date(2024, 6, 1)), Some("B"));
        assert_eq!(name(date(2024, 6, 2)), Some("A"));
        assert_eq!(name(date(2024, 6, 3)), Some("A"));
        assert!(resolve_active(&[], &schedule, date(2024, 6, 1)).is_none());
    }

    #[test]
    fn test_serializes_with_date_keys() {
        let mut schedule = PatternSchedule::new();
        schedule.assign(date(2024, 6, 1), PatternId(2));
        assert_eq!(serde_json::to_string(&schedule).unwrap(), r#"{"2024-06-01":2}"#);
    }
}
