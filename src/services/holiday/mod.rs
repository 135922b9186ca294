// Holiday lookup
// Static date -> holiday label table used for bulk apply and calendar colouring

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;

use crate::utils::date::parse_date_key;

/// Japanese national holidays, including substitute holidays.
const JAPANESE_HOLIDAYS: &[(&str, &str)] = &[
    ("2024-01-01", "元日"),
    ("2024-01-08", "成人の日"),
    ("2024-02-11", "建国記念の日"),
    ("2024-02-12", "振替休日"),
    ("2024-02-23", "天皇誕生日"),
    ("2024-03-20", "春分の日"),
    ("2024-04-29", "昭和の日"),
    ("2024-05-03", "憲法記念日"),
    ("2024-05-04", "みどりの日"),
    ("2024-05-05", "こどもの日"),
    ("2024-05-06", "振替休日"),
    ("2024-07-15", "海の日"),
    ("2024-08-11", "山の日"),
    ("2024-08-12", "振替休日"),
    ("2024-09-16", "敬老の日"),
    ("2024-09-22", "秋分の日"),
    ("2024-09-23", "振替休日"),
    ("2024-10-14", "スポーツの日"),
    ("2024-11-03", "文化の日"),
    ("2024-11-04", "振替休日"),
    ("2024-11-23", "勤労感謝の日"),
    ("2025-01-01", "元日"),
    ("2025-01-13", "成人の日"),
    ("2025-02-11", "建国記念の日"),
    ("2025-02-23", "天皇誕生日"),
    ("2025-02-24", "振替休日"),
    ("2025-03-20", "春分の日"),
    ("2025-04-29", "昭和の日"),
    ("2025-05-03", "憲法記念日"),
    ("2025-05-04", "みどりの日"),
    ("2025-05-05", "こどもの日"),
    ("2025-05-06", "振替休日"),
    ("2025-07-21", "海の日"),
    ("2025-08-11", "山の日"),
    ("2025-09-15", "敬老の日"),
    ("2025-09-23", "秋分の日"),
    ("2025-10-13", "スポーツの日"),
    ("2025-11-03", "文化の日"),
    ("2025-11-23", "勤労感謝の日"),
    ("2025-11-24", "振替休日"),
    ("2026-01-01", "元日"),
    ("2026-01-12", "成人の日"),
    ("2026-02-11", "建国記念の日"),
    ("2026-02-23", "天皇誕生日"),
    ("2026-03-20", "春分の日"),
    ("2026-04-29", "昭和の日"),
    ("2026-05-03", "憲法記念日"),
    ("2026-05-04", "みどりの日"),
    ("2026-05-05", "こどもの日"),
    ("2026-05-06", "振替休日"),
    ("2026-07-20", "海の日"),
    ("2026-08-11", "山の日"),
    ("2026-09-21", "敬老の日"),
    ("2026-09-22", "国民の休日"),
    ("2026-09-23", "秋分の日"),
    ("2026-10-12", "スポーツの日"),
    ("2026-11-03", "文化の日"),
    ("2026-11-23", "勤労感謝の日"),
];

/// Calendar colouring of a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Weekday,
    Saturday,
    Sunday,
    Holiday,
}

impl DayKind {
    /// Saturday, Sunday or holiday.
    pub fn is_rest_day(&self) -> bool {
        !matches!(self, DayKind::Weekday)
    }
}

/// Read-only holiday table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolidayCalendar {
    entries: HashMap<NaiveDate, String>,
}

impl HolidayCalendar {
    pub fn japanese() -> Self {
        let entries = JAPANESE_HOLIDAYS.iter().filter_map(|(key, label)| match parse_date_key(key) {
            Ok(date) => Some((date, label.to_string())),
            Err(e) => {
                log::warn!("Skipping holiday entry: {}", e);
                None
            }
        });
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (NaiveDate, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn label(&self, date: NaiveDate) -> Option<&str> {
        self.entries.get(&date).map(String::as_str)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    /// Holidays take precedence over the day of the week.
    pub fn classify(&self, date: NaiveDate) -> DayKind {
        if self.is_holiday(date) {
            return DayKind::Holiday;
        }
        match date.weekday() {
            Weekday::Sat => DayKind::Saturday,
            Weekday::Sun => DayKind::Sunday,
            _ => DayKind::Weekday,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
