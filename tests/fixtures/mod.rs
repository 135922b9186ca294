// Test fixtures - reusable test data
// Provides consistent dates, spans and boards across the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use shift_board::models::settings::Settings;
use shift_board::models::shift::Span;
use shift_board::models::staff::Roster;
use shift_board::models::timeline::TimeSlot;
use shift_board::services::board::ShiftBoard;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Saturday, June 1 2024
    pub fn june_1_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    /// Monday, June 3 2024
    pub fn june_3_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    /// New Year's Day 2025, a Wednesday holiday
    pub fn new_year_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }
}

/// `[start, end)` in fractional hours
pub fn span(start: f64, end: f64) -> Span {
    Span::new(TimeSlot::nearest(start), TimeSlot::nearest(end)).unwrap()
}

pub fn slot(hours: f64) -> TimeSlot {
    TimeSlot::nearest(hours)
}

/// Board with default settings and the demo roster
pub fn demo_board() -> ShiftBoard {
    ShiftBoard::new(Settings::default(), Roster::demo()).unwrap()
}
