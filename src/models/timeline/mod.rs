// Timeline module
// Half-hour quantised time points and the bounded operating-hours timeline

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of half-hour slots in a full day.
pub const HALF_HOURS_PER_DAY: u8 = 48;

/// A half-hour aligned point on the day, stored as half hours since midnight.
///
/// Because the value is an integer count of slots, every `TimeSlot` is an
/// exact multiple of 0.5 hours. It serializes as fractional hours (`9.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub const MIDNIGHT: TimeSlot = TimeSlot(0);
    pub const END_OF_DAY: TimeSlot = TimeSlot(HALF_HOURS_PER_DAY);

    /// Create a slot from a half-hour count, `None` past 24:00.
    pub const fn from_half_hours(half_hours: u8) -> Option<Self> {
        if half_hours <= HALF_HOURS_PER_DAY {
            Some(Self(half_hours))
        } else {
            None
        }
    }

    /// Create a slot from fractional hours.
    ///
    /// The value must already be a multiple of 0.5 within `0.0..=24.0`.
    /// Use [`TimeSlot::nearest`] to snap arbitrary values.
    pub fn from_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() {
            return None;
        }
        let doubled = hours * 2.0;
        if doubled.fract() != 0.0 || doubled < 0.0 || doubled > f64::from(HALF_HOURS_PER_DAY) {
            return None;
        }
        Some(Self(doubled as u8))
    }

    /// Snap fractional hours to the nearest half hour, saturating at the day bounds.
    pub fn nearest(hours: f64) -> Self {
        if !hours.is_finite() {
            return Self::MIDNIGHT;
        }
        let doubled = (hours * 2.0).round().clamp(0.0, f64::from(HALF_HOURS_PER_DAY));
        Self(doubled as u8)
    }

    pub const fn half_hours(self) -> u8 {
        self.0
    }

    pub fn hours(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Hour and minute components (`9:30` is `(9, 30)`).
    pub fn hour_minute(self) -> (u8, u8) {
        (self.0 / 2, (self.0 % 2) * 30)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute) = self.hour_minute();
        write!(f, "{}:{:02}", hour, minute)
    }
}

impl From<TimeSlot> for f64 {
    fn from(slot: TimeSlot) -> Self {
        slot.hours()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{0} is not a half-hour time between 0 and 24")]
pub struct InvalidTimeSlot(pub f64);

impl TryFrom<f64> for TimeSlot {
    type Error = InvalidTimeSlot;

    fn try_from(hours: f64) -> Result<Self, Self::Error> {
        Self::from_hours(hours).ok_or(InvalidTimeSlot(hours))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("opening time {open} must be before closing time {close}")]
    Inverted { open: TimeSlot, close: TimeSlot },
    #[error("invalid operating hour: {0}")]
    InvalidHour(#[from] InvalidTimeSlot),
}

/// The bounded operating-hours timeline `[open, close]` every interval lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    open: TimeSlot,
    close: TimeSlot,
}

impl Timeline {
    pub fn new(open: TimeSlot, close: TimeSlot) -> Result<Self, TimelineError> {
        if open >= close {
            return Err(TimelineError::Inverted { open, close });
        }
        Ok(Self { open, close })
    }

    pub fn from_hours(open: f64, close: f64) -> Result<Self, TimelineError> {
        Self::new(TimeSlot::try_from(open)?, TimeSlot::try_from(close)?)
    }

    pub fn open(&self) -> TimeSlot {
        self.open
    }

    pub fn close(&self) -> TimeSlot {
        self.close
    }

    /// Number of half-hour slots between opening and closing.
    pub fn slot_count(&self) -> u8 {
        self.close.0 - self.open.0
    }

    /// Whether a grid cell may start at this slot (the closing time is not a cell).
    pub fn has_cell(&self, slot: TimeSlot) -> bool {
        slot >= self.open && slot < self.close
    }

    /// Clamp a half-hour count into `[open, close]`.
    pub(crate) fn clamp_half_hours(&self, half_hours: i32) -> i32 {
        half_hours.clamp(i32::from(self.open.0), i32::from(self.close.0))
    }

    /// Every cell start from opening up to the last half hour before closing.
    pub fn cells(&self) -> impl Iterator<Item = TimeSlot> {
        (self.open.0..self.close.0).map(TimeSlot)
    }
}

impl Default for Timeline {
    /// 06:00 to 24:00
    fn default() -> Self {
        Self {
            open: TimeSlot(12),
            close: TimeSlot::END_OF_DAY,
        }
    }
}
