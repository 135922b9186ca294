// Shift module
// Intervals placed on a timeline row, plus the daily (staff x position) row key

use serde::{Deserialize, Serialize};
use std::fmt;

use super::staff::StaffId;
use super::timeline::TimeSlot;

/// Stable identifier of one shift interval within its owning surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftId(pub u64);

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shift-{}", self.0)
    }
}

/// Start and end of an interval. `end` is always at least one slot after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SpanRecord")]
pub struct Span {
    start: TimeSlot,
    end: TimeSlot,
}

impl Span {
    pub fn new(start: TimeSlot, end: TimeSlot) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    pub(crate) fn from_half_hours(start: i32, end: i32) -> Option<Self> {
        let start = TimeSlot::from_half_hours(u8::try_from(start).ok()?)?;
        let end = TimeSlot::from_half_hours(u8::try_from(end).ok()?)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> TimeSlot {
        self.start
    }

    pub fn end(&self) -> TimeSlot {
        self.end
    }

    /// Length in half-hour slots.
    pub fn slots(&self) -> u8 {
        self.end.half_hours() - self.start.half_hours()
    }

    pub fn hours(&self) -> f64 {
        f64::from(self.slots()) / 2.0
    }

    /// Strict overlap of the half-open ranges `[start, end)`.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }
}

#[derive(Deserialize)]
struct SpanRecord {
    start: TimeSlot,
    end: TimeSlot,
}

impl TryFrom<SpanRecord> for Span {
    type Error = String;

    fn try_from(record: SpanRecord) -> Result<Self, Self::Error> {
        Span::new(record.start, record.end)
            .ok_or_else(|| format!("span {} - {} must end after it starts", record.start, record.end))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// A contiguous run of slots on one row of a grid.
///
/// `K` is the row key: an [`Assignment`] on the daily grid, a labor row id
/// on the pattern editor. The bounds only change through [`ShiftInterval::set_span`],
/// and inverted bounds are rejected on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "IntervalRecord<K>")]
pub struct ShiftInterval<K> {
    pub id: ShiftId,
    pub row_key: K,
    start: TimeSlot,
    end: TimeSlot,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntervalRecord<K> {
    id: ShiftId,
    row_key: K,
    start: TimeSlot,
    end: TimeSlot,
}

impl<K> TryFrom<IntervalRecord<K>> for ShiftInterval<K> {
    type Error = String;

    fn try_from(record: IntervalRecord<K>) -> Result<Self, Self::Error> {
        let span = Span::new(record.start, record.end).ok_or_else(|| {
            format!("{} must end after it starts ({} - {})", record.id, record.start, record.end)
        })?;
        Ok(Self::new(record.id, record.row_key, span))
    }
}

impl<K> ShiftInterval<K> {
    pub fn new(id: ShiftId, row_key: K, span: Span) -> Self {
        Self {
            id,
            row_key,
            start: span.start,
            end: span.end,
        }
    }

    pub fn start(&self) -> TimeSlot {
        self.start
    }

    pub fn end(&self) -> TimeSlot {
        self.end
    }

    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.end,
        }
    }

    pub fn set_span(&mut self, span: Span) {
        self.start = span.start;
        self.end = span.end;
    }

    pub fn hours(&self) -> f64 {
        self.span().hours()
    }
}

/// Work positions on the daily grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Hall,
    Salad,
    Grill,
    Bento,
    PcPacking,
}

impl Position {
    /// Grid row order.
    pub const ALL: [Position; 5] = [
        Position::Hall,
        Position::Salad,
        Position::Grill,
        Position::Bento,
        Position::PcPacking,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Position::Hall => "ホール",
            Position::Salad => "サラダ",
            Position::Grill => "火場",
            Position::Bento => "お弁当",
            Position::PcPacking => "PC詰め",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Position::Hall => "Hall/Service",
            Position::Salad => "Salad prep",
            Position::Grill => "Cooking/Grill",
            Position::Bento => "Bento assembly",
            Position::PcPacking => "PC Packing/Admin",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Daily row key: one staff member working one position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub staff_id: StaffId,
    pub position: Position,
}

impl Assignment {
    pub fn new(staff_id: impl Into<StaffId>, position: Position) -> Self {
        Self {
            staff_id: staff_id.into(),
            position,
        }
    }
}

/// A shift on the daily grid.
pub type DayShift = ShiftInterval<Assignment>;
