// Model pattern module
// Reusable, date-independent shift templates laid out on fixed labor rows

use serde::{Deserialize, Serialize};
use std::fmt;

use super::shift::ShiftInterval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(pub u64);

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern-{}", self.0)
    }
}

/// A fixed lane of the pattern editor. Rows stand for labor slots, not people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaborRow {
    pub id: &'static str,
    pub label: &'static str,
}

pub const LABOR_ROWS: [LaborRow; 8] = [
    LaborRow { id: "h1", label: "ホール①" },
    LaborRow { id: "h2", label: "ホール②" },
    LaborRow { id: "h3", label: "ホール③" },
    LaborRow { id: "h4", label: "ホール④" },
    LaborRow { id: "k1", label: "キッチン①" },
    LaborRow { id: "k2", label: "キッチン②" },
    LaborRow { id: "k3", label: "キッチン③" },
    LaborRow { id: "k4", label: "キッチン④" },
];

pub fn labor_row(id: &str) -> Option<&'static LaborRow> {
    LABOR_ROWS.iter().find(|row| row.id == id)
}

/// Colour tags handed out to new patterns, in order.
pub const PATTERN_COLORS: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
];

/// A shift on the pattern editor, keyed by labor row id.
pub type PatternShift = ShiftInterval<String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPattern {
    pub id: PatternId,
    pub name: String,
    pub color_tag: String,
    pub shifts: Vec<PatternShift>,
}

impl ModelPattern {
    pub fn new(id: PatternId, name: impl Into<String>, color_tag: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color_tag: color_tag.into(),
            shifts: Vec::new(),
        }
    }

    /// Total hours scheduled on one labor row.
    pub fn row_hours(&self, row_id: &str) -> f64 {
        self.shifts
            .iter()
            .filter(|shift| shift.row_key == row_id)
            .map(PatternShift::hours)
            .sum()
    }

    /// Total hours across every row.
    pub fn total_hours(&self) -> f64 {
        self.shifts.iter().map(PatternShift::hours).sum()
    }
}
