// Daily schedule surface
// The (staff x position) grid for one concrete date

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::shift::{Assignment, DayShift, Position, ShiftId, ShiftInterval, Span};
use crate::models::staff::StaffId;
use crate::models::timeline::{TimeSlot, Timeline};
use crate::services::interval::{InteractionSession, IntervalHost};

/// Payload carried by a drag from the staff pool or from an existing shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub staff_id: StaffId,
    /// Present when an existing assignment is being moved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<ShiftId>,
}

impl DragPayload {
    pub fn new_assignment(staff_id: impl Into<StaffId>) -> Self {
        Self {
            staff_id: staff_id.into(),
            shift_id: None,
        }
    }

    pub fn existing(staff_id: impl Into<StaffId>, shift_id: ShiftId) -> Self {
        Self {
            staff_id: staff_id.into(),
            shift_id: Some(shift_id),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Grid cell a payload was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub slot: TimeSlot,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Created(ShiftId),
    Moved(ShiftId),
    /// Overlaps an existing shift of the same staff and position
    Rejected,
    /// Unknown shift or a target outside the grid
    Ignored,
}

/// Assignments for one date.
#[derive(Debug, Clone)]
pub struct DailyScheduleSurface {
    date: NaiveDate,
    timeline: Timeline,
    default_slots: u8,
    shifts: Vec<DayShift>,
    session: Option<InteractionSession>,
    next_id: u64,
}

impl DailyScheduleSurface {
    pub fn new(date: NaiveDate, timeline: Timeline, default_slots: u8) -> Self {
        Self {
            date,
            timeline,
            default_slots: default_slots.max(1),
            shifts: Vec::new(),
            session: None,
            next_id: 1,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn get(&self, id: ShiftId) -> Option<&DayShift> {
        self.shifts.iter().find(|shift| shift.id == id)
    }

    /// Whether a new span for `assignment` collides with one of its existing shifts.
    pub fn conflicts(&self, assignment: &Assignment, span: &Span) -> bool {
        self.shifts
            .iter()
            .any(|shift| &shift.row_key == assignment && shift.span().overlaps(span))
    }

    /// Handle a drop from the staff pool or from an existing shift.
    ///
    /// With a `shift_id` the shift moves to the target cell and position,
    /// keeping its duration; a move that would run past closing is pulled
    /// back to end at closing. Without one a default-length shift is created
    /// unless it overlaps the same staff's shift in the same position.
    pub fn drop_staff(&mut self, payload: &DragPayload, target: DropTarget) -> DropOutcome {
        if !self.timeline.has_cell(target.slot) {
            log::debug!("Drop outside operating hours at {}", target.slot);
            return DropOutcome::Ignored;
        }

        match payload.shift_id {
            Some(id) => self.move_to(id, target),
            None => self.create_at(&payload.staff_id, target),
        }
    }

    fn move_to(&mut self, id: ShiftId, target: DropTarget) -> DropOutcome {
        let open = i32::from(self.timeline.open().half_hours());
        let close = i32::from(self.timeline.close().half_hours());

        let Some(shift) = self.shifts.iter_mut().find(|shift| shift.id == id) else {
            log::debug!("Drop refers to unknown {}", id);
            return DropOutcome::Ignored;
        };

        let duration = i32::from(shift.span().slots());
        let mut start = i32::from(target.slot.half_hours());
        let mut end = start + duration;
        if end > close {
            end = close;
            start = (close - duration).max(open);
        }

        let Some(span) = Span::from_half_hours(start, end) else {
            return DropOutcome::Ignored;
        };
        shift.set_span(span);
        shift.row_key.position = target.position;
        log::debug!("Moved {} to {} {}", id, target.position, span);
        DropOutcome::Moved(id)
    }

    fn create_at(&mut self, staff_id: &StaffId, target: DropTarget) -> DropOutcome {
        let close = i32::from(self.timeline.close().half_hours());
        let start = i32::from(target.slot.half_hours());
        let end = (start + i32::from(self.default_slots)).min(close);
        let Some(span) = Span::from_half_hours(start, end) else {
            return DropOutcome::Ignored;
        };

        let assignment = Assignment::new(staff_id.clone(), target.position);
        if self.conflicts(&assignment, &span) {
            log::debug!("Rejected overlapping {} for {} on {}", span, staff_id, self.date);
            return DropOutcome::Rejected;
        }

        let id = self.next_shift_id();
        self.shifts.push(ShiftInterval::new(id, assignment, span));
        log::debug!("Created {} for {} at {}", id, staff_id, span);
        DropOutcome::Created(id)
    }

    /// Total hours scheduled in one position, across all staff.
    pub fn position_hours(&self, position: Position) -> f64 {
        self.shifts
            .iter()
            .filter(|shift| shift.row_key.position == position)
            .map(DayShift::hours)
            .sum()
    }

    /// Total hours scheduled for one staff member.
    pub fn staff_hours(&self, staff_id: &StaffId) -> f64 {
        self.shifts
            .iter()
            .filter(|shift| &shift.row_key.staff_id == staff_id)
            .map(DayShift::hours)
            .sum()
    }

    /// Shifts drawn on one position row, in start order.
    pub fn shifts_in(&self, position: Position) -> Vec<&DayShift> {
        let mut row: Vec<_> = self
            .shifts
            .iter()
            .filter(|shift| shift.row_key.position == position)
            .collect();
        row.sort_by_key(|shift| (shift.start(), shift.end()));
        row
    }
}

impl IntervalHost for DailyScheduleSurface {
    type RowKey = Assignment;

    fn timeline(&self) -> Timeline {
        self.timeline
    }

    fn create_slots(&self) -> u8 {
        self.default_slots
    }

    fn shifts(&self) -> &[DayShift] {
        &self.shifts
    }

    fn shifts_mut(&mut self) -> &mut Vec<DayShift> {
        &mut self.shifts
    }

    fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    fn set_session(&mut self, session: Option<InteractionSession>) {
        self.session = session;
    }

    fn next_shift_id(&mut self) -> ShiftId {
        let id = ShiftId(self.next_id);
        self.next_id += 1;
        id
    }

    fn admits(&self, candidate: &DayShift) -> bool {
        !self.conflicts(&candidate.row_key, &candidate.span())
    }
}
