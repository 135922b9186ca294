//! Pointer-down classification.
//!
//! Maps a pointer position on a grid row to the gesture it starts:
//! an empty cell creates, an interval body moves, and a thin band at either
//! end of an interval resizes that edge.

use serde::{Deserialize, Serialize};

use crate::models::shift::{ShiftId, ShiftInterval};
use crate::models::timeline::{TimeSlot, Timeline};

/// Width of the resize hit area at each end of an interval, in pixels
pub const HANDLE_WIDTH: f32 = 12.0;

/// Which end of an interval a resize drags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Start,
    End,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gesture<K> {
    Create { row_key: K, at: TimeSlot },
    Move { target: ShiftId },
    Resize { target: ShiftId, edge: Edge },
}

impl<K> Gesture<K> {
    pub fn target(&self) -> Option<ShiftId> {
        match self {
            Gesture::Create { .. } => None,
            Gesture::Move { target } | Gesture::Resize { target, .. } => Some(*target),
        }
    }
}

/// Horizontal layout of a grid's time track, as measured by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackMetrics {
    /// Pixel x of the opening-time edge
    pub left: f32,
    /// Pixel width of the whole track
    pub width: f32,
    pub timeline: Timeline,
}

impl TrackMetrics {
    pub fn new(left: f32, width: f32, timeline: Timeline) -> Self {
        Self { left, width, timeline }
    }

    pub fn pixels_per_slot(&self) -> f32 {
        self.width / f32::from(self.timeline.slot_count())
    }

    /// The cell under a pointer x, if the pointer is over the track.
    pub fn slot_at(&self, x: f32) -> Option<TimeSlot> {
        let per_slot = self.pixels_per_slot();
        if !(per_slot > 0.0) || !x.is_finite() {
            return None;
        }
        let offset = x - self.left;
        if offset < 0.0 || offset >= self.width {
            return None;
        }
        let index = (offset / per_slot).floor() as u8;
        TimeSlot::from_half_hours(self.timeline.open().half_hours() + index)
            .filter(|slot| self.timeline.has_cell(*slot))
    }

    /// Pixel x of a slot boundary.
    pub fn x_of(&self, slot: TimeSlot) -> f32 {
        let from_open = f32::from(slot.half_hours()) - f32::from(self.timeline.open().half_hours());
        self.left + from_open * self.pixels_per_slot()
    }
}

/// Classify a pointer-down on `row_key` at `pointer_x`.
///
/// Returns `None` when the pointer is not over the track. Later intervals in
/// `shifts` are drawn on top, so they win hit tests.
pub fn classify_gesture<K: Clone + PartialEq>(
    metrics: &TrackMetrics,
    row_key: &K,
    pointer_x: f32,
    shifts: &[ShiftInterval<K>],
) -> Option<Gesture<K>> {
    let slot = metrics.slot_at(pointer_x)?;

    for shift in shifts.iter().rev().filter(|shift| &shift.row_key == row_key) {
        let left = metrics.x_of(shift.start());
        let right = metrics.x_of(shift.end());
        if pointer_x < left || pointer_x > right {
            continue;
        }

        let from_left = pointer_x - left;
        let from_right = right - pointer_x;
        let gesture = if from_left <= HANDLE_WIDTH && from_left <= from_right {
            Gesture::Resize { target: shift.id, edge: Edge::Start }
        } else if from_right <= HANDLE_WIDTH {
            Gesture::Resize { target: shift.id, edge: Edge::End }
        } else {
            Gesture::Move { target: shift.id }
        };
        return Some(gesture);
    }

    Some(Gesture::Create {
        row_key: row_key.clone(),
        at: slot,
    })
}
