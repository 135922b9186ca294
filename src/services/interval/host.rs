// Interval host
// Pointer-event plumbing shared by every grid that edits intervals

use std::fmt;

use crate::models::shift::{ShiftId, ShiftInterval, Span};
use crate::models::timeline::Timeline;

use super::gesture::{classify_gesture, Gesture, TrackMetrics};
use super::session::{begin_session, end_session, update_session, InteractionSession};

/// A grid surface that owns a collection of intervals and at most one open
/// drag session.
///
/// Implementors supply storage and their create policy; the pointer
/// protocol (`pointer_down` / `pointer_move` / `pointer_up`) is shared.
/// Every `pointer_move` writes the candidate straight into the collection.
pub trait IntervalHost {
    type RowKey: Clone + PartialEq + fmt::Debug;

    fn timeline(&self) -> Timeline;

    /// Span of a freshly created interval, in half-hour slots
    fn create_slots(&self) -> u8;

    fn shifts(&self) -> &[ShiftInterval<Self::RowKey>];

    fn shifts_mut(&mut self) -> &mut Vec<ShiftInterval<Self::RowKey>>;

    fn session(&self) -> Option<&InteractionSession>;

    fn set_session(&mut self, session: Option<InteractionSession>);

    fn next_shift_id(&mut self) -> ShiftId;

    /// Whether a newly created interval may be added.
    fn admits(&self, _candidate: &ShiftInterval<Self::RowKey>) -> bool {
        true
    }

    /// Whether pointer-down gestures are currently honoured.
    fn accepts_gestures(&self) -> bool {
        true
    }

    fn classify(
        &self,
        track: &TrackMetrics,
        row_key: &Self::RowKey,
        pointer_x: f32,
    ) -> Option<Gesture<Self::RowKey>> {
        classify_gesture(track, row_key, pointer_x, self.shifts())
    }

    /// Open a session for `gesture`. Returns false when nothing opened:
    /// gestures are disabled, the target is gone, or a create was refused.
    fn pointer_down(&mut self, gesture: Gesture<Self::RowKey>, pointer_x: f32) -> bool {
        if !self.accepts_gestures() {
            return false;
        }

        let snapshot = match gesture.target() {
            Some(target) => match self.shifts().iter().find(|shift| shift.id == target) {
                Some(shift) => Some(shift.clone()),
                None => {
                    log::debug!("Ignoring gesture on unknown {}", target);
                    return false;
                }
            },
            None => None,
        };

        let timeline = self.timeline();
        let create_slots = self.create_slots();
        let Some(start) = begin_session(
            gesture,
            snapshot.as_ref(),
            pointer_x,
            timeline,
            create_slots,
            || self.next_shift_id(),
        ) else {
            return false;
        };

        if let Some(created) = start.created {
            if !self.admits(&created) {
                log::debug!("Create of {} at {} refused", created.id, created.span());
                return false;
            }
            self.shifts_mut().push(created);
        }

        self.set_session(Some(start.session));
        true
    }

    /// Classify and open in one step.
    fn pointer_down_at(
        &mut self,
        track: &TrackMetrics,
        row_key: &Self::RowKey,
        pointer_x: f32,
    ) -> bool {
        match self.classify(track, row_key, pointer_x) {
            Some(gesture) => self.pointer_down(gesture, pointer_x),
            None => false,
        }
    }

    /// Recompute the dragged interval and store it. `None` when no session is open.
    fn pointer_move(&mut self, pointer_x: f32, grid_width: f32) -> Option<Span> {
        let session = *self.session()?;
        let span = update_session(&session, pointer_x, grid_width, session.bounds.slot_count());

        match self.shifts_mut().iter_mut().find(|shift| shift.id == session.target) {
            Some(shift) => {
                shift.set_span(span);
                Some(span)
            }
            None => {
                log::warn!("{} vanished mid-drag; closing session", session.target);
                self.set_session(None);
                None
            }
        }
    }

    /// Close the open session, returning the interval it edited.
    fn pointer_up(&mut self) -> Option<ShiftId> {
        let session = *self.session()?;
        self.set_session(None);
        Some(end_session(session))
    }

    /// Remove one interval. A session editing it is closed.
    fn remove_shift(&mut self, id: ShiftId) -> bool {
        if self.session().is_some_and(|session| session.target == id) {
            self.set_session(None);
        }
        let shifts = self.shifts_mut();
        let before = shifts.len();
        shifts.retain(|shift| shift.id != id);
        before != shifts.len()
    }
}
