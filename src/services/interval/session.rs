//! Drag sessions: begin, update, end.
//!
//! A session records where a gesture started and what the interval looked
//! like at that moment. Every pointer move recomputes the candidate span from
//! that snapshot and the total pointer travel, so updates never accumulate
//! rounding error and repeating an update is harmless.

use crate::models::shift::{ShiftId, ShiftInterval, Span};
use crate::models::timeline::{TimeSlot, Timeline};

use super::gesture::{Edge, Gesture};

/// Largest pointer travel honoured in one update, in slots.
const MAX_SLOT_DELTA: f32 = 96.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    /// Drag-to-size a freshly created interval from a fixed anchor cell
    Create {
        anchor: TimeSlot,
        /// Length of a create that ends with no pointer travel
        min_slots: u8,
    },
    Move,
    Resize { edge: Edge },
}

/// State of one in-progress drag, from pointer-down to pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionSession {
    pub mode: SessionMode,
    pub target: ShiftId,
    /// Span of the target when the session began
    pub initial: Span,
    pub origin_x: f32,
    pub bounds: Timeline,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionStart<K> {
    pub session: InteractionSession,
    /// The interval synthesised by a create gesture
    pub created: Option<ShiftInterval<K>>,
}

/// Open a session for a classified gesture.
///
/// Move and resize need the current state of their target in `snapshot`;
/// without it (or if it does not match the gesture's target) no session
/// opens. Create synthesises a `create_slots` long interval at the clicked
/// cell, clamped to the timeline, with an id from `new_id`.
pub fn begin_session<K>(
    gesture: Gesture<K>,
    snapshot: Option<&ShiftInterval<K>>,
    pointer_x: f32,
    bounds: Timeline,
    create_slots: u8,
    new_id: impl FnOnce() -> ShiftId,
) -> Option<SessionStart<K>> {
    match gesture {
        Gesture::Create { row_key, at } => {
            let open = i32::from(bounds.open().half_hours());
            let close = i32::from(bounds.close().half_hours());
            let anchor = i32::from(at.half_hours()).clamp(open, close - 1);
            let min_slots = create_slots.max(1);
            let end = (anchor + i32::from(min_slots)).min(close);
            let initial = Span::from_half_hours(anchor, end)?;

            let id = new_id();
            let session = InteractionSession {
                mode: SessionMode::Create {
                    anchor: initial.start(),
                    min_slots,
                },
                target: id,
                initial,
                origin_x: pointer_x,
                bounds,
            };
            log::debug!("Create session for {} at {}", id, initial);
            Some(SessionStart {
                session,
                created: Some(ShiftInterval::new(id, row_key, initial)),
            })
        }
        Gesture::Move { target } => {
            existing_session(target, SessionMode::Move, snapshot, pointer_x, bounds)
        }
        Gesture::Resize { target, edge } => {
            existing_session(target, SessionMode::Resize { edge }, snapshot, pointer_x, bounds)
        }
    }
}

fn existing_session<K>(
    target: ShiftId,
    mode: SessionMode,
    snapshot: Option<&ShiftInterval<K>>,
    pointer_x: f32,
    bounds: Timeline,
) -> Option<SessionStart<K>> {
    let shift = snapshot.filter(|shift| shift.id == target)?;
    log::debug!("{:?} session for {} at {}", mode, target, shift.span());
    Some(SessionStart {
        session: InteractionSession {
            mode,
            target,
            initial: shift.span(),
            origin_x: pointer_x,
            bounds,
        },
        created: None,
    })
}

/// Candidate span for the pointer at `pointer_x`.
///
/// One slot width of travel (`grid_width / slot_count` pixels) shifts the
/// dragged edge by one half hour. A degenerate grid yields the initial span.
pub fn update_session(
    session: &InteractionSession,
    pointer_x: f32,
    grid_width: f32,
    slot_count: u8,
) -> Span {
    let per_slot = grid_width / f32::from(slot_count);
    if !(per_slot > 0.0) || !per_slot.is_finite() || !pointer_x.is_finite() {
        return session.initial;
    }

    let delta = ((pointer_x - session.origin_x) / per_slot)
        .round()
        .clamp(-MAX_SLOT_DELTA, MAX_SLOT_DELTA) as i32;

    let open = i32::from(session.bounds.open().half_hours());
    let close = i32::from(session.bounds.close().half_hours());
    let initial_start = i32::from(session.initial.start().half_hours());
    let initial_end = i32::from(session.initial.end().half_hours());

    let (start, end) = match session.mode {
        SessionMode::Move => {
            let duration = initial_end - initial_start;
            let latest = (close - duration).max(open);
            let start = (initial_start + delta).clamp(open, latest);
            (start, start + duration)
        }
        SessionMode::Resize { edge: Edge::Start } => {
            let latest = (initial_end - 1).max(open);
            ((initial_start + delta).clamp(open, latest), initial_end)
        }
        SessionMode::Resize { edge: Edge::End } => {
            let earliest = (initial_start + 1).min(close);
            (initial_start, (initial_end + delta).clamp(earliest, close))
        }
        SessionMode::Create { anchor, min_slots } => {
            let anchor = i32::from(anchor.half_hours());
            // the anchor cell itself counts as filled when dragging forward
            let dragged = anchor + delta + i32::from(delta >= 0);
            let start = anchor.min(dragged);
            let mut end = anchor.max(dragged);
            // a click without travel takes the surface default length
            if delta == 0 {
                end = end.max(start + i32::from(min_slots));
            }
            (start, end)
        }
    };

    fit(start, end, &session.bounds).unwrap_or(session.initial)
}

/// Close a session. The last candidate from [`update_session`] stands.
pub fn end_session(session: InteractionSession) -> ShiftId {
    log::debug!("{:?} session for {} closed", session.mode, session.target);
    session.target
}

/// Clamp into the timeline, keeping at least one slot.
fn fit(start: i32, end: i32, bounds: &Timeline) -> Option<Span> {
    let close = i32::from(bounds.close().half_hours());
    let mut start = bounds.clamp_half_hours(start);
    let mut end = bounds.clamp_half_hours(end);
    if end - start < 1 {
        if end < close {
            end = start + 1;
        } else {
            start = end - 1;
        }
    }
    Span::from_half_hours(start, end)
}
