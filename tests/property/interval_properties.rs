// Property-based tests for the interval engine
// Every candidate span stays inside the timeline whatever the pointer does

use proptest::prelude::*;
use shift_board::models::shift::{ShiftId, ShiftInterval, Span};
use shift_board::models::timeline::{TimeSlot, Timeline};
use shift_board::services::interval::{begin_session, update_session, Edge, Gesture, InteractionSession};

const OPEN: u8 = 12;
const CLOSE: u8 = 48;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Create { min_slots: u8 },
    Move,
    ResizeStart,
    ResizeEnd,
}

fn kind_strategy() -> impl Strategy<Value = Kind> {
    prop_oneof![
        (1u8..=4).prop_map(|min_slots| Kind::Create { min_slots }),
        Just(Kind::Move),
        Just(Kind::ResizeStart),
        Just(Kind::ResizeEnd),
    ]
}

fn span_strategy() -> impl Strategy<Value = Span> {
    (OPEN..CLOSE)
        .prop_flat_map(|start| (Just(start), (start + 1)..=CLOSE))
        .prop_map(|(start, end)| {
            Span::new(
                TimeSlot::from_half_hours(start).unwrap(),
                TimeSlot::from_half_hours(end).unwrap(),
            )
            .unwrap()
        })
}

fn open_session(kind: Kind, span: Span, origin_x: f32) -> InteractionSession {
    let shift = ShiftInterval::new(ShiftId(1), "h1", span);
    let (gesture, create_slots) = match kind {
        Kind::Create { min_slots } => (Gesture::Create { row_key: "h1", at: span.start() }, min_slots),
        Kind::Move => (Gesture::Move { target: ShiftId(1) }, 1),
        Kind::ResizeStart => (Gesture::Resize { target: ShiftId(1), edge: Edge::Start }, 1),
        Kind::ResizeEnd => (Gesture::Resize { target: ShiftId(1), edge: Edge::End }, 1),
    };
    begin_session(gesture, Some(&shift), origin_x, Timeline::default(), create_slots, || ShiftId(2))
        .unwrap()
        .session
}

proptest! {
    /// Property: every candidate is at least one slot long and inside opening hours
    #[test]
    fn prop_candidate_within_bounds(
        kind in kind_strategy(),
        span in span_strategy(),
        origin in -2000.0f32..2000.0,
        pointer in -6000.0f32..6000.0,
        width in 1.0f32..5000.0,
    ) {
        let session = open_session(kind, span, origin);
        let candidate = update_session(&session, pointer, width, CLOSE - OPEN);

        prop_assert!(candidate.start().half_hours() >= OPEN);
        prop_assert!(candidate.end().half_hours() <= CLOSE);
        prop_assert!(candidate.end() > candidate.start());
        prop_assert_eq!((candidate.start().hours() * 2.0).fract(), 0.0);
        prop_assert_eq!((candidate.end().hours() * 2.0).fract(), 0.0);
    }

    /// Property: moving never changes the duration
    #[test]
    fn prop_move_preserves_duration(
        span in span_strategy(),
        pointer in -6000.0f32..6000.0,
        width in 1.0f32..5000.0,
    ) {
        let session = open_session(Kind::Move, span, 0.0);
        let candidate = update_session(&session, pointer, width, CLOSE - OPEN);
        prop_assert_eq!(candidate.slots(), span.slots());
    }

    /// Property: resizing moves only the dragged edge and never inverts
    #[test]
    fn prop_resize_never_inverts(
        span in span_strategy(),
        pointer in -6000.0f32..6000.0,
        width in 1.0f32..5000.0,
    ) {
        let start_drag = update_session(&open_session(Kind::ResizeStart, span, 0.0), pointer, width, CLOSE - OPEN);
        prop_assert_eq!(start_drag.end(), span.end());
        prop_assert!(start_drag.start() < start_drag.end());

        let end_drag = update_session(&open_session(Kind::ResizeEnd, span, 0.0), pointer, width, CLOSE - OPEN);
        prop_assert_eq!(end_drag.start(), span.start());
        prop_assert!(end_drag.end() > end_drag.start());
    }

    /// Property: repeating an update with the same pointer gives the same span
    #[test]
    fn prop_update_is_idempotent(
        kind in kind_strategy(),
        span in span_strategy(),
        pointer in -6000.0f32..6000.0,
        width in 1.0f32..5000.0,
    ) {
        let session = open_session(kind, span, 100.0);
        let once = update_session(&session, pointer, width, CLOSE - OPEN);
        let twice = update_session(&session, pointer, width, CLOSE - OPEN);
        prop_assert_eq!(once, twice);
    }

    /// Property: a create without movement has the default length, unless cut by closing
    #[test]
    fn prop_create_without_movement_has_default_length(
        span in span_strategy(),
        min_slots in 1u8..=4,
        width in 1.0f32..5000.0,
    ) {
        let session = open_session(Kind::Create { min_slots }, span, 250.0);
        let candidate = update_session(&session, 250.0, width, CLOSE - OPEN);

        let anchor = span.start().half_hours();
        let expected_end = (anchor + min_slots).min(CLOSE);
        prop_assert_eq!(candidate.start(), span.start());
        prop_assert_eq!(candidate.end().half_hours(), expected_end);
    }
}
