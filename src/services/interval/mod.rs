// Interval engine
// Turns pointer drags into half-hour quantised interval edits

mod gesture;
mod host;
mod session;

pub use gesture::{classify_gesture, Edge, Gesture, TrackMetrics, HANDLE_WIDTH};
pub use host::IntervalHost;
pub use session::{
    begin_session, end_session, update_session, InteractionSession, SessionMode, SessionStart,
};
