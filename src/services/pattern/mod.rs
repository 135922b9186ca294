// Pattern surface
// Model pattern CRUD plus the interval editor for the selected pattern

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::pattern::{ModelPattern, PatternId, PatternShift, PATTERN_COLORS};
use crate::models::shift::ShiftId;
use crate::models::timeline::Timeline;
use crate::services::interval::{InteractionSession, IntervalHost};
use crate::services::schedule::{resolve_active, PatternSchedule};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("the last remaining pattern cannot be deleted")]
    LastPattern,
    #[error("no pattern with id {0}")]
    UnknownPattern(PatternId),
}

/// Editor for model patterns.
///
/// Always holds at least one pattern. Pointer gestures edit the shifts of the
/// selected pattern; rows are labor slots, so intervals on one row may
/// overlap freely.
#[derive(Debug, Clone)]
pub struct PatternSurface {
    patterns: Vec<ModelPattern>,
    selected: PatternId,
    timeline: Timeline,
    default_slots: u8,
    read_only: bool,
    session: Option<InteractionSession>,
    next_pattern_id: u64,
    next_shift_id: u64,
}

impl PatternSurface {
    /// A surface holding a single empty pattern.
    pub fn new(timeline: Timeline, default_slots: u8) -> Self {
        Self::with_patterns(Vec::new(), timeline, default_slots)
    }

    /// Restore a surface from existing patterns. An empty list is seeded
    /// with one pattern.
    pub fn with_patterns(patterns: Vec<ModelPattern>, timeline: Timeline, default_slots: u8) -> Self {
        let next_pattern_id = patterns.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        let next_shift_id = patterns
            .iter()
            .flat_map(|p| p.shifts.iter().map(|shift| shift.id.0))
            .max()
            .unwrap_or(0)
            + 1;

        let mut surface = Self {
            selected: patterns.first().map(|p| p.id).unwrap_or(PatternId(next_pattern_id)),
            patterns,
            timeline,
            default_slots: default_slots.max(1),
            read_only: false,
            session: None,
            next_pattern_id,
            next_shift_id,
        };
        if surface.patterns.is_empty() {
            surface.create_pattern();
        }
        surface
    }

    pub fn patterns(&self) -> &[ModelPattern] {
        &self.patterns
    }

    pub fn get(&self, id: PatternId) -> Option<&ModelPattern> {
        self.patterns.iter().find(|pattern| pattern.id == id)
    }

    pub fn selected_id(&self) -> PatternId {
        self.selected
    }

    pub fn selected(&self) -> Option<&ModelPattern> {
        self.get(self.selected)
    }

    /// Switch the pattern being edited. Any open drag is abandoned.
    pub fn select(&mut self, id: PatternId) -> Result<(), PatternError> {
        if self.get(id).is_none() {
            return Err(PatternError::UnknownPattern(id));
        }
        self.session = None;
        self.selected = id;
        Ok(())
    }

    /// Add an empty pattern with the next free colour and select it.
    pub fn create_pattern(&mut self) -> PatternId {
        let id = PatternId(self.next_pattern_id);
        self.next_pattern_id += 1;

        let name = format!("パターン {}", self.patterns.len() + 1);
        let color = self.next_color();
        log::info!("Created {} '{}' ({})", id, name, color);
        self.patterns.push(ModelPattern::new(id, name, color));
        self.session = None;
        self.selected = id;
        id
    }

    /// First palette colour no pattern uses yet, cycling once all are taken.
    fn next_color(&self) -> &'static str {
        PATTERN_COLORS
            .iter()
            .copied()
            .find(|color| !self.patterns.iter().any(|p| p.color_tag == *color))
            .unwrap_or(PATTERN_COLORS[self.patterns.len() % PATTERN_COLORS.len()])
    }

    pub fn rename(&mut self, id: PatternId, name: impl Into<String>) -> Result<(), PatternError> {
        let pattern = self
            .patterns
            .iter_mut()
            .find(|pattern| pattern.id == id)
            .ok_or(PatternError::UnknownPattern(id))?;
        pattern.name = name.into();
        Ok(())
    }

    /// Delete a pattern.
    ///
    /// The selection and every schedule entry pointing at the deleted pattern
    /// move to the first remaining pattern, which is returned. The last
    /// pattern can never be deleted.
    pub fn delete(
        &mut self,
        id: PatternId,
        schedule: &mut PatternSchedule,
    ) -> Result<PatternId, PatternError> {
        let index = self
            .patterns
            .iter()
            .position(|pattern| pattern.id == id)
            .ok_or(PatternError::UnknownPattern(id))?;
        if self.patterns.len() <= 1 {
            log::warn!("Refusing to delete last pattern {}", id);
            return Err(PatternError::LastPattern);
        }

        self.patterns.remove(index);
        let fallback = self.patterns[0].id;

        if self.selected == id {
            self.session = None;
            self.selected = fallback;
        }
        let moved = schedule.reassign(id, fallback);
        log::info!("Deleted {}; {} scheduled dates moved to {}", id, moved, fallback);
        Ok(fallback)
    }

    /// Pattern in effect on `date`.
    pub fn active_pattern(&self, schedule: &PatternSchedule, date: NaiveDate) -> Option<&ModelPattern> {
        resolve_active(&self.patterns, schedule, date)
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        if read_only {
            self.session = None;
        }
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn selected_index(&self) -> usize {
        self.patterns
            .iter()
            .position(|pattern| pattern.id == self.selected)
            .unwrap_or(0)
    }
}

impl IntervalHost for PatternSurface {
    type RowKey = String;

    fn timeline(&self) -> Timeline {
        self.timeline
    }

    fn create_slots(&self) -> u8 {
        self.default_slots
    }

    fn shifts(&self) -> &[PatternShift] {
        self.patterns
            .get(self.selected_index())
            .map(|pattern| pattern.shifts.as_slice())
            .unwrap_or(&[])
    }

    fn shifts_mut(&mut self) -> &mut Vec<PatternShift> {
        let index = self.selected_index();
        // never empty: construction seeds a pattern and delete keeps the last
        &mut self.patterns[index].shifts
    }

    fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    fn set_session(&mut self, session: Option<InteractionSession>) {
        self.session = session;
    }

    fn next_shift_id(&mut self) -> ShiftId {
        let id = ShiftId(self.next_shift_id);
        self.next_shift_id += 1;
        id
    }

    fn accepts_gestures(&self) -> bool {
        !self.read_only
    }
}
