// Shift board
// Wires the daily grids, pattern editor, pattern calendar and advice together

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::pattern::{ModelPattern, PatternId};
use crate::models::settings::Settings;
use crate::models::shift::DayShift;
use crate::models::staff::Roster;
use crate::models::timeline::{Timeline, TimelineError};
use crate::services::advice::{AdviceGate, AdviceService, AdviceTransport};
use crate::services::daily::DailyScheduleSurface;
use crate::services::holiday::{DayKind, HolidayCalendar};
use crate::services::interval::IntervalHost;
use crate::services::pattern::{PatternError, PatternSurface};
use crate::services::schedule::{BulkPolicy, PatternSchedule};
use crate::utils::date::YearMonth;

/// Everything needed to send one advice request, detached from the board so
/// it can run off the UI thread.
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub date: NaiveDate,
    pub shifts: Vec<DayShift>,
    pub roster: Roster,
}

impl AdviceRequest {
    pub fn send<T: AdviceTransport>(&self, service: &AdviceService<T>) -> String {
        service.request_advice(self.date, &self.shifts, &self.roster)
    }
}

pub struct ShiftBoard {
    settings: Settings,
    timeline: Timeline,
    roster: Roster,
    holidays: HolidayCalendar,
    days: BTreeMap<NaiveDate, DailyScheduleSurface>,
    patterns: PatternSurface,
    schedule: PatternSchedule,
    advice_gate: AdviceGate,
}

impl ShiftBoard {
    pub fn new(settings: Settings, roster: Roster) -> Result<Self, TimelineError> {
        let timeline = settings.timeline()?;
        let patterns = PatternSurface::new(timeline, settings.pattern_default_slots());
        Ok(Self {
            settings,
            timeline,
            roster,
            holidays: HolidayCalendar::japanese(),
            days: BTreeMap::new(),
            patterns,
            schedule: PatternSchedule::new(),
            advice_gate: AdviceGate::default(),
        })
    }

    pub fn with_holidays(mut self, holidays: HolidayCalendar) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    pub fn day_kind(&self, date: NaiveDate) -> DayKind {
        self.holidays.classify(date)
    }

    /// The daily grid for `date`, if anything has been scheduled there.
    pub fn day(&self, date: NaiveDate) -> Option<&DailyScheduleSurface> {
        self.days.get(&date)
    }

    /// The daily grid for `date`, created empty on first access.
    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DailyScheduleSurface {
        let timeline = self.timeline;
        let default_slots = self.settings.daily_default_slots();
        self.days
            .entry(date)
            .or_insert_with(|| DailyScheduleSurface::new(date, timeline, default_slots))
    }

    pub fn patterns(&self) -> &PatternSurface {
        &self.patterns
    }

    /// Pattern editor access. Deletion must go through [`ShiftBoard::delete_pattern`].
    pub fn patterns_mut(&mut self) -> &mut PatternSurface {
        &mut self.patterns
    }

    pub fn schedule(&self) -> &PatternSchedule {
        &self.schedule
    }

    pub fn delete_pattern(&mut self, id: PatternId) -> Result<PatternId, PatternError> {
        self.patterns.delete(id, &mut self.schedule)
    }

    pub fn active_pattern(&self, date: NaiveDate) -> Option<&ModelPattern> {
        self.patterns.active_pattern(&self.schedule, date)
    }

    pub fn assign_pattern(&mut self, date: NaiveDate, pattern: PatternId) -> Result<(), PatternError> {
        self.ensure_pattern(pattern)?;
        self.schedule.assign(date, pattern);
        Ok(())
    }

    pub fn unassign_pattern(&mut self, date: NaiveDate) -> Option<PatternId> {
        self.schedule.unassign(date)
    }

    pub fn apply_bulk(
        &mut self,
        month: YearMonth,
        policy: BulkPolicy,
        pattern: PatternId,
    ) -> Result<usize, PatternError> {
        self.ensure_pattern(pattern)?;
        Ok(self.schedule.apply_bulk(month, policy, pattern, &self.holidays))
    }

    pub fn clear_month(&mut self, month: YearMonth) -> usize {
        self.schedule.clear_month(month)
    }

    fn ensure_pattern(&self, pattern: PatternId) -> Result<(), PatternError> {
        match self.patterns.get(pattern) {
            Some(_) => Ok(()),
            None => Err(PatternError::UnknownPattern(pattern)),
        }
    }

    /// Snapshot the day for an advice request. `None` while another request
    /// is outstanding.
    pub fn begin_advice(&mut self, date: NaiveDate) -> Option<AdviceRequest> {
        if !self.advice_gate.try_begin() {
            return None;
        }
        let shifts = self
            .days
            .get(&date)
            .map(|day| day.shifts().to_vec())
            .unwrap_or_default();
        Some(AdviceRequest {
            date,
            shifts,
            roster: self.roster.clone(),
        })
    }

    pub fn finish_advice(&mut self) {
        self.advice_gate.finish();
    }

    pub fn advice_loading(&self) -> bool {
        self.advice_gate.is_loading()
    }
}
