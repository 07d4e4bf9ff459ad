//! Slot and schedule grid models.
//!
//! A `Slot` is one (day, period) cell in a class's weekly grid; a
//! `ScheduleGrid` is the complete set of slots for one class. Grids are
//! always day-major then period-ordered and cover every (day, period)
//! pair the policy defines, break periods included.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{PeriodDef, SubjectAssignment};

/// Class identifier.
pub type ClassId = u32;
/// Subject identifier.
pub type SubjectId = u32;
/// Teacher identifier (external directory key).
pub type TeacherId = String;
/// Period number within a day (1-based).
pub type PeriodNo = u8;

/// Day of week.
///
/// Serialized in the upper-case wire form used by the surrounding
/// application (`"MONDAY"`, `"TUESDAY"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Display name ("Monday", "Tuesday", ...).
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One (day, period) cell in a class's weekly grid.
///
/// A slot is *filled* iff both `subject_id` and `teacher_id` are present.
/// Break slots never carry assignable content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub day: Weekday,
    pub period: PeriodNo,
    /// Start of the period, "HH:MM".
    pub start_time: String,
    /// End of the period, "HH:MM".
    pub end_time: String,
    pub is_break: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<SubjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<TeacherId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
}

impl Slot {
    /// Creates an empty slot for a (day, period) pair.
    pub fn empty(day: Weekday, def: &PeriodDef) -> Self {
        Self {
            day,
            period: def.period,
            start_time: def.start_time.clone(),
            end_time: def.end_time.clone(),
            is_break: def.is_break,
            subject_id: None,
            subject_name: None,
            teacher_id: None,
            teacher_name: None,
        }
    }

    /// Whether the slot carries a committed subject/teacher pair.
    #[inline]
    pub fn is_filled(&self) -> bool {
        !self.is_break && self.subject_id.is_some() && self.teacher_id.is_some()
    }

    /// Fills the slot from a subject assignment.
    pub fn assign(&mut self, assignment: &SubjectAssignment) {
        self.subject_id = Some(assignment.subject_id);
        self.subject_name = Some(assignment.subject_name.clone());
        self.teacher_id = Some(assignment.teacher_id.clone());
        self.teacher_name = Some(assignment.teacher_name.clone());
    }

    /// Clears the subject/teacher content, leaving the cell free.
    pub fn clear(&mut self) {
        self.subject_id = None;
        self.subject_name = None;
        self.teacher_id = None;
        self.teacher_name = None;
    }
}

/// The complete slot set for one class for the active week.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGrid {
    pub class_id: ClassId,
    pub class_name: String,
    pub grade_level: u8,
    /// Day-major, period-ordered; one entry per (day, period) pair.
    pub slots: Vec<Slot>,
}

impl ScheduleGrid {
    /// Looks up the slot at (day, period).
    pub fn slot_at(&self, day: Weekday, period: PeriodNo) -> Option<&Slot> {
        self.slots
            .iter()
            .find(|s| s.day == day && s.period == period)
    }

    /// Mutable lookup at (day, period).
    pub fn slot_at_mut(&mut self, day: Weekday, period: PeriodNo) -> Option<&mut Slot> {
        self.slots
            .iter_mut()
            .find(|s| s.day == day && s.period == period)
    }

    /// Iterates filled, non-break slots in grid order.
    pub fn filled_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| s.is_filled())
    }

    /// Number of filled, non-break periods for a subject across the week.
    pub fn subject_period_count(&self, subject_id: SubjectId) -> usize {
        self.filled_slots()
            .filter(|s| s.subject_id == Some(subject_id))
            .count()
    }

    /// Clears every filled slot, keeping the grid skeleton intact.
    pub fn clear_filled(&mut self) {
        for slot in &mut self.slots {
            if slot.is_filled() {
                slot.clear();
            }
        }
    }
}
