//! Persistence collaborator seam.
//!
//! The engine does not own storage. It reads class/assignment data and
//! slot rows through [`ScheduleStore`] and writes committed slots back
//! through the same trait. The CRUD subsystems behind it (directory
//! pages, slot tables) are interchangeable plumbing.
//!
//! # Teacher reservations and concurrency
//!
//! `find_other_assignment` is the cross-class teacher-reservation query:
//! the set of (teacher, day, period) claims committed in *any* class's
//! grid is the one shared resource the scheduler consults. Two
//! auto-schedule runs for different classes executed concurrently each
//! read this state, compute, and write back — a read-modify-write race
//! that can commit a double-booking which only the next read's conflict
//! scan will catch. This crate keeps that relaxed guarantee; a storage
//! implementation may close the race with a uniqueness constraint on
//! (teacher, day, period) over filled slots plus retry-on-conflict.

use std::collections::{BTreeMap, HashMap};

use crate::models::{ClassId, PeriodNo, Slot, SubjectAssignment, Weekday};
use crate::{Result, ScheduleError};

/// Directory record for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    pub class_id: ClassId,
    pub class_name: String,
    pub grade_level: u8,
}

impl ClassInfo {
    pub fn new(class_id: ClassId, class_name: impl Into<String>, grade_level: u8) -> Self {
        Self {
            class_id,
            class_name: class_name.into(),
            grade_level,
        }
    }
}

/// Durable storage of classes, subject assignments, and slot rows.
///
/// Slot rows are keyed by (class, day, period); `save_slots` upserts by
/// that key, and a slot with no subject content clears the stored cell.
pub trait ScheduleStore {
    /// Resolves a class, or `ClassNotFound`.
    fn class_info(&self, class_id: ClassId) -> Result<ClassInfo>;

    /// The class's authorized (subject, teacher) pairings.
    fn subject_assignments(&self, class_id: ClassId) -> Result<Vec<SubjectAssignment>>;

    /// All persisted slot rows for a class, in unspecified order.
    fn load_slots(&self, class_id: ClassId) -> Result<Vec<Slot>>;

    /// Upserts the given slots by (day, period).
    fn save_slots(&mut self, class_id: ClassId, slots: &[Slot]) -> Result<()>;

    /// Drops every slot row for a class.
    fn clear_slots(&mut self, class_id: ClassId) -> Result<()>;

    /// Whether another class has committed the teacher at (day, period).
    ///
    /// Returns the claiming class's name when a filled slot for
    /// `teacher_id` exists at that time in any class other than
    /// `excluding_class` (pass `None` to search all classes).
    fn find_other_assignment(
        &self,
        teacher_id: &str,
        day: Weekday,
        period: PeriodNo,
        excluding_class: Option<ClassId>,
    ) -> Option<String>;
}

/// In-memory reference store, used by tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    classes: HashMap<ClassId, ClassInfo>,
    assignments: HashMap<ClassId, Vec<SubjectAssignment>>,
    slots: HashMap<ClassId, BTreeMap<(Weekday, PeriodNo), Slot>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class in the directory.
    pub fn add_class(&mut self, info: ClassInfo) {
        self.classes.insert(info.class_id, info);
    }

    /// Authorizes a (subject, teacher) pairing for a class.
    pub fn add_assignment(&mut self, class_id: ClassId, assignment: SubjectAssignment) {
        self.assignments.entry(class_id).or_default().push(assignment);
    }
}

impl ScheduleStore for InMemoryStore {
    fn class_info(&self, class_id: ClassId) -> Result<ClassInfo> {
        self.classes
            .get(&class_id)
            .cloned()
            .ok_or(ScheduleError::ClassNotFound(class_id))
    }

    fn subject_assignments(&self, class_id: ClassId) -> Result<Vec<SubjectAssignment>> {
        // A class with no pairings yet is valid; the directory entry is
        // what must exist.
        self.class_info(class_id)?;
        Ok(self.assignments.get(&class_id).cloned().unwrap_or_default())
    }

    fn load_slots(&self, class_id: ClassId) -> Result<Vec<Slot>> {
        self.class_info(class_id)?;
        Ok(self
            .slots
            .get(&class_id)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    fn save_slots(&mut self, class_id: ClassId, slots: &[Slot]) -> Result<()> {
        self.class_info(class_id)?;
        let rows = self.slots.entry(class_id).or_default();
        for slot in slots {
            rows.insert((slot.day, slot.period), slot.clone());
        }
        Ok(())
    }

    fn clear_slots(&mut self, class_id: ClassId) -> Result<()> {
        self.class_info(class_id)?;
        self.slots.remove(&class_id);
        Ok(())
    }

    fn find_other_assignment(
        &self,
        teacher_id: &str,
        day: Weekday,
        period: PeriodNo,
        excluding_class: Option<ClassId>,
    ) -> Option<String> {
        for (&class_id, rows) in &self.slots {
            if Some(class_id) == excluding_class {
                continue;
            }
            let claimed = rows
                .get(&(day, period))
                .is_some_and(|s| s.is_filled() && s.teacher_id.as_deref() == Some(teacher_id));
            if claimed {
                return Some(
                    self.classes
                        .get(&class_id)
                        .map(|c| c.class_name.clone())
                        .unwrap_or_else(|| class_id.to_string()),
                );
            }
        }
        None
    }
}
