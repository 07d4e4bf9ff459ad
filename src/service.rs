//! The public timetable operations.
//!
//! `TimetableService` wires the grid builder, requirement resolver,
//! greedy scheduler, conflict detector, repair pass, and edit validator
//! over one [`ScheduleStore`]. All four operations return the same
//! [`ClassTimetable`] shape: the full grid, per-subject summaries, and
//! the conflicts derived from current state.

use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};

use crate::conflicts::detect_conflicts;
use crate::edit::{validate_edit, SlotEdit};
use crate::grid::build_grid;
use crate::models::{
    ClassId, Conflict, PeriodNo, ScheduleGrid, Slot, SubjectSummary, Weekday, WeekPolicy,
};
use crate::repair::repair_overcrowding;
use crate::requirements::{resolve_priority, resolve_requirements};
use crate::scheduler::{AutoScheduleOptions, GreedyScheduler};
use crate::store::ScheduleStore;
use crate::{Result, ScheduleError};

/// A class's complete timetable state on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTimetable {
    pub class_id: ClassId,
    pub class_name: String,
    pub grade_level: u8,
    pub slots: Vec<Slot>,
    pub subjects: Vec<SubjectSummary>,
    pub conflicts: Vec<Conflict>,
}

/// One cell of a teacher's weekly availability matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherAvailability {
    pub day: Weekday,
    pub period: PeriodNo,
    pub available: bool,
}

/// Timetable engine facade over a persistence collaborator.
#[derive(Debug)]
pub struct TimetableService<S: ScheduleStore> {
    store: S,
    policy: WeekPolicy,
}

impl<S: ScheduleStore> TimetableService<S> {
    /// Creates a service with the standard school-week policy.
    pub fn new(store: S) -> Self {
        Self::with_policy(store, WeekPolicy::standard())
    }

    pub fn with_policy(store: S, policy: WeekPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &WeekPolicy {
        &self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current timetable plus freshly derived conflicts.
    pub fn get_timetable(&self, class_id: ClassId) -> Result<ClassTimetable> {
        let info = self.store.class_info(class_id)?;
        let prior = self.store.load_slots(class_id)?;
        let grid = build_grid(&info, &self.policy, &prior);
        self.timetable_from(grid)
    }

    /// Auto-generates the class's weekly schedule.
    ///
    /// With `preserve_existing` off (the default) all persisted slots
    /// are discarded first; otherwise pre-filled slots are immovable and
    /// only gaps are filled. Filled slots are committed to the store and
    /// the result is the same shape as [`Self::get_timetable`].
    pub fn auto_schedule(
        &mut self,
        class_id: ClassId,
        options: AutoScheduleOptions,
    ) -> Result<ClassTimetable> {
        let info = self.store.class_info(class_id)?;
        let assignments = self.store.subject_assignments(class_id)?;

        let prior = if options.preserve_existing {
            self.store.load_slots(class_id)?
        } else {
            self.store.clear_slots(class_id)?;
            Vec::new()
        };

        let mut grid = build_grid(&info, &self.policy, &prior);
        let requirements = resolve_requirements(&self.policy, &assignments);
        GreedyScheduler::with_options(options).fill(
            &self.policy,
            &mut grid,
            &requirements,
            &self.store,
        );

        let filled: Vec<Slot> = grid.filled_slots().cloned().collect();
        info!(
            "auto-scheduled class {}: {} filled slots across {} subjects",
            class_id,
            filled.len(),
            requirements.len()
        );
        self.store.save_slots(class_id, &filled)?;

        self.timetable_from(grid)
    }

    /// Applies one validated manual edit to a slot.
    ///
    /// Warn-after: a teacher-reservation clash is accepted here and
    /// surfaces as a high-severity conflict on the returned timetable
    /// (and every subsequent read) rather than blocking the write.
    pub fn edit_slot(
        &mut self,
        class_id: ClassId,
        day: Weekday,
        period: PeriodNo,
        edit: SlotEdit,
    ) -> Result<ClassTimetable> {
        let info = self.store.class_info(class_id)?;
        let assignments = self.store.subject_assignments(class_id)?;
        validate_edit(&self.policy, &assignments, period, &edit)?;

        let prior = self.store.load_slots(class_id)?;
        let mut grid = build_grid(&info, &self.policy, &prior);
        let slot = grid.slot_at_mut(day, period).ok_or_else(|| {
            ScheduleError::InvalidSlotEdit(format!("{day} is not a working day"))
        })?;
        match &edit {
            SlotEdit::Assign {
                subject_id,
                teacher_id,
            } => {
                // validate_edit guarantees the pairing exists.
                if let Some(assignment) = assignments
                    .iter()
                    .find(|a| a.subject_id == *subject_id && &a.teacher_id == teacher_id)
                {
                    slot.assign(assignment);
                }
            }
            SlotEdit::Clear => slot.clear(),
        }
        let changed = slot.clone();
        info!("edit slot class {class_id} {day} period {period}");
        self.store.save_slots(class_id, &[changed])?;

        self.timetable_from(grid)
    }

    /// Trims overcrowded subjects back to their hard weekly maximum.
    pub fn auto_fix(&mut self, class_id: ClassId) -> Result<ClassTimetable> {
        let info = self.store.class_info(class_id)?;
        let prior = self.store.load_slots(class_id)?;
        let mut grid = build_grid(&info, &self.policy, &prior);

        let cleared = repair_overcrowding(&mut grid, &self.policy);
        if !cleared.is_empty() {
            info!("auto-fix class {class_id}: cleared {} slots", cleared.len());
            // Persist the whole grid so the cleared cells overwrite
            // their stored rows.
            self.store.save_slots(class_id, &grid.slots)?;
        }

        self.timetable_from(grid)
    }

    /// A teacher's weekly availability across all classes.
    ///
    /// One entry per (working day, teaching period); `available` is
    /// false wherever any class has committed the teacher.
    pub fn teacher_availability(&self, teacher_id: &str) -> Vec<TeacherAvailability> {
        let mut matrix = Vec::new();
        for &day in &self.policy.working_days {
            for period in self.policy.teaching_periods() {
                let reserved = self
                    .store
                    .find_other_assignment(teacher_id, day, period, None)
                    .is_some();
                matrix.push(TeacherAvailability {
                    day,
                    period,
                    available: !reserved,
                });
            }
        }
        matrix
    }

    /// Display grid for export: a header row, then one row per period
    /// with day columns of `BREAK`, `Subject\nTeacher`, or `Free Period`.
    ///
    /// The actual spreadsheet/PDF rendering belongs to the presentation
    /// layer; this is only the cell matrix behind it.
    pub fn export_grid(&self, class_id: ClassId) -> Result<Vec<Vec<String>>> {
        let timetable = self.get_timetable(class_id)?;

        let mut rows = Vec::with_capacity(self.policy.periods.len() + 1);
        let mut header = vec!["Period/Day".to_string()];
        header.extend(self.policy.working_days.iter().map(|d| d.name().to_string()));
        rows.push(header);

        for def in &self.policy.periods {
            let label = if def.is_break {
                format!("Break ({}-{})", def.start_time, def.end_time)
            } else {
                format!("Period {} ({}-{})", def.period, def.start_time, def.end_time)
            };
            let mut row = vec![label];
            for &day in &self.policy.working_days {
                let cell = timetable
                    .slots
                    .iter()
                    .find(|s| s.day == day && s.period == def.period)
                    .map(|slot| {
                        if slot.is_break {
                            "BREAK".to_string()
                        } else if slot.is_filled() {
                            [
                                slot.subject_name.as_deref().unwrap_or(""),
                                slot.teacher_name.as_deref().unwrap_or(""),
                            ]
                            .iter()
                            .join("\n")
                        } else {
                            "Free Period".to_string()
                        }
                    })
                    .unwrap_or_else(|| "Free Period".to_string());
                row.push(cell);
            }
            rows.push(row);
        }

        Ok(rows)
    }

    fn timetable_from(&self, grid: ScheduleGrid) -> Result<ClassTimetable> {
        let assignments = self.store.subject_assignments(grid.class_id)?;
        let subjects = assignments
            .iter()
            .map(|assignment| SubjectSummary {
                periods_per_week: grid.subject_period_count(assignment.subject_id) as u32,
                priority: resolve_priority(&self.policy, &assignment.subject_name),
                assignment: assignment.clone(),
            })
            .collect();
        let conflicts = detect_conflicts(&grid, &self.policy, &self.store);

        Ok(ClassTimetable {
            class_id: grid.class_id,
            class_name: grid.class_name,
            grade_level: grid.grade_level,
            slots: grid.slots,
            subjects,
            conflicts,
        })
    }
}
