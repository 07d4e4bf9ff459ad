//! Timetabling domain models.
//!
//! Core data types for representing a class's weekly schedule: the
//! static policy (days, periods, per-subject bands), the slot grid,
//! subject/teacher assignments, and derived conflict records.

mod assignment;
mod conflict;
mod policy;
mod slot;

pub use assignment::{SubjectAssignment, SubjectSummary};
pub use conflict::{Conflict, ConflictType, Severity};
pub use policy::{PeriodDef, Priority, SubjectRule, WeekPolicy, CORE_SUBJECTS};
pub use slot::{ClassId, PeriodNo, ScheduleGrid, Slot, SubjectId, TeacherId, Weekday};
