//! Subject/teacher assignment models.
//!
//! A `SubjectAssignment` is externally owned: the directory decides
//! which teacher takes which subject for a class, and the engine never
//! invents a pairing that is not on this list.

use serde::{Deserialize, Serialize};

use super::{Priority, SubjectId, TeacherId};

/// A (subject, teacher) pairing authorized for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAssignment {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub teacher_id: TeacherId,
    pub teacher_name: String,
}

impl SubjectAssignment {
    pub fn new(
        subject_id: SubjectId,
        subject_name: impl Into<String>,
        teacher_id: impl Into<TeacherId>,
        teacher_name: impl Into<String>,
    ) -> Self {
        Self {
            subject_id,
            subject_name: subject_name.into(),
            teacher_id: teacher_id.into(),
            teacher_name: teacher_name.into(),
        }
    }
}

/// A subject's reportable state on a timetable read.
///
/// `periods_per_week` is the achieved count recomputed from the current
/// grid. A value below the scheduling target is how under-assignment is
/// surfaced — it is reportable data, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    #[serde(flatten)]
    pub assignment: SubjectAssignment,
    pub periods_per_week: u32,
    pub priority: Priority,
}
