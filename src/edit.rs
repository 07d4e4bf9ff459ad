//! Manual slot edit validation.
//!
//! Interactive, one-slot-at-a-time edits are validated against the
//! class's authorized pairings and the break layout before they are
//! accepted.
//!
//! # Warn-after semantics
//!
//! A teacher-reservation clash is deliberately *not* rejected here. A
//! manual edit may introduce a high-severity double-booking, which the
//! conflict scan surfaces on the next read. Blocking at write time is a
//! valid alternative design, but this crate preserves the original
//! warn-after workflow; the choice is observable and pinned by tests.

use crate::models::{PeriodNo, SubjectAssignment, SubjectId, TeacherId, WeekPolicy};
use crate::{Result, ScheduleError};

/// One proposed change to a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEdit {
    /// Fill the slot with a subject/teacher pairing.
    Assign {
        subject_id: SubjectId,
        teacher_id: TeacherId,
    },
    /// Clear the slot.
    Clear,
}

/// Validates a proposed slot edit.
///
/// Rejects edits that target an unknown or break period, and
/// assignments whose (subject, teacher) pairing is not on the class's
/// authorized list. Clearing any non-break slot is always valid.
pub fn validate_edit(
    policy: &WeekPolicy,
    assignments: &[SubjectAssignment],
    period: PeriodNo,
    edit: &SlotEdit,
) -> Result<()> {
    let def = policy.period_def(period).ok_or_else(|| {
        ScheduleError::InvalidSlotEdit(format!("period {period} is not part of the school day"))
    })?;
    if def.is_break {
        return Err(ScheduleError::InvalidSlotEdit(format!(
            "period {period} is a break and cannot be edited"
        )));
    }

    if let SlotEdit::Assign {
        subject_id,
        teacher_id,
    } = edit
    {
        let authorized = assignments
            .iter()
            .any(|a| a.subject_id == *subject_id && &a.teacher_id == teacher_id);
        if !authorized {
            return Err(ScheduleError::InvalidSlotEdit(format!(
                "teacher {teacher_id} is not assigned to subject {subject_id} for this class"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignments() -> Vec<SubjectAssignment> {
        vec![
            SubjectAssignment::new(1, "Mathematics", "t-1", "K. Perera"),
            SubjectAssignment::new(2, "Science", "t-2", "A. Silva"),
        ]
    }

    #[test]
    fn test_authorized_assignment_is_accepted() {
        let policy = WeekPolicy::standard();
        let edit = SlotEdit::Assign {
            subject_id: 1,
            teacher_id: "t-1".into(),
        };
        assert!(validate_edit(&policy, &assignments(), 3, &edit).is_ok());
    }

    #[test]
    fn test_break_period_is_rejected() {
        let policy = WeekPolicy::standard();
        let result = validate_edit(&policy, &assignments(), 5, &SlotEdit::Clear);
        assert!(matches!(result, Err(ScheduleError::InvalidSlotEdit(_))));
    }

    #[test]
    fn test_unknown_period_is_rejected() {
        let policy = WeekPolicy::standard();
        let result = validate_edit(&policy, &assignments(), 12, &SlotEdit::Clear);
        assert!(matches!(result, Err(ScheduleError::InvalidSlotEdit(_))));
    }

    #[test]
    fn test_unauthorized_pairing_is_rejected() {
        let policy = WeekPolicy::standard();
        // t-2 teaches Science, not Mathematics, for this class.
        let edit = SlotEdit::Assign {
            subject_id: 1,
            teacher_id: "t-2".into(),
        };
        let result = validate_edit(&policy, &assignments(), 3, &edit);
        assert!(matches!(result, Err(ScheduleError::InvalidSlotEdit(_))));
    }

    #[test]
    fn test_clearing_non_break_slot_is_always_valid() {
        let policy = WeekPolicy::standard();
        assert!(validate_edit(&policy, &[], 1, &SlotEdit::Clear).is_ok());
    }
}
