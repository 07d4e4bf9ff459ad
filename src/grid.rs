//! Slot grid builder.
//!
//! Produces the full week's slot skeleton for one class: one slot per
//! (day, period) pair in the policy, `is_break` set from the period
//! definition, and subject/teacher content overlaid from previously
//! persisted slots where present. Pure transformation; nothing is
//! persisted until the caller commits.

use crate::models::{ScheduleGrid, Slot, WeekPolicy};
use crate::store::ClassInfo;

/// Builds a complete grid for a class, overlaying prior slot content.
///
/// Prior rows are matched by (day, period); only filled, non-break rows
/// contribute content, so stale empties or content accidentally stored
/// against a break period never leak into the grid.
pub fn build_grid(class: &ClassInfo, policy: &WeekPolicy, prior: &[Slot]) -> ScheduleGrid {
    let mut slots = Vec::with_capacity(policy.working_days.len() * policy.periods.len());

    for &day in &policy.working_days {
        for def in &policy.periods {
            let mut slot = Slot::empty(day, def);
            if !def.is_break {
                if let Some(existing) = prior
                    .iter()
                    .find(|s| s.day == day && s.period == def.period && s.is_filled())
                {
                    slot.subject_id = existing.subject_id;
                    slot.subject_name = existing.subject_name.clone();
                    slot.teacher_id = existing.teacher_id.clone();
                    slot.teacher_name = existing.teacher_name.clone();
                }
            }
            slots.push(slot);
        }
    }

    ScheduleGrid {
        class_id: class.class_id,
        class_name: class.class_name.clone(),
        grade_level: class.grade_level,
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SubjectAssignment, Weekday};

    fn class() -> ClassInfo {
        ClassInfo::new(1, "6-A", 6)
    }

    #[test]
    fn test_grid_is_complete() {
        let policy = WeekPolicy::standard();
        let grid = build_grid(&class(), &policy, &[]);

        assert_eq!(grid.slots.len(), 5 * 8);
        assert_eq!(grid.class_name, "6-A");
        // Break flags match policy exactly.
        for slot in &grid.slots {
            assert_eq!(slot.is_break, policy.is_break(slot.period));
        }
        assert_eq!(grid.filled_slots().count(), 0);
    }

    #[test]
    fn test_grid_order_is_day_major() {
        let policy = WeekPolicy::standard();
        let grid = build_grid(&class(), &policy, &[]);

        assert_eq!(grid.slots[0].day, Weekday::Monday);
        assert_eq!(grid.slots[0].period, 1);
        assert_eq!(grid.slots[7].period, 8);
        assert_eq!(grid.slots[8].day, Weekday::Tuesday);
        assert_eq!(grid.slots[8].period, 1);
    }

    #[test]
    fn test_prior_content_is_overlaid() {
        let policy = WeekPolicy::standard();
        let mut prior = build_grid(&class(), &policy, &[]).slots;
        let math = SubjectAssignment::new(1, "Mathematics", "t-1", "K. Perera");
        prior
            .iter_mut()
            .find(|s| s.day == Weekday::Tuesday && s.period == 2)
            .unwrap()
            .assign(&math);

        let grid = build_grid(&class(), &policy, &prior);
        let slot = grid.slot_at(Weekday::Tuesday, 2).unwrap();
        assert!(slot.is_filled());
        assert_eq!(slot.subject_name.as_deref(), Some("Mathematics"));
        assert_eq!(grid.filled_slots().count(), 1);
    }

    #[test]
    fn test_break_rows_never_carry_content() {
        let policy = WeekPolicy::standard();
        // A corrupt prior row stored against the break period.
        let mut bad = Slot::empty(
            Weekday::Monday,
            policy.period_def(5).unwrap(),
        );
        bad.is_break = false; // pretend the row was written without the flag
        bad.assign(&SubjectAssignment::new(1, "Mathematics", "t-1", "K. Perera"));

        let grid = build_grid(&class(), &policy, &[bad]);
        let slot = grid.slot_at(Weekday::Monday, 5).unwrap();
        assert!(slot.is_break);
        assert_eq!(slot.subject_id, None);
        assert_eq!(slot.teacher_id, None);
    }
}
