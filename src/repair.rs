//! Conflict repair (auto-fix).
//!
//! A bounded, best-effort trim pass: subjects whose weekly count tripped
//! the lenient overcrowding threshold are cut back to the *hard*
//! `max_per_week`, so a fix always returns the subject to a defensible
//! level even though detection allows headroom. Removal scans the grid
//! from the end of the week backward and does not backfill the freed
//! slots. Running the pass twice on an already-repaired grid is a no-op.

use itertools::Itertools;
use log::info;

use crate::models::{PeriodNo, ScheduleGrid, Weekday, WeekPolicy};

/// Trims overcrowded subjects in place.
///
/// Returns the (day, period) coordinates cleared, in removal order
/// (last day, last period first).
pub fn repair_overcrowding(
    grid: &mut ScheduleGrid,
    policy: &WeekPolicy,
) -> Vec<(Weekday, PeriodNo)> {
    let counts = grid.filled_slots().filter_map(|s| s.subject_id).counts();
    let subjects: Vec<_> = grid
        .filled_slots()
        .filter_map(|s| s.subject_id.zip(s.subject_name.clone()))
        .unique()
        .collect();

    let mut cleared = Vec::new();
    for (subject_id, subject_name) in subjects {
        let count = counts[&subject_id] as u32;
        if count <= policy.overcrowding_threshold(&subject_name) {
            continue;
        }

        let max = policy.rule_for(&subject_name).max_per_week;
        let mut excess = count - max;
        for slot in grid.slots.iter_mut().rev() {
            if excess == 0 {
                break;
            }
            if slot.is_filled() && slot.subject_id == Some(subject_id) {
                cleared.push((slot.day, slot.period));
                slot.clear();
                excess -= 1;
            }
        }
        info!(
            "trimmed {} from {} to {} periods (class {})",
            subject_name, count, max, grid.class_id
        );
    }

    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflicts::detect_conflicts;
    use crate::grid::build_grid;
    use crate::models::{Priority, SubjectAssignment, SubjectRule};
    use crate::store::{ClassInfo, InMemoryStore};

    fn class() -> ClassInfo {
        ClassInfo::new(1, "6-A", 6)
    }

    fn policy_with_max4() -> WeekPolicy {
        let mut policy = WeekPolicy::standard();
        policy
            .subject_rules
            .insert("Handicraft".into(), SubjectRule::new(1, 4, Priority::Low));
        policy
    }

    fn overfilled_grid(policy: &WeekPolicy, n: usize) -> ScheduleGrid {
        let mut grid = build_grid(&class(), policy, &[]);
        let subject = SubjectAssignment::new(7, "Handicraft", "t-7", "H");
        let coords: Vec<_> = grid
            .slots
            .iter()
            .filter(|s| !s.is_break)
            .map(|s| (s.day, s.period))
            .take(n)
            .collect();
        for (day, period) in coords {
            grid.slot_at_mut(day, period).unwrap().assign(&subject);
        }
        grid
    }

    #[test]
    fn test_trims_to_hard_max_from_the_end() {
        // max 4, 7 filled → threshold floor(6.0)=6 tripped, 3 removed.
        let policy = policy_with_max4();
        let mut grid = overfilled_grid(&policy, 7);

        let cleared = repair_overcrowding(&mut grid, &policy);

        assert_eq!(grid.subject_period_count(7), 4);
        assert_eq!(cleared.len(), 3);
        // Monday p1-p4 survive; the three latest placements go.
        assert_eq!(
            cleared,
            vec![
                (Weekday::Monday, 8),
                (Weekday::Monday, 7),
                (Weekday::Monday, 6),
            ]
        );
    }

    #[test]
    fn test_repair_silences_the_conflict() {
        let policy = policy_with_max4();
        let mut store = InMemoryStore::new();
        store.add_class(class());
        let mut grid = overfilled_grid(&policy, 7);

        assert_eq!(detect_conflicts(&grid, &policy, &store).len(), 1);
        repair_overcrowding(&mut grid, &policy);
        assert!(detect_conflicts(&grid, &policy, &store).is_empty());
    }

    #[test]
    fn test_repair_is_idempotent() {
        let policy = policy_with_max4();
        let mut grid = overfilled_grid(&policy, 7);

        repair_overcrowding(&mut grid, &policy);
        let after_first = grid.slots.clone();
        let second = repair_overcrowding(&mut grid, &policy);

        assert!(second.is_empty());
        assert_eq!(grid.slots, after_first);
    }

    #[test]
    fn test_within_threshold_is_untouched() {
        // 6 filled is over max 4 but within the lenient threshold.
        let policy = policy_with_max4();
        let mut grid = overfilled_grid(&policy, 6);

        let cleared = repair_overcrowding(&mut grid, &policy);
        assert!(cleared.is_empty());
        assert_eq!(grid.subject_period_count(7), 6);
    }

    #[test]
    fn test_other_subjects_are_untouched() {
        let policy = policy_with_max4();
        let mut grid = overfilled_grid(&policy, 7);
        let math = SubjectAssignment::new(1, "Mathematics", "t-1", "K. Perera");
        grid.slot_at_mut(Weekday::Friday, 1).unwrap().assign(&math);

        repair_overcrowding(&mut grid, &policy);
        assert_eq!(grid.subject_period_count(1), 1);
    }
}
