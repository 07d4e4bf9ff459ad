//! Conflict detection.
//!
//! Scans a committed grid and emits typed conflict records:
//! teacher double-booking (checked against other classes' committed
//! slots through the store, plus a duplicate guard within the scanned
//! slots) and subject overcrowding against the policy's lenient
//! threshold. Conflicts are derived data — recomputed on every read,
//! never persisted.

use std::collections::HashSet;

use itertools::Itertools;

use crate::models::{Conflict, PeriodNo, ScheduleGrid, Weekday, WeekPolicy};
use crate::store::ScheduleStore;

/// Detects all conflicts visible from one class's grid.
///
/// Double-booking is severity high; overcrowding is severity medium and
/// deliberately lenient — a subject is flagged only beyond
/// `floor(max_per_week * 1.5)`, so exact-at-limit or modestly-over
/// manual overrides stay quiet.
pub fn detect_conflicts<S: ScheduleStore>(
    grid: &ScheduleGrid,
    policy: &WeekPolicy,
    store: &S,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    // Teacher double-booking.
    let mut seen: HashSet<(&str, Weekday, PeriodNo)> = HashSet::new();
    for slot in grid.filled_slots() {
        let Some(teacher_id) = slot.teacher_id.as_deref() else {
            continue;
        };
        let teacher_name = slot.teacher_name.as_deref().unwrap_or(teacher_id);

        if !seen.insert((teacher_id, slot.day, slot.period)) {
            // Duplicate within the scanned slots themselves.
            conflicts.push(Conflict::teacher_double_booking(
                slot.day,
                slot.period,
                teacher_name,
                None,
            ));
        } else if let Some(other_class) =
            store.find_other_assignment(teacher_id, slot.day, slot.period, Some(grid.class_id))
        {
            conflicts.push(Conflict::teacher_double_booking(
                slot.day,
                slot.period,
                teacher_name,
                Some(&other_class),
            ));
        }
    }

    // Subject overcrowding, in first-appearance order for stable output.
    let counts = grid.filled_slots().filter_map(|s| s.subject_id).counts();
    for subject_id in grid.filled_slots().filter_map(|s| s.subject_id).unique() {
        let Some(first) = grid
            .filled_slots()
            .find(|s| s.subject_id == Some(subject_id))
        else {
            continue;
        };
        let Some(subject_name) = first.subject_name.as_deref() else {
            continue;
        };
        let count = counts[&subject_id] as u32;
        if count > policy.overcrowding_threshold(subject_name) {
            conflicts.push(Conflict::subject_overlap(
                first.day,
                first.period,
                subject_name,
                count,
                policy.rule_for(subject_name).max_per_week,
            ));
        }
    }

    conflicts
}
