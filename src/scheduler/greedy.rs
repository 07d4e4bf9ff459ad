//! Greedy, priority-driven slot filler.
//!
//! # Iteration order
//!
//! Ordering is fully explicit so tests can pin exact placements:
//! requirements in stable priority order, days in policy order, periods
//! from the subject's preferred list (fallback: all teaching periods
//! ascending). With `balance_subjects` on (the default) each subject
//! takes at most one period per day per pass and a cursor rotates
//! through the preferred list, spreading the subject across the week;
//! with it off the raw day-major order applies and a subject may stack
//! within one day.

use std::collections::HashSet;

use log::debug;

use crate::models::{PeriodNo, ScheduleGrid, TeacherId, Weekday, WeekPolicy};
use crate::requirements::SubjectRequirement;
use crate::store::ScheduleStore;

/// Options for one auto-schedule run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoScheduleOptions {
    /// Treat pre-filled slots as immovable and only fill gaps.
    /// When false the grid (and its persisted slots) is cleared first.
    pub preserve_existing: bool,
    /// Spread each subject across days instead of stacking it into the
    /// earliest free day.
    pub balance_subjects: bool,
}

impl Default for AutoScheduleOptions {
    fn default() -> Self {
        Self {
            preserve_existing: false,
            balance_subjects: true,
        }
    }
}

/// Greedy scheduler for one class's weekly grid.
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    options: AutoScheduleOptions,
}

impl GreedyScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AutoScheduleOptions) -> Self {
        Self { options }
    }

    /// Fills the grid in place from the prioritized requirement list.
    ///
    /// A candidate slot is skipped when it is a break, already filled
    /// (preserved content or claimed earlier in this run), or its
    /// teacher is reserved at that (day, period) — either in another
    /// class's committed grid or by this run. Subjects whose candidates
    /// run out stay under-filled; that is reported, not raised.
    pub fn fill<S: ScheduleStore>(
        &self,
        policy: &WeekPolicy,
        grid: &mut ScheduleGrid,
        requirements: &[SubjectRequirement],
        store: &S,
    ) {
        // Teachers of preserved slots hold their (day, period) claims.
        let mut reserved: HashSet<(TeacherId, Weekday, PeriodNo)> = grid
            .filled_slots()
            .filter_map(|s| s.teacher_id.clone().map(|t| (t, s.day, s.period)))
            .collect();

        for requirement in requirements {
            let rule = policy.rule_for(&requirement.assignment.subject_name);
            let preferred = if rule.preferred_periods.is_empty() {
                policy.teaching_periods()
            } else {
                rule.preferred_periods.clone()
            };

            let placed = if self.options.balance_subjects {
                self.fill_balanced(policy, grid, requirement, &preferred, &mut reserved, store)
            } else {
                self.fill_stacked(policy, grid, requirement, &preferred, &mut reserved, store)
            };

            debug!(
                "scheduled {} of {} periods for {} (class {})",
                placed,
                requirement.target_periods,
                requirement.assignment.subject_name,
                grid.class_id
            );
        }
    }

    /// One placement per day per pass, rotating through the preferred
    /// periods so repeated placements land on different periods.
    fn fill_balanced<S: ScheduleStore>(
        &self,
        policy: &WeekPolicy,
        grid: &mut ScheduleGrid,
        requirement: &SubjectRequirement,
        preferred: &[PeriodNo],
        reserved: &mut HashSet<(TeacherId, Weekday, PeriodNo)>,
        store: &S,
    ) -> u32 {
        let mut placed = 0;
        let mut cursor = 0;

        loop {
            let mut progressed = false;
            for &day in &policy.working_days {
                if placed >= requirement.target_periods {
                    break;
                }
                for offset in 0..preferred.len() {
                    let index = (cursor + offset) % preferred.len();
                    if self.try_place(grid, requirement, day, preferred[index], reserved, store) {
                        cursor = (index + 1) % preferred.len();
                        placed += 1;
                        progressed = true;
                        break;
                    }
                }
            }
            if placed >= requirement.target_periods || !progressed {
                return placed;
            }
        }
    }

    /// Raw day-major order: every preferred period of a day is tried
    /// before moving to the next day.
    fn fill_stacked<S: ScheduleStore>(
        &self,
        policy: &WeekPolicy,
        grid: &mut ScheduleGrid,
        requirement: &SubjectRequirement,
        preferred: &[PeriodNo],
        reserved: &mut HashSet<(TeacherId, Weekday, PeriodNo)>,
        store: &S,
    ) -> u32 {
        let mut placed = 0;
        for &day in &policy.working_days {
            for &period in preferred {
                if placed >= requirement.target_periods {
                    return placed;
                }
                if self.try_place(grid, requirement, day, period, reserved, store) {
                    placed += 1;
                }
            }
        }
        placed
    }

    /// Commits one slot if the candidate is clear.
    fn try_place<S: ScheduleStore>(
        &self,
        grid: &mut ScheduleGrid,
        requirement: &SubjectRequirement,
        day: Weekday,
        period: PeriodNo,
        reserved: &mut HashSet<(TeacherId, Weekday, PeriodNo)>,
        store: &S,
    ) -> bool {
        let teacher_id = &requirement.assignment.teacher_id;
        let claim = (teacher_id.clone(), day, period);
        if reserved.contains(&claim) {
            return false;
        }
        if store
            .find_other_assignment(teacher_id, day, period, Some(grid.class_id))
            .is_some()
        {
            return false;
        }

        let class_id = grid.class_id;
        match grid.slot_at_mut(day, period) {
            Some(slot) if !slot.is_break && !slot.is_filled() => {
                slot.assign(&requirement.assignment);
                reserved.insert(claim);
                debug!(
                    "placed {} at {} period {} (class {})",
                    requirement.assignment.subject_name, day, period, class_id
                );
                true
            }
            _ => false,
        }
    }
}
