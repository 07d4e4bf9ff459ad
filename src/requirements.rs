//! Requirement resolver.
//!
//! Turns a class's (subject, teacher) assignment list into prioritized
//! scheduling requirements: each subject's target period count for the
//! week, clamped into its policy band, and its priority tier.

use crate::models::{Priority, SubjectAssignment, WeekPolicy, CORE_SUBJECTS};

/// Target periods per week before the policy band clamps it.
///
/// A heuristic default, not derived from pedagogy; tune per deployment.
pub const DEFAULT_TARGET_PERIODS: u32 = 3;

/// One subject's computed scheduling requirement.
#[derive(Debug, Clone)]
pub struct SubjectRequirement {
    pub assignment: SubjectAssignment,
    pub target_periods: u32,
    pub priority: Priority,
}

/// Priority tier for a subject name.
///
/// The policy table wins when the subject is listed; otherwise core
/// subjects are always high and everything else defaults to low.
pub fn resolve_priority(policy: &WeekPolicy, subject_name: &str) -> Priority {
    if let Some(rule) = policy.subject_rules.get(subject_name) {
        rule.priority
    } else if CORE_SUBJECTS.contains(&subject_name) {
        Priority::High
    } else {
        Priority::Low
    }
}

/// Resolves and prioritizes requirements for a scheduling run.
///
/// `target = min(max, max(min, DEFAULT_TARGET_PERIODS))` per subject.
/// The result is sorted descending by priority tier with a stable sort,
/// so ties keep the input order and runs are reproducible.
pub fn resolve_requirements(
    policy: &WeekPolicy,
    assignments: &[SubjectAssignment],
) -> Vec<SubjectRequirement> {
    let mut requirements: Vec<SubjectRequirement> = assignments
        .iter()
        .map(|assignment| {
            let rule = policy.rule_for(&assignment.subject_name);
            let target = rule
                .max_per_week
                .min(rule.min_per_week.max(DEFAULT_TARGET_PERIODS));
            SubjectRequirement {
                assignment: assignment.clone(),
                target_periods: target,
                priority: resolve_priority(policy, &assignment.subject_name),
            }
        })
        .collect();

    requirements.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    requirements
}
