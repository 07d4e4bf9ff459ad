//! Schedule configuration (week policy).
//!
//! Static policy data for one school week: working days, the
//! period-to-time mapping (break periods included), per-subject weekly
//! period bands with preferred slots and a priority tier, and pairs of
//! subjects that should not sit in adjacent periods. Pure data plus
//! lookup helpers; the policy itself has no scheduling behavior.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{PeriodNo, Weekday};

/// Subjects treated as high priority even when absent from the policy
/// table (language / mathematics / science core).
pub const CORE_SUBJECTS: [&str; 4] = ["Mathematics", "Science", "English", "Sinhala"];

/// Subject priority tier. Higher tiers are scheduled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Numeric rank for ordering (`High` > `Medium` > `Low`).
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// One period of the school day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDef {
    pub period: PeriodNo,
    /// "HH:MM".
    pub start_time: String,
    /// "HH:MM".
    pub end_time: String,
    pub is_break: bool,
}

/// Weekly scheduling band for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRule {
    pub min_per_week: u32,
    pub max_per_week: u32,
    /// Preferred period numbers, tried in listed order. Empty means
    /// "any teaching period, ascending".
    pub preferred_periods: Vec<PeriodNo>,
    pub priority: Priority,
}

impl SubjectRule {
    pub fn new(min_per_week: u32, max_per_week: u32, priority: Priority) -> Self {
        Self {
            min_per_week,
            max_per_week,
            preferred_periods: Vec::new(),
            priority,
        }
    }

    pub fn with_preferred(mut self, periods: Vec<PeriodNo>) -> Self {
        self.preferred_periods = periods;
        self
    }
}

/// Immutable weekly schedule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPolicy {
    /// Working days in iteration order.
    pub working_days: Vec<Weekday>,
    /// Periods in time order, contiguous; break periods flagged.
    pub periods: Vec<PeriodDef>,
    /// Per-subject bands, keyed by subject name.
    pub subject_rules: HashMap<String, SubjectRule>,
    /// Fallback band for subjects absent from the table.
    pub default_rule: SubjectRule,
    /// Unordered subject-name pairs that should not occupy adjacent
    /// periods on the same day. Advisory data for grid editors; the
    /// greedy scheduler does not consult it.
    pub avoid_consecutive: Vec<(String, String)>,
}

impl WeekPolicy {
    /// The band for a subject, falling back to the default.
    pub fn rule_for(&self, subject_name: &str) -> &SubjectRule {
        self.subject_rules
            .get(subject_name)
            .unwrap_or(&self.default_rule)
    }

    /// Period definition lookup.
    pub fn period_def(&self, period: PeriodNo) -> Option<&PeriodDef> {
        self.periods.iter().find(|p| p.period == period)
    }

    /// Whether a period number is a break.
    pub fn is_break(&self, period: PeriodNo) -> bool {
        self.period_def(period).is_some_and(|p| p.is_break)
    }

    /// All non-break period numbers in ascending order.
    pub fn teaching_periods(&self) -> Vec<PeriodNo> {
        self.periods
            .iter()
            .filter(|p| !p.is_break)
            .map(|p| p.period)
            .collect()
    }

    /// Lenient overcrowding threshold: `floor(max_per_week * 1.5)`.
    ///
    /// Counts at or below this never raise a conflict, so moderate
    /// manual overrides stay silent.
    pub fn overcrowding_threshold(&self, subject_name: &str) -> u32 {
        self.rule_for(subject_name).max_per_week * 3 / 2
    }

    /// Whether two subjects form an avoid-consecutive pair (unordered).
    pub fn should_avoid_consecutive(&self, a: &str, b: &str) -> bool {
        self.avoid_consecutive
            .iter()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    /// The standard school week: Monday-Friday, eight 45-minute periods
    /// from 08:30 with the interval as period 5 (11:30-11:50), and the
    /// school's per-subject bands and preferred slots.
    pub fn standard() -> Self {
        let periods = vec![
            PeriodDef { period: 1, start_time: "08:30".into(), end_time: "09:15".into(), is_break: false },
            PeriodDef { period: 2, start_time: "09:15".into(), end_time: "10:00".into(), is_break: false },
            PeriodDef { period: 3, start_time: "10:00".into(), end_time: "10:45".into(), is_break: false },
            PeriodDef { period: 4, start_time: "10:45".into(), end_time: "11:30".into(), is_break: false },
            PeriodDef { period: 5, start_time: "11:30".into(), end_time: "11:50".into(), is_break: true },
            PeriodDef { period: 6, start_time: "11:50".into(), end_time: "12:35".into(), is_break: false },
            PeriodDef { period: 7, start_time: "12:35".into(), end_time: "13:20".into(), is_break: false },
            PeriodDef { period: 8, start_time: "13:20".into(), end_time: "14:05".into(), is_break: false },
        ];

        let mut rules = HashMap::new();
        let mut rule = |name: &str, min: u32, max: u32, preferred: &[PeriodNo], priority: Priority| {
            rules.insert(
                name.to_string(),
                SubjectRule::new(min, max, priority).with_preferred(preferred.to_vec()),
            );
        };

        rule("Mathematics", 3, 8, &[1, 2, 6, 7], Priority::High);
        rule("Science", 3, 10, &[2, 3, 6, 7], Priority::High);
        rule("English", 3, 8, &[1, 3, 6, 8], Priority::High);
        rule("Sinhala", 3, 8, &[], Priority::High);
        rule("History", 1, 6, &[], Priority::Medium);
        rule("Geography", 1, 5, &[], Priority::Medium);
        rule("Commerce", 1, 5, &[], Priority::Medium);
        rule("ICT", 1, 5, &[], Priority::Medium);
        rule("Religion", 1, 4, &[], Priority::Low);
        rule("Buddhism", 1, 6, &[], Priority::Low);
        rule("Technology", 1, 4, &[], Priority::Low);
        rule("Art", 1, 4, &[6, 7, 8], Priority::Low);
        rule("Physical Education", 1, 4, &[7, 8], Priority::Low);
        rule("Music", 1, 3, &[6, 7, 8], Priority::Low);
        rule("Dancing", 1, 3, &[], Priority::Low);
        rule("Drama", 1, 3, &[], Priority::Low);
        rule("Biology", 1, 6, &[], Priority::Low);
        rule("Chemistry", 1, 6, &[], Priority::Low);
        rule("Physics", 1, 6, &[], Priority::Low);
        rule("Tamil", 1, 5, &[], Priority::Low);

        Self {
            working_days: vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
            ],
            periods,
            subject_rules: rules,
            default_rule: SubjectRule::new(1, 6, Priority::Low),
            avoid_consecutive: vec![
                ("Mathematics".into(), "Science".into()),
                ("Physical Education".into(), "Mathematics".into()),
            ],
        }
    }
}
