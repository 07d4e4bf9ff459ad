//! Conflict records.
//!
//! Conflicts are derived, typed reports of policy or resource
//! violations in the current grid. They are recomputed on every read
//! and never persisted — a timetable operation always returns a
//! best-effort grid plus a list of problems rather than failing.

use serde::{Deserialize, Serialize};

use super::{PeriodNo, Weekday};

/// Classification of timetable conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictType {
    /// The same teacher claims the same (day, period) in two classes.
    TeacherDoubleBooking,
    /// A subject significantly exceeds its weekly period band.
    SubjectOverlap,
}

/// Conflict severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A derived report of one violation in the current grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    pub message: String,
    pub severity: Severity,
    pub day: Weekday,
    pub period: PeriodNo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Conflict {
    /// A high-severity teacher double-booking at (day, period).
    ///
    /// Names the other class when the reservation query knows it.
    pub fn teacher_double_booking(
        day: Weekday,
        period: PeriodNo,
        teacher_name: &str,
        other_class: Option<&str>,
    ) -> Self {
        let message = match other_class {
            Some(class) => format!(
                "{teacher_name} is assigned to multiple classes at the same time (also {class})"
            ),
            None => format!("{teacher_name} is assigned to multiple classes at the same time"),
        };
        Self {
            conflict_type: ConflictType::TeacherDoubleBooking,
            message,
            severity: Severity::High,
            day,
            period,
            affected_teacher: Some(teacher_name.to_string()),
            subject: None,
        }
    }

    /// A medium-severity subject overcrowding report.
    pub fn subject_overlap(
        day: Weekday,
        period: PeriodNo,
        subject_name: &str,
        count: u32,
        max_per_week: u32,
    ) -> Self {
        Self {
            conflict_type: ConflictType::SubjectOverlap,
            message: format!(
                "{subject_name} has significantly too many periods ({count} > {max_per_week} recommended)"
            ),
            severity: Severity::Medium,
            day,
            period,
            affected_teacher: None,
            subject: Some(subject_name.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_booking_factory() {
        let c = Conflict::teacher_double_booking(Weekday::Monday, 3, "K. Perera", Some("7-B"));
        assert_eq!(c.conflict_type, ConflictType::TeacherDoubleBooking);
        assert_eq!(c.severity, Severity::High);
        assert!(c.message.contains("7-B"));
        assert_eq!(c.affected_teacher.as_deref(), Some("K. Perera"));
    }

    #[test]
    fn test_overlap_factory() {
        let c = Conflict::subject_overlap(Weekday::Tuesday, 1, "Science", 9, 5);
        assert_eq!(c.conflict_type, ConflictType::SubjectOverlap);
        assert_eq!(c.severity, Severity::Medium);
        assert!(c.message.contains("9 > 5"));
        assert_eq!(c.subject.as_deref(), Some("Science"));
    }

    #[test]
    fn test_conflict_wire_format() {
        let c = Conflict::teacher_double_booking(Weekday::Monday, 3, "K. Perera", None);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"type\":\"TEACHER_DOUBLE_BOOKING\""));
        assert!(json.contains("\"severity\":\"high\""));
        assert!(json.contains("\"day\":\"MONDAY\""));
        assert!(!json.contains("\"subject\""));
    }
}
