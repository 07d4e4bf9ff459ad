//! Weekly class-timetable scheduling and conflict-detection engine.
//!
//! Materializes a fixed weekly grid of lesson slots per class, fills it
//! with subject/teacher assignments under capacity and preference
//! constraints, and reports scheduling conflicts as derived data.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `WeekPolicy`, `Slot`, `ScheduleGrid`,
//!   `SubjectAssignment`, `Conflict`
//! - **`store`**: Persistence collaborator seam (`ScheduleStore`) and an
//!   in-memory reference implementation
//! - **`grid`**: Slot grid builder (policy × prior slots → full grid)
//! - **`requirements`**: Per-subject target periods and priority tiers
//! - **`scheduler`**: Greedy, priority-driven assignment heuristic
//! - **`conflicts`**: Teacher double-booking and subject overcrowding checks
//! - **`repair`**: Bounded trim pass for overcrowded subjects
//! - **`edit`**: Single-slot manual edit validation
//! - **`service`**: The four public operations (get / auto-schedule /
//!   edit / auto-fix), all returning the same grid-plus-conflicts shape
//!
//! # Design
//!
//! The engine favors a usable schedule over an optimal one: the heuristic
//! is greedy and never backtracks, under-filled subjects are reported via
//! their weekly period count rather than raised as errors, and conflicts
//! are recomputed from current state on every read instead of being
//! stored.

pub mod conflicts;
pub mod edit;
pub mod grid;
pub mod models;
pub mod repair;
pub mod requirements;
pub mod scheduler;
pub mod service;
pub mod store;

use crate::models::ClassId;

/// Engine error type.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The class identifier did not resolve in the directory.
    #[error("class not found: {0}")]
    ClassNotFound(ClassId),

    /// A manual edit targeted a break period or an unauthorized
    /// subject/teacher pairing.
    #[error("invalid slot edit: {0}")]
    InvalidSlotEdit(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
