//! Greedy assignment engine.
//!
//! # Algorithm
//!
//! `GreedyScheduler` fills a class's grid one requirement at a time in
//! priority order, claiming candidate (day, period) slots that are free
//! in the grid and free of teacher reservations. It is not optimal and
//! never backtracks: when a subject's candidates run out it is left
//! under-filled and reported via its weekly period count. That tradeoff
//! favors fast, predictable output and is a documented design choice.

mod greedy;

pub use greedy::{AutoScheduleOptions, GreedyScheduler};
