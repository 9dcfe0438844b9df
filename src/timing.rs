//! Time accounting for a single task.
//!
//! Pure functions over (status, start, end, now). The reference instant is
//! always an explicit parameter so aggregation can pin one snapshot for an
//! entire request and tests never need to mock the wall clock.

use crate::db::models::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Derived time figures for one task, in hours. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeAccounting {
    pub total_hours: f64,
    pub elapsed_hours: f64,
    pub remaining_hours: f64,
}

/// Hours from `from` to `to`, clamped at zero.
fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds().max(0) as f64 / 3_600_000.0
}

/// Compute elapsed/remaining/total time for a task's time window.
///
/// Finished tasks carry their actual completion instant in `end`, so the
/// whole window is settled: total = elapsed, remaining = 0. Pending tasks
/// split the window at `now`. All figures clamp at zero, even when `now`
/// falls outside the window entirely.
pub fn account(
    status: TaskStatus,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> TimeAccounting {
    match status {
        TaskStatus::Finished => {
            let total = hours_between(start, end);
            TimeAccounting {
                total_hours: total,
                elapsed_hours: total,
                remaining_hours: 0.0,
            }
        },
        TaskStatus::Pending => TimeAccounting {
            total_hours: hours_between(start, end),
            elapsed_hours: hours_between(start, now),
            remaining_hours: hours_between(now, end),
        },
    }
}

pub fn account_task(task: &Task, now: DateTime<Utc>) -> TimeAccounting {
    account(task.status, task.start_time, task.end_time, now)
}
