//! Aggregate statistics over a user's task set.
//!
//! A single `now` snapshot, captured by the caller before aggregation,
//! feeds every time-dependent figure so buckets and totals stay internally
//! consistent even when the preceding store query was slow.

use crate::db::models::{Task, TaskStatus};
use crate::timing;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Pending-task time load for one priority level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityBucket {
    pub priority: i32,
    pub count: i64,
    pub time_elapsed_hours: f64,
    pub estimated_time_left_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub pending_tasks: i64,
    pub completed_percentage: f64,
    pub pending_percentage: f64,
    pub average_completion_time_hours: f64,
    pub total_time_elapsed_hours: f64,
    pub total_time_to_finish_hours: f64,
    /// Buckets ordered by descending priority.
    pub pending_by_priority: Vec<PriorityBucket>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percentage(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64 * 100.0).round()
    }
}

/// Reduce a user's full task set into a [`StatsSummary`].
///
/// Rounding happens only at the edges: per-task accounting stays exact,
/// bucket sums and the completion average are rounded to one decimal, and
/// the two percentages are each rounded independently (so they may miss 100
/// by one point; accepted behavior).
pub fn summarize(tasks: &[Task], now: DateTime<Utc>) -> StatsSummary {
    let total_tasks = tasks.len() as i64;
    let completed_tasks = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Finished)
        .count() as i64;
    let pending_tasks = total_tasks - completed_tasks;

    let average_completion_time_hours = if completed_tasks == 0 {
        0.0
    } else {
        let sum: f64 = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Finished)
            .map(|t| timing::account_task(t, now).total_hours)
            .sum();
        round1(sum / completed_tasks as f64)
    };

    // Group pending tasks by priority, then fold each group. BTreeMap keeps
    // the keys ordered; reverse iteration yields descending priority.
    let mut groups: BTreeMap<i32, (i64, f64, f64)> = BTreeMap::new();
    for task in tasks.iter().filter(|t| t.status == TaskStatus::Pending) {
        let acct = timing::account_task(task, now);
        let entry = groups.entry(task.priority).or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        entry.1 += acct.elapsed_hours;
        entry.2 += acct.remaining_hours;
    }

    let pending_by_priority: Vec<PriorityBucket> = groups
        .iter()
        .rev()
        .map(|(&priority, &(count, elapsed, remaining))| PriorityBucket {
            priority,
            count,
            time_elapsed_hours: round1(elapsed),
            estimated_time_left_hours: round1(remaining),
        })
        .collect();

    let total_time_elapsed_hours = round1(
        pending_by_priority
            .iter()
            .map(|b| b.time_elapsed_hours)
            .sum(),
    );
    let total_time_to_finish_hours = round1(
        pending_by_priority
            .iter()
            .map(|b| b.estimated_time_left_hours)
            .sum(),
    );

    StatsSummary {
        total_tasks,
        completed_tasks,
        pending_tasks,
        completed_percentage: percentage(completed_tasks, total_tasks),
        pending_percentage: percentage(pending_tasks, total_tasks),
        average_completion_time_hours,
        total_time_elapsed_hours,
        total_time_to_finish_hours,
        pending_by_priority,
    }
}
