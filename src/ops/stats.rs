use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::{Priority, Task};

/// Completion counts for one context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextStats {
    pub name: String,
    pub total: usize,
    pub completed: usize,
}

impl ContextStats {
    pub fn rate(&self) -> f64 {
        percentage(self.completed, self.total)
    }
}

/// Aggregate statistics over the whole task collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    /// Incomplete tasks with a due date before today
    pub overdue: usize,
    /// Task count per priority, in cycle order
    pub by_priority: Vec<(Priority, usize)>,
    /// One entry per context, in registry order
    pub contexts: Vec<ContextStats>,
}

impl TaskStats {
    pub fn rate(&self) -> f64 {
        percentage(self.completed, self.total)
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Compute statistics; `today` decides which due dates are overdue.
pub fn compute(tasks: &[Task], contexts: &[String], today: NaiveDate) -> TaskStats {
    let completed = tasks.iter().filter(|t| t.done).count();
    let overdue = tasks
        .iter()
        .filter(|t| !t.done)
        .filter_map(|t| NaiveDate::parse_from_str(&t.due_date, "%Y-%m-%d").ok())
        .filter(|due| *due < today)
        .count();
    let by_priority = Priority::ALL
        .iter()
        .map(|p| (*p, tasks.iter().filter(|t| t.priority == *p).count()))
        .collect();
    let contexts = contexts
        .iter()
        .map(|name| {
            let in_ctx = tasks.iter().filter(|t| &t.context == name);
            let (total, completed) =
                in_ctx.fold((0, 0), |(n, c), t| (n + 1, c + usize::from(t.done)));
            ContextStats {
                name: name.clone(),
                total,
                completed,
            }
        })
        .collect();

    TaskStats {
        total: tasks.len(),
        completed,
        overdue,
        by_priority,
        contexts,
    }
}

/// Plain-text report used by `ctxdo stats`
pub fn format_report(stats: &TaskStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Tasks: {}", stats.total);
    let _ = writeln!(
        out,
        "Completed: {} ({:.1}%)",
        stats.completed,
        stats.rate()
    );
    let _ = writeln!(out, "Overdue: {}", stats.overdue);
    out.push('\n');
    out.push_str("Priorities:\n");
    for (priority, count) in &stats.by_priority {
        let _ = writeln!(out, "  {}: {}", priority.label(), count);
    }
    out.push('\n');
    out.push_str("Context Statistics:\n");
    for ctx in &stats.contexts {
        let _ = writeln!(
            out,
            "  {}: {}/{} ({:.1}%)",
            ctx.name,
            ctx.completed,
            ctx.total,
            ctx.rate()
        );
    }
    out
}
