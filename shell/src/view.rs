//! Plain-text rendering of tasks

use chrono::{DateTime, Utc};
use taskpad_core::task::{Task, TaskCounts, TaskFilter};

pub fn render_task(task: &Task, now: DateTime<Utc>) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("[{}] {:>3}  {}  ({}", mark, task.id, task.title, task.priority);

    if let Some(due) = task.due_date {
        line.push_str(&format!(", due {}", due.format("%Y-%m-%d")));
        if task.is_overdue(now) {
            line.push_str(", overdue");
        }
    }
    line.push(')');

    if !task.description.is_empty() {
        line.push_str(&format!("\n         {}", task.description));
    }
    line
}

pub fn render_list(tasks: &[Task], filter: TaskFilter, now: DateTime<Utc>) -> String {
    if tasks.is_empty() {
        return match filter {
            TaskFilter::All => "No tasks yet.".to_string(),
            other => format!("No {} tasks.", other),
        };
    }

    tasks
        .iter()
        .map(|t| render_task(t, now))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_counts(counts: &TaskCounts) -> String {
    format!(
        "{} total, {} completed, {} pending",
        counts.total, counts.completed, counts.pending
    )
}
