//! artmark task command implementations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};
use crate::ids::{ArtworkId, TaskId};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::tasks::Task;

use super::Context;

/// Hour used when `--due` names a day without a time.
const DEFAULT_DUE_HOUR: u32 = 9;

const DUE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

#[derive(serde::Serialize)]
struct TaskListOutput {
    artwork_id: ArtworkId,
    total: usize,
    tasks: Vec<Task>,
}

#[derive(serde::Serialize)]
struct TaskChangeOutput {
    artwork_id: ArtworkId,
    task_id: TaskId,
    tasks: Vec<Task>,
}

fn options(ctx: &Context) -> OutputOptions {
    OutputOptions {
        json: ctx.json,
        quiet: ctx.quiet,
    }
}

/// Parse a `--due` value into a local date-time.
///
/// Accepts RFC 3339 (offset is dropped), `YYYY-MM-DD HH:MM`,
/// `YYYY-MM-DDTHH:MM`, or a bare `YYYY-MM-DD`.
pub fn parse_due(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidArgument("due date cannot be empty".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.naive_local());
    }
    for format in DUE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = NaiveTime::from_hms_opt(DEFAULT_DUE_HOUR, 0, 0)
            .ok_or_else(|| Error::InvalidArgument("invalid default due hour".to_string()))?;
        return Ok(date.and_time(time));
    }

    Err(Error::InvalidArgument(format!(
        "unrecognized due date '{raw}' (expected YYYY-MM-DD [HH:MM] or RFC 3339)"
    )))
}

fn task_line(task: &Task) -> String {
    let mark = if task.is_completed { "x" } else { " " };
    format!(
        "[{mark}] {}  {}  {}",
        task.id(),
        task.record.due_date,
        task.record.text
    )
}

pub async fn run_add(ctx: &Context, artwork: ArtworkId, text: &str, due: &str) -> Result<()> {
    let due = parse_due(due)?;
    let (task_id, tasks) = ctx.session.plan_task(&artwork, text, due).await?;

    let mut human = HumanOutput::new("Task added");
    human.push_summary("Artwork", artwork.to_string());
    human.push_summary("ID", task_id.to_string());
    human.push_summary("Due", due.format(&ctx.session.config().tasks.due_format).to_string());
    human.push_next_step(format!("artmark task done {artwork} {task_id}"));

    emit_success(
        options(ctx),
        "task add",
        &TaskChangeOutput {
            artwork_id: artwork,
            task_id,
            tasks,
        },
        Some(&human),
    )
}

pub async fn run_list(ctx: &Context, artwork: ArtworkId) -> Result<()> {
    let tasks = ctx.session.tasks(&artwork).await?.unwrap_or_default();

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Artwork", artwork.to_string());
    human.push_summary("Total", tasks.len().to_string());
    for task in &tasks {
        human.push_detail(task_line(task));
    }
    if tasks.is_empty() {
        human.push_next_step(format!("artmark task add {artwork} <text> --due <when>"));
    }

    emit_success(
        options(ctx),
        "task ls",
        &TaskListOutput {
            artwork_id: artwork,
            total: tasks.len(),
            tasks,
        },
        Some(&human),
    )
}

pub async fn run_done(ctx: &Context, artwork: ArtworkId, task: &TaskId) -> Result<()> {
    let tasks = ctx.session.complete_task(&artwork, task).await?;

    let mut human = HumanOutput::new("Task completed");
    human.push_summary("Artwork", artwork.to_string());
    human.push_summary("ID", task.to_string());
    for task in &tasks {
        human.push_detail(task_line(task));
    }

    emit_success(
        options(ctx),
        "task done",
        &TaskChangeOutput {
            artwork_id: artwork,
            task_id: task.clone(),
            tasks,
        },
        Some(&human),
    )
}

pub async fn run_rm(ctx: &Context, artwork: ArtworkId, task: &TaskId) -> Result<()> {
    let remaining = ctx.session.remove_task(&artwork, task).await?;

    let mut human = HumanOutput::new("Task deleted");
    human.push_summary("Artwork", artwork.to_string());
    human.push_summary("ID", task.to_string());
    match remaining.as_deref() {
        Some(tasks) => {
            human.push_summary("Remaining", tasks.len().to_string());
            for task in tasks {
                human.push_detail(task_line(task));
            }
        }
        None => human.push_summary("Remaining", "0"),
    }

    emit_success(
        options(ctx),
        "task rm",
        &TaskChangeOutput {
            artwork_id: artwork,
            task_id: task.clone(),
            tasks: remaining.unwrap_or_default(),
        },
        Some(&human),
    )
}
