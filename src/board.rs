use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::output;
use crate::types::{Issue, IssuePatch, Status};

const CARD_TITLE_WIDTH: usize = 28;
const CARD_ASSIGNEE_WIDTH: usize = 16;

/// The three board columns, in fixed To Do → In Progress → Done order.
#[derive(Serialize, Debug)]
pub struct BoardColumns<'a> {
    pub todo: Vec<&'a Issue>,
    pub in_progress: Vec<&'a Issue>,
    pub done: Vec<&'a Issue>,
}

impl BoardColumns<'_> {
    fn column(&self, status: Status) -> &[&Issue] {
        match status {
            Status::Todo => &self.todo,
            Status::InProgress => &self.in_progress,
            Status::Done => &self.done,
        }
    }
}

/// Stable single-pass split of the issue list by status; relative order
/// within each column follows the input list.
pub fn partition(issues: &[Issue]) -> BoardColumns<'_> {
    let mut columns = BoardColumns {
        todo: Vec::new(),
        in_progress: Vec::new(),
        done: Vec::new(),
    };

    for issue in issues {
        match issue.status {
            Status::Todo => columns.todo.push(issue),
            Status::InProgress => columns.in_progress.push(issue),
            Status::Done => columns.done.push(issue),
        }
    }

    columns
}

/// Decide what a move intent means: dropping an issue on its own column
/// is a no-op, any other column is exactly one status-only update.
pub fn transition(issue: &Issue, target: Status) -> Option<IssuePatch> {
    if issue.status == target {
        return None;
    }
    Some(IssuePatch::status_only(target))
}

/// Render the columns side by side as one rounded table.
pub fn render(columns: &BoardColumns<'_>) -> String {
    let mut builder = Builder::default();

    builder.push_record(
        Status::COLUMNS
            .map(|status| format!("{} ({})", status.colored(), columns.column(status).len())),
    );

    let rows = Status::COLUMNS
        .iter()
        .map(|status| columns.column(*status).len())
        .max()
        .unwrap_or(0);
    for row in 0..rows {
        builder.push_record(Status::COLUMNS.map(|status| {
            columns
                .column(status)
                .get(row)
                .map(|issue| card(issue))
                .unwrap_or_default()
        }));
    }

    builder.build().with(Style::rounded()).to_string()
}

fn card(issue: &Issue) -> String {
    let title = output::truncate(&issue.title, CARD_TITLE_WIDTH);
    let mut meta = issue.priority.colored();
    if let Some(assignee) = &issue.assignee {
        meta = format!("{meta} · {}", output::truncate(assignee, CARD_ASSIGNEE_WIDTH));
    }
    format!("#{} {}\n{}", issue.id, title, meta)
}
