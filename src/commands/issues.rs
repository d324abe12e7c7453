use anyhow::Result;
use dialoguer::Confirm;
use tabled::Tabled;

use crate::board;
use crate::cli::{IssueCreateArgs, IssueListArgs, IssueMoveArgs, IssueUpdateArgs};
use crate::client::ApiService;
use crate::error::TaskboardError;
use crate::forms::{self, IssueEdit};
use crate::output;
use crate::session::SessionStore;
use crate::store::EntityStore;
use crate::types::Issue;

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id,
            title: output::truncate(&issue.title, 40),
            status: issue.status.colored(),
            priority: issue.priority.colored(),
            assignee: issue.assignee.clone().unwrap_or_default(),
            created: output::format_relative(&issue.created_at),
        }
    }
}

pub async fn list(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    args: IssueListArgs,
) -> Result<()> {
    super::require_login(session_store)?;
    let project_id = super::resolve_project(args.project, store)?;

    let issues = store
        .fetch_issues(api, session_store.current(), project_id)
        .await?;

    let filtered: Vec<&Issue> = issues
        .iter()
        .filter(|issue| args.status.is_none_or(|status| issue.status == status))
        .collect();

    if filtered.is_empty() && !output::is_json_output() {
        output::print_message("No issues found.");
        return Ok(());
    }

    output::print_table(&filtered, |issue| IssueRow::from(*issue));

    Ok(())
}

pub async fn show(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    id: i64,
    project: Option<i64>,
) -> Result<()> {
    super::require_login(session_store)?;
    let project_id = super::resolve_project(project, store)?;

    let issues = store
        .fetch_issues(api, session_store.current(), project_id)
        .await?;
    let issue = issues
        .iter()
        .find(|issue| issue.id == id)
        .ok_or(TaskboardError::IssueNotFound(id))?;

    output::print_item(issue, |issue| {
        println!("Issue #{}", issue.id);
        println!("  Title:    {}", issue.title);
        println!("  Status:   {}", issue.status.colored());
        println!("  Priority: {}", issue.priority.colored());
        if let Some(assignee) = &issue.assignee {
            println!("  Assignee: {assignee}");
        }
        if let Some(description) = &issue.description {
            println!("  Description: {description}");
        }
        println!("  Created:  {}", output::format_date(&issue.created_at));
    });

    Ok(())
}

pub async fn create(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    args: IssueCreateArgs,
) -> Result<()> {
    super::require_login(session_store)?;
    let project_id = super::resolve_project(args.project, store)?;

    let draft = forms::issue_draft(
        &args.title,
        args.description.as_deref(),
        args.status,
        args.priority,
        args.assignee.as_deref(),
    )?;

    let issues = store
        .create_issue(api, session_store.current(), project_id, &draft)
        .await?;

    if let Some(issue) = issues.last() {
        output::print_item(issue, |issue| {
            output::print_message(&format!(
                "Created issue #{} {} [{}]",
                issue.id,
                issue.title,
                issue.status.label()
            ));
        });
    }

    Ok(())
}

pub async fn update(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    args: IssueUpdateArgs,
) -> Result<()> {
    super::require_login(session_store)?;
    let project_id = super::resolve_project(args.project, store)?;

    let issues = store
        .fetch_issues(api, session_store.current(), project_id)
        .await?;
    let current = issues
        .iter()
        .find(|issue| issue.id == args.id)
        .cloned()
        .ok_or(TaskboardError::IssueNotFound(args.id))?;

    let edit = IssueEdit {
        title: args.title,
        description: args.description,
        clear_description: args.clear_description,
        status: args.status,
        priority: args.priority,
        assignee: args.assignee,
        clear_assignee: args.clear_assignee,
    };

    let patch = forms::issue_patch(&current, &edit)?;
    if patch.is_empty() {
        output::print_message("Nothing to update.");
        return Ok(());
    }

    let issues = store
        .update_issue(api, session_store.current(), args.id, &patch)
        .await?;

    if let Some(issue) = issues.iter().find(|issue| issue.id == args.id) {
        output::print_item(issue, |issue| {
            output::print_message(&format!("Updated issue #{} {}", issue.id, issue.title));
        });
    }

    Ok(())
}

pub async fn move_issue(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    args: IssueMoveArgs,
) -> Result<()> {
    super::require_login(session_store)?;
    let project_id = super::resolve_project(args.project, store)?;

    let issues = store
        .fetch_issues(api, session_store.current(), project_id)
        .await?;
    let current = issues
        .iter()
        .find(|issue| issue.id == args.id)
        .cloned()
        .ok_or(TaskboardError::IssueNotFound(args.id))?;

    let Some(patch) = board::transition(&current, args.status) else {
        output::print_message(&format!(
            "Issue #{} is already in {}.",
            args.id,
            args.status.label()
        ));
        return Ok(());
    };

    store
        .update_issue(api, session_store.current(), args.id, &patch)
        .await?;

    output::print_message(&format!(
        "Moved issue #{} to {}.",
        args.id,
        args.status.label()
    ));

    Ok(())
}

pub async fn delete(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    id: i64,
    yes: bool,
    project: Option<i64>,
) -> Result<()> {
    super::require_login(session_store)?;
    let project_id = super::resolve_project(project, store)?;

    let issues = store
        .fetch_issues(api, session_store.current(), project_id)
        .await?;
    if !issues.iter().any(|issue| issue.id == id) {
        return Err(TaskboardError::IssueNotFound(id).into());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete issue #{id}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            output::print_message("Aborted.");
            return Ok(());
        }
    }

    store
        .delete_issue(api, session_store.current(), id)
        .await
        .map_err(|e| super::not_found(e, TaskboardError::IssueNotFound(id)))?;

    output::print_message(&format!("Deleted issue #{id}"));

    Ok(())
}
