use anyhow::Result;
use dialoguer::Confirm;
use tabled::Tabled;

use crate::cli::ProjectCreateArgs;
use crate::client::ApiService;
use crate::error::TaskboardError;
use crate::forms;
use crate::output;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::store::EntityStore;
use crate::types::Project;

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            description: output::truncate(project.description.as_deref().unwrap_or(""), 40),
            created: output::format_date(&project.created_at),
        }
    }
}

pub async fn list(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
) -> Result<()> {
    super::require_login(session_store)?;

    let projects = store.fetch_projects(api, session_store.current()).await?;

    if projects.is_empty() && !output::is_json_output() {
        output::print_message(
            "No projects yet. Create one with 'taskboard project create -t \"Title\"'.",
        );
        return Ok(());
    }

    output::print_table(projects, |p| ProjectRow::from(p));

    Ok(())
}

pub async fn create(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    args: ProjectCreateArgs,
) -> Result<()> {
    super::require_login(session_store)?;

    let draft = forms::project_draft(&args.title, args.description.as_deref())?;
    let projects = store
        .create_project(api, session_store.current(), &draft)
        .await?;

    if let Some(project) = projects.last() {
        output::print_item(project, |p| {
            output::print_message(&format!("Created project #{} {}", p.id, p.title));
        });
    }

    Ok(())
}

pub async fn show(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    id: i64,
) -> Result<()> {
    super::require_login(session_store)?;

    let project = store
        .fetch_project(api, session_store.current(), id)
        .await
        .map_err(|e| super::not_found(e, TaskboardError::ProjectNotFound(id)))?
        .ok_or(TaskboardError::ProjectNotFound(id))?;

    output::print_item(project, |p| {
        println!("Project #{}", p.id);
        println!("  Title:       {}", p.title);
        if let Some(description) = &p.description {
            println!("  Description: {description}");
        }
        println!("  Created:     {}", output::format_date(&p.created_at));
    });

    Ok(())
}

pub async fn select(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    app_state: &mut AppState,
    id: i64,
) -> Result<()> {
    super::require_login(session_store)?;

    // Verify the project exists before making it sticky.
    store
        .fetch_project(api, session_store.current(), id)
        .await
        .map_err(|e| super::not_found(e, TaskboardError::ProjectNotFound(id)))?;

    store.select_project(id);
    app_state.selected_project = Some(id);
    app_state.save();

    let title = store
        .projects()
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.title.clone())
        .unwrap_or_default();
    output::print_message(&format!("Selected project #{id} {title}"));

    Ok(())
}

pub async fn delete(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    app_state: &mut AppState,
    id: i64,
    yes: bool,
) -> Result<()> {
    super::require_login(session_store)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete project #{id} and all of its issues? This cannot be undone."
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output::print_message("Aborted.");
            return Ok(());
        }
    }

    store
        .delete_project(api, session_store.current(), id)
        .await
        .map_err(|e| super::not_found(e, TaskboardError::ProjectNotFound(id)))?;

    if app_state.selected_project == Some(id) {
        app_state.selected_project = None;
        app_state.save();
    }

    output::print_message(&format!("Deleted project #{id}"));

    Ok(())
}
