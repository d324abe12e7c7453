use tracing::debug;

use crate::client::ApiService;
use crate::error::Result;
use crate::session::Session;
use crate::types::{Issue, IssueDraft, IssuePatch, Project, ProjectDraft};

/// In-memory projects/issues cache reconciled against API responses.
///
/// Every operation takes the API port and a session snapshot; without a
/// token it is a no-op handing back the unchanged local state. Mutations
/// apply the server's response, never the request: create appends the
/// returned record, update replaces the matching entry wholesale, delete
/// removes by id, fetch replaces the whole list.
///
/// The issue list is scoped to exactly one project (the selection) at all
/// times; pointing the board elsewhere drops the old list first.
pub struct EntityStore {
    projects: Vec<Project>,
    selected: Option<i64>,
    issues: Vec<Issue>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            selected: None,
            issues: Vec::new(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn selected_project(&self) -> Option<i64> {
        self.selected
    }

    /// Adopt a selection persisted by an earlier run. No fetch happens
    /// until a command asks for issues.
    pub fn restore_selection(&mut self, selected: Option<i64>) {
        self.selected = selected;
    }

    /// Point the board at `id`, dropping another project's issues.
    pub fn select_project(&mut self, id: i64) {
        if self.selected != Some(id) {
            self.issues.clear();
        }
        self.selected = Some(id);
    }

    /// Replace the project list with the server's full set.
    pub async fn fetch_projects(
        &mut self,
        api: &dyn ApiService,
        session: &Session,
    ) -> Result<&[Project]> {
        let Some(token) = session.token() else {
            return Ok(&self.projects);
        };

        self.projects = api.list_projects(token).await?;
        debug!("fetched {} projects", self.projects.len());
        Ok(&self.projects)
    }

    /// Fetch one project and reconcile it into the local list (replace by
    /// id, or append when absent).
    pub async fn fetch_project(
        &mut self,
        api: &dyn ApiService,
        session: &Session,
        id: i64,
    ) -> Result<Option<&Project>> {
        let Some(token) = session.token() else {
            return Ok(None);
        };

        let fetched = api.get_project(token, id).await?;
        match self.projects.iter_mut().find(|p| p.id == id) {
            Some(entry) => *entry = fetched,
            None => self.projects.push(fetched),
        }
        Ok(self.projects.iter().find(|p| p.id == id))
    }

    pub async fn create_project(
        &mut self,
        api: &dyn ApiService,
        session: &Session,
        draft: &ProjectDraft,
    ) -> Result<&[Project]> {
        let Some(token) = session.token() else {
            return Ok(&self.projects);
        };

        let created = api.create_project(token, draft).await?;
        self.projects.push(created);
        Ok(&self.projects)
    }

    /// Delete on the server, then drop the local entry. Deleting the
    /// selected project clears the selection and its issue list.
    pub async fn delete_project(
        &mut self,
        api: &dyn ApiService,
        session: &Session,
        id: i64,
    ) -> Result<&[Project]> {
        let Some(token) = session.token() else {
            return Ok(&self.projects);
        };

        api.delete_project(token, id).await?;
        self.projects.retain(|p| p.id != id);
        if self.selected == Some(id) {
            self.selected = None;
            self.issues.clear();
        }
        Ok(&self.projects)
    }

    /// Replace the issue list with the server's issues for `project_id`
    /// and record the selection.
    pub async fn fetch_issues(
        &mut self,
        api: &dyn ApiService,
        session: &Session,
        project_id: i64,
    ) -> Result<&[Issue]> {
        let Some(token) = session.token() else {
            return Ok(&self.issues);
        };

        // Switching projects drops the old board before the fetch so a
        // failure cannot leave another project's issues under the new
        // selection. A failed refresh keeps the stale list instead.
        if self.selected != Some(project_id) {
            self.selected = Some(project_id);
            self.issues.clear();
        }

        self.issues = api.list_issues(token, project_id).await?;
        debug!(
            "fetched {} issues for project {project_id}",
            self.issues.len()
        );
        Ok(&self.issues)
    }

    pub async fn create_issue(
        &mut self,
        api: &dyn ApiService,
        session: &Session,
        project_id: i64,
        draft: &IssueDraft,
    ) -> Result<&[Issue]> {
        let Some(token) = session.token() else {
            return Ok(&self.issues);
        };

        let created = api.create_issue(token, project_id, draft).await?;
        if self.selected != Some(project_id) {
            self.selected = Some(project_id);
            self.issues.clear();
        }
        self.issues.push(created);
        Ok(&self.issues)
    }

    /// PUT the patch, then replace the matching local entry with the
    /// server's full representation. The partial request is never merged
    /// locally; an id the board has not loaded leaves the list alone.
    pub async fn update_issue(
        &mut self,
        api: &dyn ApiService,
        session: &Session,
        id: i64,
        patch: &IssuePatch,
    ) -> Result<&[Issue]> {
        let Some(token) = session.token() else {
            return Ok(&self.issues);
        };

        let updated = api.update_issue(token, id, patch).await?;
        if let Some(entry) = self.issues.iter_mut().find(|i| i.id == id) {
            *entry = updated;
        }
        Ok(&self.issues)
    }

    pub async fn delete_issue(
        &mut self,
        api: &dyn ApiService,
        session: &Session,
        id: i64,
    ) -> Result<&[Issue]> {
        let Some(token) = session.token() else {
            return Ok(&self.issues);
        };

        api.delete_issue(token, id).await?;
        self.issues.retain(|i| i.id != id);
        Ok(&self.issues)
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
