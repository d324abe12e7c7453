//! Shared test double for the API seam.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{ApiService, TokenResponse};
use crate::error::{Result, TaskboardError};
use crate::types::{
    Field, Issue, IssueDraft, IssuePatch, Priority, Project, ProjectDraft, Status, User,
};

const TIMESTAMP: &str = "2026-01-01T00:00:00";

/// In-memory stand-in for the remote tracker.
///
/// Tests can seed server-side records, inject a one-shot failure per
/// method, and inspect the calls that were made.
pub struct FakeApi {
    state: Mutex<FakeState>,
}

struct FakeState {
    next_id: i64,
    projects: Vec<Project>,
    issues: Vec<Issue>,
    calls: Vec<String>,
    failures: HashMap<String, TaskboardError>,
}

impl FakeState {
    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check(&mut self, call: String, method: &str) -> Result<()> {
        self.calls.push(call);
        match self.failures.remove(method) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                next_id: 1,
                projects: Vec::new(),
                issues: Vec::new(),
                calls: Vec::new(),
                failures: HashMap::new(),
            }),
        }
    }

    /// Make the next call to `method` fail with `err`.
    pub fn fail_on(&self, method: &str, err: TaskboardError) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(method.to_string(), err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn seed_project(&self, title: &str) -> Project {
        let mut state = self.state.lock().unwrap();
        let id = state.take_id();
        let project = Project {
            id,
            title: title.to_string(),
            description: None,
            owner_id: 1,
            created_at: TIMESTAMP.to_string(),
        };
        state.projects.push(project.clone());
        project
    }

    pub fn seed_issue(&self, project_id: i64, title: &str, status: Status) -> Issue {
        let mut state = self.state.lock().unwrap();
        let id = state.take_id();
        let issue = Issue {
            id,
            title: title.to_string(),
            description: None,
            status,
            priority: Priority::Medium,
            assignee: None,
            project_id,
            created_at: TIMESTAMP.to_string(),
        };
        state.issues.push(issue.clone());
        issue
    }
}

fn apply_patch(issue: &mut Issue, patch: &IssuePatch) {
    if let Some(title) = &patch.title {
        issue.title = title.clone();
    }
    match &patch.description {
        Field::Unchanged => {}
        Field::Set(v) => issue.description = Some(v.clone()),
        Field::Clear => issue.description = None,
    }
    if let Some(status) = patch.status {
        issue.status = status;
    }
    if let Some(priority) = patch.priority {
        issue.priority = priority;
    }
    match &patch.assignee {
        Field::Unchanged => {}
        Field::Set(v) => issue.assignee = Some(v.clone()),
        Field::Clear => issue.assignee = None,
    }
}

#[async_trait]
impl ApiService for FakeApi {
    async fn login(&self, email: &str, _password: &str) -> Result<TokenResponse> {
        let mut state = self.state.lock().unwrap();
        state.check(format!("login {email}"), "login")?;
        Ok(TokenResponse {
            access_token: "tok-test".to_string(),
            token_type: "bearer".to_string(),
        })
    }

    async fn signup(&self, email: &str, _password: &str) -> Result<User> {
        let mut state = self.state.lock().unwrap();
        state.check(format!("signup {email}"), "signup")?;
        let id = state.take_id();
        Ok(User {
            id,
            email: email.to_string(),
            created_at: TIMESTAMP.to_string(),
        })
    }

    async fn list_projects(&self, _token: &str) -> Result<Vec<Project>> {
        let mut state = self.state.lock().unwrap();
        state.check("list_projects".to_string(), "list_projects")?;
        Ok(state.projects.clone())
    }

    async fn create_project(&self, _token: &str, draft: &ProjectDraft) -> Result<Project> {
        let mut state = self.state.lock().unwrap();
        state.check(format!("create_project {}", draft.title), "create_project")?;
        let id = state.take_id();
        let project = Project {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            owner_id: 1,
            created_at: TIMESTAMP.to_string(),
        };
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn get_project(&self, _token: &str, id: i64) -> Result<Project> {
        let mut state = self.state.lock().unwrap();
        state.check(format!("get_project {id}"), "get_project")?;
        state
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(TaskboardError::Api {
                status: 404,
                message: "Project not found".to_string(),
            })
    }

    async fn delete_project(&self, _token: &str, id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.check(format!("delete_project {id}"), "delete_project")?;
        if !state.projects.iter().any(|p| p.id == id) {
            return Err(TaskboardError::Api {
                status: 404,
                message: "Project not found".to_string(),
            });
        }
        state.projects.retain(|p| p.id != id);
        state.issues.retain(|i| i.project_id != id);
        Ok(())
    }

    async fn list_issues(&self, _token: &str, project_id: i64) -> Result<Vec<Issue>> {
        let mut state = self.state.lock().unwrap();
        state.check(format!("list_issues {project_id}"), "list_issues")?;
        Ok(state
            .issues
            .iter()
            .filter(|i| i.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_issue(
        &self,
        _token: &str,
        project_id: i64,
        draft: &IssueDraft,
    ) -> Result<Issue> {
        let mut state = self.state.lock().unwrap();
        state.check(format!("create_issue {project_id}"), "create_issue")?;
        let id = state.take_id();
        let issue = Issue {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            priority: draft.priority,
            assignee: draft.assignee.clone(),
            project_id,
            created_at: TIMESTAMP.to_string(),
        };
        state.issues.push(issue.clone());
        Ok(issue)
    }

    async fn update_issue(&self, _token: &str, id: i64, patch: &IssuePatch) -> Result<Issue> {
        let mut state = self.state.lock().unwrap();
        state.check(format!("update_issue {id}"), "update_issue")?;
        let issue = state
            .issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(TaskboardError::Api {
                status: 404,
                message: "Issue not found".to_string(),
            })?;
        apply_patch(issue, patch);
        Ok(issue.clone())
    }

    async fn delete_issue(&self, _token: &str, id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.check(format!("delete_issue {id}"), "delete_issue")?;
        if !state.issues.iter().any(|i| i.id == id) {
            return Err(TaskboardError::Api {
                status: 404,
                message: "Issue not found".to_string(),
            });
        }
        state.issues.retain(|i| i.id != id);
        Ok(())
    }
}
