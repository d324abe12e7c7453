pub mod auth;
pub mod board;
pub mod init;
pub mod issues;
pub mod projects;

use anyhow::Result;

use crate::error::TaskboardError;
use crate::session::SessionStore;
use crate::store::EntityStore;

/// Commands that touch the API refuse to run logged out.
fn require_login(session_store: &SessionStore) -> Result<()> {
    if !session_store.current().is_authenticated() {
        return Err(TaskboardError::NotLoggedIn.into());
    }
    Ok(())
}

/// An explicit --project beats the persisted selection.
fn resolve_project(explicit: Option<i64>, store: &EntityStore) -> Result<i64> {
    explicit
        .or_else(|| store.selected_project())
        .ok_or_else(|| TaskboardError::NoProjectSelected.into())
}

/// Swap a server 404 for the richer view-layer error.
fn not_found(err: TaskboardError, instead: TaskboardError) -> anyhow::Error {
    match err {
        TaskboardError::Api { status: 404, .. } => instead.into(),
        other => other.into(),
    }
}
