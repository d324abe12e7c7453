use serde::{Deserialize, Serialize};

use super::{Field, Priority, Status};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Issue {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub project_id: i64,
    pub created_at: String,
}

/// Body for `POST /projects/{id}/issues`.
#[derive(Serialize, Debug, Clone)]
pub struct IssueDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

/// Body for `PUT /issues/{id}`: only fields that actually change are sent.
///
/// `title`, `status` and `priority` can never be cleared, so plain `Option`
/// (None = leave unchanged) is enough for them. The nullable text columns
/// use [`Field`] so that clearing and leaving alone stay distinct on the
/// wire.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct IssuePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Field::is_unchanged")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Field::is_unchanged")]
    pub assignee: Field<String>,
}

impl IssuePatch {
    /// Patch that only moves the issue to `status`.
    pub fn status_only(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_unchanged()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_unchanged()
    }
}
