use crate::error::{Result, TaskboardError};
use crate::types::{Field, Issue, IssueDraft, IssuePatch, Priority, ProjectDraft, Status};

pub const PROJECT_TITLE_MAX: usize = 100;
pub const PROJECT_DESCRIPTION_MAX: usize = 500;
pub const ISSUE_TITLE_MAX: usize = 200;
pub const ISSUE_DESCRIPTION_MAX: usize = 1000;
pub const ISSUE_ASSIGNEE_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;

/// Trim, require non-empty, enforce the length limit.
pub fn required_text(label: &str, value: &str, max: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskboardError::Validation(format!("{label} is required")));
    }
    if trimmed.chars().count() > max {
        return Err(TaskboardError::Validation(format!(
            "{label} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim and enforce the length limit; empty after trimming means absent.
pub fn optional_text(label: &str, value: &str, max: usize) -> Result<Option<String>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(TaskboardError::Validation(format!(
            "{label} must be at most {max} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

pub fn email(value: &str) -> Result<String> {
    let trimmed = required_text("Email", value, EMAIL_MAX)?;
    if !trimmed.contains('@') {
        return Err(TaskboardError::Validation(
            "Enter a valid email address".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Passwords are taken verbatim, only emptiness is rejected.
pub fn password(value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(TaskboardError::Validation(
            "Password is required".to_string(),
        ));
    }
    Ok(value.to_string())
}

pub fn project_draft(title: &str, description: Option<&str>) -> Result<ProjectDraft> {
    Ok(ProjectDraft {
        title: required_text("Title", title, PROJECT_TITLE_MAX)?,
        description: match description {
            Some(text) => optional_text("Description", text, PROJECT_DESCRIPTION_MAX)?,
            None => None,
        },
    })
}

pub fn issue_draft(
    title: &str,
    description: Option<&str>,
    status: Status,
    priority: Priority,
    assignee: Option<&str>,
) -> Result<IssueDraft> {
    Ok(IssueDraft {
        title: required_text("Title", title, ISSUE_TITLE_MAX)?,
        description: match description {
            Some(text) => optional_text("Description", text, ISSUE_DESCRIPTION_MAX)?,
            None => None,
        },
        status,
        priority,
        assignee: match assignee {
            Some(text) => optional_text("Assignee", text, ISSUE_ASSIGNEE_MAX)?,
            None => None,
        },
    })
}

/// What the user asked `issue update` to do, before the dirty check.
#[derive(Debug, Default)]
pub struct IssueEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub clear_description: bool,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub clear_assignee: bool,
}

/// Compare the edit against the loaded snapshot and keep only real
/// changes. An empty patch means there is nothing to send.
pub fn issue_patch(current: &Issue, edit: &IssueEdit) -> Result<IssuePatch> {
    let mut patch = IssuePatch::default();

    if let Some(title) = &edit.title {
        let trimmed = required_text("Title", title, ISSUE_TITLE_MAX)?;
        if trimmed != current.title {
            patch.title = Some(trimmed);
        }
    }

    patch.description = text_change(
        "Description",
        current.description.as_deref(),
        edit.description.as_deref(),
        edit.clear_description,
        ISSUE_DESCRIPTION_MAX,
    )?;

    if let Some(status) = edit.status {
        if status != current.status {
            patch.status = Some(status);
        }
    }

    if let Some(priority) = edit.priority {
        if priority != current.priority {
            patch.priority = Some(priority);
        }
    }

    patch.assignee = text_change(
        "Assignee",
        current.assignee.as_deref(),
        edit.assignee.as_deref(),
        edit.clear_assignee,
        ISSUE_ASSIGNEE_MAX,
    )?;

    Ok(patch)
}

/// Dirty check for one nullable text field. An explicit clear (flag or
/// empty-after-trim value) of an already-absent field stays `Unchanged`.
fn text_change(
    label: &str,
    current: Option<&str>,
    provided: Option<&str>,
    clear: bool,
    max: usize,
) -> Result<Field<String>> {
    if clear {
        return Ok(if current.is_some() {
            Field::Clear
        } else {
            Field::Unchanged
        });
    }

    let Some(value) = provided else {
        return Ok(Field::Unchanged);
    };

    match optional_text(label, value, max)? {
        None => Ok(if current.is_some() {
            Field::Clear
        } else {
            Field::Unchanged
        }),
        Some(trimmed) => {
            if current == Some(trimmed.as_str()) {
                Ok(Field::Unchanged)
            } else {
                Ok(Field::Set(trimmed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Issue {
        Issue {
            id: 1,
            title: "Fix login".to_string(),
            description: Some("Session expires too early".to_string()),
            status: Status::Todo,
            priority: Priority::Medium,
            assignee: None,
            project_id: 1,
            created_at: "2026-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn test_blank_title_is_rejected() {
        assert!(matches!(
            project_draft("   ", None),
            Err(TaskboardError::Validation(_))
        ));
    }

    #[test]
    fn test_title_over_limit_is_rejected() {
        let long = "x".repeat(PROJECT_TITLE_MAX + 1);
        assert!(project_draft(&long, None).is_err());

        let fits = "x".repeat(PROJECT_TITLE_MAX);
        assert!(project_draft(&fits, None).is_ok());
    }

    #[test]
    fn test_create_trims_and_drops_empty_optionals() {
        let draft = issue_draft(
            "  Fix login  ",
            Some("   "),
            Status::Todo,
            Priority::Medium,
            Some(" alice "),
        )
        .unwrap();

        assert_eq!(draft.title, "Fix login");
        assert_eq!(draft.description, None);
        assert_eq!(draft.assignee, Some("alice".to_string()));
    }

    #[test]
    fn test_unchanged_edit_produces_empty_patch() {
        let current = snapshot();
        let edit = IssueEdit {
            title: Some("  Fix login ".to_string()),
            description: Some("Session expires too early".to_string()),
            status: Some(Status::Todo),
            priority: Some(Priority::Medium),
            ..IssueEdit::default()
        };

        let patch = issue_patch(&current, &edit).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_setting_absent_assignee_patches_it() {
        let current = snapshot();
        let edit = IssueEdit {
            assignee: Some("Alice".to_string()),
            ..IssueEdit::default()
        };

        let patch = issue_patch(&current, &edit).unwrap();
        assert_eq!(patch.assignee, Field::Set("Alice".to_string()));
        assert!(patch.title.is_none());
        assert!(patch.status.is_none());
    }

    #[test]
    fn test_clear_description_emits_null_intent() {
        let current = snapshot();
        let edit = IssueEdit {
            clear_description: true,
            ..IssueEdit::default()
        };

        let patch = issue_patch(&current, &edit).unwrap();
        assert_eq!(patch.description, Field::Clear);
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_empty_string_update_clears() {
        let current = snapshot();
        let edit = IssueEdit {
            description: Some("   ".to_string()),
            ..IssueEdit::default()
        };

        let patch = issue_patch(&current, &edit).unwrap();
        assert_eq!(patch.description, Field::Clear);
    }

    #[test]
    fn test_clearing_absent_field_stays_unchanged() {
        let current = snapshot();
        let edit = IssueEdit {
            clear_assignee: true,
            ..IssueEdit::default()
        };

        let patch = issue_patch(&current, &edit).unwrap();
        assert_eq!(patch.assignee, Field::Unchanged);
        assert!(patch.is_empty());
    }

    #[test]
    fn test_status_change_is_detected() {
        let current = snapshot();
        let edit = IssueEdit {
            status: Some(Status::Done),
            ..IssueEdit::default()
        };

        let patch = issue_patch(&current, &edit).unwrap();
        assert_eq!(patch.status, Some(Status::Done));
        assert_eq!(patch.description, Field::Unchanged);
    }

    #[test]
    fn test_title_dirty_check_uses_trimmed_equality() {
        let current = snapshot();
        let edit = IssueEdit {
            title: Some("Fix login properly".to_string()),
            ..IssueEdit::default()
        };

        let patch = issue_patch(&current, &edit).unwrap();
        assert_eq!(patch.title, Some("Fix login properly".to_string()));
    }

    #[test]
    fn test_email_requires_at_sign() {
        assert!(email("alice@example.com").is_ok());
        assert!(email(" alice@example.com ").is_ok());
        assert!(email("alice.example.com").is_err());
        assert!(email("   ").is_err());
    }
}
