mod field;
mod issue;
mod priority;
mod project;
mod status;
mod user;

pub use field::Field;
pub use issue::{Issue, IssueDraft, IssuePatch};
pub use priority::Priority;
pub use project::{Project, ProjectDraft};
pub use status::Status;
pub use user::User;
