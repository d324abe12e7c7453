use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::client::ApiService;
use crate::config::Config;
use crate::error::{Result, TaskboardError};
use crate::types::User;

/// Immutable view of the current authentication state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

#[cfg(test)]
impl Session {
    pub fn authenticated(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            user: None,
        }
    }
}

/// Owns the session and the token file backing it.
///
/// The stored token is never validated up front; a revoked or expired
/// credential surfaces on the first authenticated call that fails.
pub struct SessionStore {
    session: Session,
    token_path: PathBuf,
}

impl SessionStore {
    /// Load any persisted token from the platform config directory.
    pub fn load() -> Result<Self> {
        let token_path = Config::config_path()?.with_file_name("token");
        Ok(Self::load_from(token_path))
    }

    /// A missing or unreadable token file means logged out, not an error.
    pub fn load_from(token_path: PathBuf) -> Self {
        let token = std::fs::read_to_string(&token_path)
            .ok()
            .map(|contents| contents.trim().to_string())
            .filter(|token| !token.is_empty());

        Self {
            session: Session { token, user: None },
            token_path,
        }
    }

    pub fn current(&self) -> &Session {
        &self.session
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// Exchange credentials for a bearer token and persist it.
    pub async fn login(
        &mut self,
        api: &dyn ApiService,
        email: &str,
        password: &str,
    ) -> Result<&Session> {
        let response = api.login(email, password).await?;
        self.persist_token(&response.access_token)?;

        // The backend has no profile endpoint, so project the identity we
        // already know.
        self.session = Session {
            token: Some(response.access_token),
            user: Some(User {
                id: 0,
                email: email.to_string(),
                created_at: Utc::now().to_rfc3339(),
            }),
        };

        debug!("logged in as {email}");
        Ok(&self.session)
    }

    /// Create the account, then log straight in with the same credentials.
    pub async fn signup(
        &mut self,
        api: &dyn ApiService,
        email: &str,
        password: &str,
    ) -> Result<&Session> {
        let user = api.signup(email, password).await?;
        debug!("account {} created (id {})", user.email, user.id);

        self.login(api, email, password).await?;
        // Keep the server's record over the login projection.
        self.session.user = Some(user);
        Ok(&self.session)
    }

    /// Drop the in-memory session and the stored token. No server call.
    pub fn logout(&mut self) -> Result<()> {
        self.session = Session::default();

        match std::fs::remove_file(&self.token_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TaskboardError::TokenStore {
                path: self.token_path.clone(),
                source: e,
            }),
        }
    }

    fn persist_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TaskboardError::TokenStore {
                path: self.token_path.clone(),
                source: e,
            })?;
        }

        std::fs::write(&self.token_path, token).map_err(|e| TaskboardError::TokenStore {
            path: self.token_path.clone(),
            source: e,
        })
    }
}
