//! Authentication service - sessions, roles and role-change events.
//!
//! Credentials are verified by the black-box auth provider; this service
//! keeps the local session snapshot and publishes role changes on a
//! watch channel so the composition root can swap the active interface
//! without polling local storage.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{Session, UserRole};
use crate::errors::AppResult;
use crate::infra::{AuthProvider, PreferenceStore};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign in and persist the session snapshot
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Create an account and persist the session snapshot
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Clear the session
    async fn sign_out(&self) -> AppResult<()>;

    /// Republish the session persisted from a previous run, if any
    async fn restore(&self) -> Option<Session>;

    /// Currently signed-in session
    async fn current_session(&self) -> Option<Session>;

    /// Subscribe to role changes (None = signed out)
    fn subscribe_roles(&self) -> watch::Receiver<Option<UserRole>>;
}

/// Concrete implementation of AuthService
pub struct Authenticator {
    provider: Arc<dyn AuthProvider>,
    prefs: Arc<PreferenceStore>,
    roles: watch::Sender<Option<UserRole>>,
}

impl Authenticator {
    pub fn new(provider: Arc<dyn AuthProvider>, prefs: Arc<PreferenceStore>) -> Self {
        let (roles, _) = watch::channel(None);
        Self { provider, prefs, roles }
    }

    async fn adopt(&self, session: Session) -> AppResult<Session> {
        self.prefs.set_session(Some(session.clone())).await?;
        self.roles.send_replace(Some(session.role));
        Ok(session)
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let identity = self.provider.sign_in(email, password).await?;
        let session = Session {
            user_id: identity.user_id,
            email: identity.email,
            role: UserRole::from(identity.role),
        };

        tracing::info!(user_id = %session.user_id, role = %session.role, "Signed in");
        self.adopt(session).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session> {
        let identity = self.provider.sign_up(email, password).await?;
        let session = Session {
            user_id: identity.user_id,
            email: identity.email,
            role: UserRole::from(identity.role),
        };

        tracing::info!(user_id = %session.user_id, "Account created");
        self.adopt(session).await
    }

    async fn sign_out(&self) -> AppResult<()> {
        self.prefs.set_session(None).await?;
        self.roles.send_replace(None);
        Ok(())
    }

    async fn restore(&self) -> Option<Session> {
        let session = self.prefs.session().await;
        self.roles.send_replace(session.as_ref().map(|s| s.role));
        session
    }

    async fn current_session(&self) -> Option<Session> {
        self.prefs.session().await
    }

    fn subscribe_roles(&self) -> watch::Receiver<Option<UserRole>> {
        self.roles.subscribe()
    }
}
