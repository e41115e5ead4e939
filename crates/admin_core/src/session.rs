use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

/// Holds the bearer token of the signed-in administrator.
///
/// Cloning shares the same slot, so the session handed to the login form and
/// the one held by the HTTP client observe the same token.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn login(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
        info!("auth: session established");
    }

    pub async fn logout(&self) {
        if self.token.write().await.take().is_some() {
            info!("auth: session cleared");
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.token.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn session_lifecycle_is_empty_set_cleared() {
        let session = AuthSession::new();
        assert!(!session.is_logged_in().await);

        let shared = session.clone();
        session.login("tok-1").await;
        assert_eq!(shared.token().await.as_deref(), Some("tok-1"));

        shared.logout().await;
        assert!(!session.is_logged_in().await);
    }
}
