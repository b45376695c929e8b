//! Cookie-keyed sessions.
//!
//! `tower-sessions` owns the cookie and persistence; [`Session`] is the typed
//! view handlers use for the signed-in identity and flash messages.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tower_sessions::cookie::SameSite;
use tower_sessions::SessionManagerLayer;

use crate::config::{session_keys, Config, SESSION_COOKIE_NAME};
use crate::errors::{AppError, AppResult};
use crate::infra::session::{session_expiry, DirectoryStore};
use crate::infra::{Flash, FlashLevel, SessionUser};

/// Session layer over the configured store. A cookie is only issued once a
/// session has something to hold.
pub fn session_layer(store: DirectoryStore, config: &Config) -> SessionManagerLayer<DirectoryStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(session_expiry(config.session_ttl_seconds))
        .with_secure(config.session_cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Handle on the current request's session.
#[derive(Clone)]
pub struct Session(tower_sessions::Session);

impl Session {
    /// The signed-in identity. An unreadable entry counts as signed out.
    pub async fn user(&self) -> Option<SessionUser> {
        match self.0.get::<SessionUser>(session_keys::USER).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Unreadable session identity: {}", e);
                None
            }
        }
    }

    /// Store the identity under a fresh session id.
    pub async fn sign_in(&self, user: SessionUser) -> AppResult<()> {
        self.0.cycle_id().await?;
        self.0.insert(session_keys::USER, user).await?;
        Ok(())
    }

    /// Forget the identity and rotate the id. Safe to call when nobody is
    /// signed in; pending flashes survive.
    pub async fn sign_out(&self) -> AppResult<()> {
        self.0.remove::<SessionUser>(session_keys::USER).await?;
        self.0.cycle_id().await?;
        Ok(())
    }

    pub async fn flash(&self, level: FlashLevel, message: impl Into<String>) {
        let mut flashes = self.pending_flashes().await;
        flashes.push(Flash::new(level, message));
        if let Err(e) = self.0.insert(session_keys::FLASHES, flashes).await {
            tracing::warn!("Failed to store flash: {}", e);
        }
    }

    /// Pending flashes, removed from the session. An anonymous session left
    /// with nothing is dropped along with its cookie.
    pub async fn take_flashes(&self) -> Vec<Flash> {
        let flashes = match self.0.remove::<Vec<Flash>>(session_keys::FLASHES).await {
            Ok(flashes) => flashes.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Dropping unreadable flashes: {}", e);
                Vec::new()
            }
        };

        if !flashes.is_empty() && self.user().await.is_none() {
            if let Err(e) = self.0.flush().await {
                tracing::warn!("Failed to drop empty session: {}", e);
            }
        }
        flashes
    }

    async fn pending_flashes(&self) -> Vec<Flash> {
        self.0
            .get::<Vec<Flash>>(session_keys::FLASHES)
            .await
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<tower_sessions::Session>()
            .cloned()
            .map(Session)
            .ok_or_else(|| AppError::internal("Session layer not installed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tower_sessions::session_store::SessionStore;
    use tower_sessions::MemoryStore;

    use crate::domain::UserRole;

    fn session(store: &Arc<MemoryStore>) -> Session {
        Session(tower_sessions::Session::new(
            None,
            store.clone(),
            Some(session_expiry(60)),
        ))
    }

    fn ana() -> SessionUser {
        SessionUser {
            id: 7,
            username: "ana".into(),
            role: UserRole::Explorer,
        }
    }

    #[tokio::test]
    async fn test_flashes_are_taken_once() {
        let store = Arc::new(MemoryStore::default());
        let session = session(&store);

        session.flash(FlashLevel::Info, "uno").await;
        session.flash(FlashLevel::Danger, "dos").await;

        let flashes = session.take_flashes().await;
        assert_eq!(
            flashes,
            vec![
                Flash::new(FlashLevel::Info, "uno"),
                Flash::new(FlashLevel::Danger, "dos")
            ]
        );
        assert!(session.take_flashes().await.is_empty());
    }

    #[tokio::test]
    async fn test_consumed_anonymous_session_is_dropped() {
        let store = Arc::new(MemoryStore::default());
        let session = session(&store);

        session.flash(FlashLevel::Info, "Has cerrado sesión").await;
        session.0.save().await.unwrap();
        let id = session.0.id().unwrap();

        assert_eq!(session.take_flashes().await.len(), 1);
        assert!(session.0.id().is_none());
        assert!(store.load(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_rotates_session_id() {
        let store = Arc::new(MemoryStore::default());
        let session = session(&store);

        session.flash(FlashLevel::Info, "antes").await;
        session.0.save().await.unwrap();
        let before = session.0.id().unwrap();

        session.sign_in(ana()).await.unwrap();
        session.0.save().await.unwrap();
        let after = session.0.id().unwrap();

        assert_ne!(before, after);
        assert!(store.load(&before).await.unwrap().is_none());
        assert_eq!(session.user().await, Some(ana()));
        // Pending flashes carry over to the new id
        assert_eq!(session.take_flashes().await.len(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_forgets_identity() {
        let store = Arc::new(MemoryStore::default());
        let session = session(&store);

        session.sign_in(ana()).await.unwrap();
        session.0.save().await.unwrap();
        let signed_in = session.0.id().unwrap();

        session.sign_out().await.unwrap();
        assert_eq!(session.user().await, None);
        assert!(store.load(&signed_in).await.unwrap().is_none());

        // Signing out twice is harmless
        session.sign_out().await.unwrap();
    }
}
