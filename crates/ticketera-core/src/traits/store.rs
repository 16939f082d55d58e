//! Session storage trait and an in-memory implementation.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::tokens::{AccessToken, RefreshToken, TokenPair};
use crate::types::{Reservation, User};

/// Client-side state persisted between requests.
///
/// Opaque to the server. All fields are invalidated together on logout or
/// when the session cannot be refreshed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<AccessToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<RefreshToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Bridges the reservation step to checkout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_reservation: Option<Reservation>,
}

impl StoredSession {
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none()
            && self.refresh_token.is_none()
            && self.user.is_none()
            && self.current_reservation.is_none()
    }
}

/// A modification applied to the stored session by [`SessionStore::update`].
pub type SessionUpdate<'a> = dyn for<'s> Fn(&'s mut StoredSession) + Send + Sync + 'a;

/// Persistent storage for the session credential pair and related state.
///
/// Implementations must apply [`update`](SessionStore::update) atomically
/// with respect to other calls on the same store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the full stored session. Missing storage reads as empty.
    async fn load(&self) -> Result<StoredSession>;

    /// Apply a modification to the stored session and persist it.
    async fn update(&self, apply: &SessionUpdate<'_>) -> Result<()>;

    /// Remove everything.
    async fn clear(&self) -> Result<()>;

    /// Returns the stored access token, if any.
    async fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.load().await?.access_token)
    }

    /// Returns the stored refresh token, if any.
    async fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self.load().await?.refresh_token)
    }

    /// Persist a freshly issued credential pair.
    async fn set_tokens(&self, pair: &TokenPair) -> Result<()> {
        self.update(&|session| {
            session.access_token = Some(pair.access_token.clone());
            session.refresh_token = Some(pair.refresh_token.clone());
        })
        .await
    }

    /// Returns the cached user, if any.
    async fn user(&self) -> Result<Option<User>> {
        Ok(self.load().await?.user)
    }

    /// Cache the current user.
    async fn set_user(&self, user: &User) -> Result<()> {
        self.update(&|session| session.user = Some(user.clone()))
            .await
    }

    /// Returns the reservation awaiting checkout, if any.
    async fn current_reservation(&self) -> Result<Option<Reservation>> {
        Ok(self.load().await?.current_reservation)
    }

    /// Remember the reservation awaiting checkout.
    async fn set_current_reservation(&self, reservation: &Reservation) -> Result<()> {
        self.update(&|session| session.current_reservation = Some(reservation.clone()))
            .await
    }

    /// Forget the reservation awaiting checkout.
    async fn clear_current_reservation(&self) -> Result<()> {
        self.update(&|session| session.current_reservation = None)
            .await
    }
}

/// A session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<StoredSession>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a session.
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    /// Create a store holding only a credential pair.
    pub fn with_tokens(pair: TokenPair) -> Self {
        Self::with_session(StoredSession {
            access_token: Some(pair.access_token),
            refresh_token: Some(pair.refresh_token),
            ..Default::default()
        })
    }

    /// Returns a copy of the current contents.
    pub fn snapshot(&self) -> StoredSession {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<StoredSession> {
        Ok(self.snapshot())
    }

    async fn update(&self, apply: &SessionUpdate<'_>) -> Result<()> {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        apply(&mut session);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = StoredSession::default();
        Ok(())
    }
}
