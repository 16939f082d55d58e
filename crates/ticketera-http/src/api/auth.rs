//! Authentication endpoints.

use tracing::{debug, info, instrument, warn};

use ticketera_core::types::{
    AuthResponse, GoogleLoginRequest, LoginRequest, RegisterRequest, User,
};
use ticketera_core::{Credentials, Result};

use crate::endpoints;
use crate::gateway::{Gateway, Request};

/// Login, registration and session lifecycle.
#[derive(Debug, Clone)]
pub struct AuthApi {
    gateway: Gateway,
}

impl AuthApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Log in with email and password and persist the new session.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let request = Request::post(endpoints::AUTH_LOGIN)
            .json(&LoginRequest {
                email: credentials.email(),
                password: credentials.password(),
            })?
            .skip_auth();

        self.authenticate(request).await
    }

    /// Create an account and persist the new session.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &RegisterRequest) -> Result<AuthResponse> {
        let request = Request::post(endpoints::AUTH_REGISTER)
            .json(registration)?
            .skip_auth();

        self.authenticate(request).await
    }

    /// Exchange a Google ID token for a session.
    #[instrument(skip(self, id_token))]
    pub async fn login_with_google(&self, id_token: &str) -> Result<AuthResponse> {
        let request = Request::post(endpoints::AUTH_GOOGLE)
            .json(&GoogleLoginRequest { id_token })?
            .skip_auth();

        self.authenticate(request).await
    }

    async fn authenticate(&self, request: Request) -> Result<AuthResponse> {
        let response: AuthResponse = self.gateway.fetch(request).await?;

        let store = self.gateway.store();
        store.set_tokens(&response.token_pair()).await?;
        store.set_user(&response.user).await?;

        info!(user = %response.user.id, role = ?response.user.role, "Logged in");
        Ok(response)
    }

    /// Tell the server the session is over, then forget it locally.
    ///
    /// The server notification is best-effort; local state is cleared even
    /// when it fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self
            .gateway
            .send_empty(Request::post(endpoints::AUTH_LOGOUT))
            .await
        {
            warn!(error = %e, "Logout request failed; clearing local session anyway");
        }

        self.gateway.clear_session().await?;
        info!("Logged out");
        Ok(())
    }

    /// Fetch the current user.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User> {
        self.gateway.fetch(Request::get(endpoints::AUTH_ME)).await
    }

    /// Fetch the current user and cache it in the session store.
    pub async fn refresh_user(&self) -> Result<User> {
        let user = self.me().await?;
        self.gateway.store().set_user(&user).await?;
        Ok(user)
    }

    /// Re-establish the user for a stored session.
    ///
    /// Returns `None` when nothing is stored, or when the server no longer
    /// accepts the stored credentials (local state is cleared in that case).
    /// Other failures are returned so a flaky network does not log the user
    /// out.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<Option<User>> {
        if self.gateway.store().access_token().await?.is_none() {
            debug!("No stored session");
            return Ok(None);
        }

        match self.refresh_user().await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_auth_error() => {
                warn!(error = %e, "Stored session rejected; clearing");
                self.gateway.clear_session().await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
