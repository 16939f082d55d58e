//! The authenticated request gateway.
//!
//! Every API call goes through [`Gateway::send`]. The gateway attaches the
//! stored bearer token, enforces a deadline, maps failures onto
//! [`ticketera_core::Error`], and recovers from an expired access token by
//! redeeming the refresh token once on behalf of every caller that hit a 401
//! while the refresh was running.

mod refresh;
mod request;

pub use request::{Request, RequestOptions, Response};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace, warn};

use ticketera_core::error::{HttpError, NetworkError, UnknownError};
use ticketera_core::types::RefreshTokenRequest;
use ticketera_core::{
    AccessToken, ApiConfig, Error, ErrorCode, MemorySessionStore, NoopNotifier, Result,
    SessionExpiredNotifier, SessionStore, TokenPair,
};

use crate::endpoints;
use refresh::{RefreshCoordinator, RefreshOutcome, RefreshTicket};

/// Builder for [`Gateway`].
pub struct GatewayBuilder {
    config: ApiConfig,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn SessionExpiredNotifier>,
}

impl GatewayBuilder {
    /// Use the given session store. Defaults to an in-memory store.
    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = store;
        self
    }

    /// Use the given session-expired notifier. Defaults to [`NoopNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn SessionExpiredNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn build(self) -> Result<Gateway> {
        let client = reqwest::Client::builder()
            .user_agent(self.config.user_agent.as_str())
            .build()
            .map_err(|e| Error::unknown("failed to build HTTP client", e))?;

        Ok(Gateway {
            inner: Arc::new(GatewayInner {
                client,
                config: self.config,
                store: self.store,
                notifier: self.notifier,
                refresh: RefreshCoordinator::default(),
            }),
        })
    }
}

/// HTTP gateway to the Ticketera API.
///
/// Cheap to clone; clones share the session store and the refresh state.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    client: reqwest::Client,
    config: ApiConfig,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn SessionExpiredNotifier>,
    refresh: RefreshCoordinator,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("timeout", &self.inner.config.timeout)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Start building a gateway for the given configuration.
    pub fn builder(config: ApiConfig) -> GatewayBuilder {
        GatewayBuilder {
            config,
            store: Arc::new(MemorySessionStore::new()),
            notifier: Arc::new(NoopNotifier),
        }
    }

    /// Create a gateway with the given store and no session-expired notifier.
    pub fn new(config: ApiConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        Self::builder(config).store(store).build()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// The session store this gateway reads credentials from.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.inner.store
    }

    /// Persist a freshly issued credential pair.
    pub async fn set_tokens(&self, pair: &TokenPair) -> Result<()> {
        self.inner.store.set_tokens(pair).await
    }

    /// Forget everything stored for the current session.
    pub async fn clear_session(&self) -> Result<()> {
        self.inner.store.clear().await
    }

    /// Send a request, recovering once from an expired access token.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: Request) -> Result<Response> {
        let token = if request.options.skip_auth {
            None
        } else {
            self.inner.store.access_token().await?
        };

        let response = self.execute(&request, token.as_ref()).await?;

        if response.is_unauthorized() && !request.options.skip_auth {
            let original = response.into_http_error();
            return self.recover(&request, token.as_ref(), original).await;
        }

        response.error_for_status()
    }

    /// Send a request and decode the body. `None` for `204 No Content`.
    pub async fn send_json<R: DeserializeOwned>(&self, request: Request) -> Result<Option<R>> {
        self.send(request).await?.json()
    }

    /// Send a request and discard the body.
    pub async fn send_empty(&self, request: Request) -> Result<()> {
        self.send(request).await.map(|_| ())
    }

    /// Send a request whose success response must carry a body.
    pub async fn fetch<R: DeserializeOwned>(&self, request: Request) -> Result<R> {
        let path = request.path.clone();
        self.send_json(request).await?.ok_or_else(|| {
            Error::Unknown(UnknownError::new(
                format!("expected a response body from {}", path),
                None,
            ))
        })
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<Option<R>> {
        self.send_json(Request::get(path)).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Request::post(path).json(body)?).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Request::put(path).json(body)?).await
    }

    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Request::patch(path).json(body)?).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<Option<R>> {
        self.send_json(Request::delete(path)).await
    }

    /// Renew the access token now, joining a refresh already in progress.
    ///
    /// On failure the stored session is cleared and the notifier is told.
    #[instrument(skip(self))]
    pub async fn refresh_session(&self) -> Result<AccessToken> {
        match self.inner.refresh.join() {
            RefreshTicket::Leader(lease) => match self.redeem_refresh_token().await {
                Ok(pair) => {
                    lease.succeed(pair.access_token.clone());
                    Ok(pair.access_token)
                }
                Err(err) => {
                    self.expire_session().await;
                    lease.fail();
                    self.inner.notifier.session_expired();
                    Err(err)
                }
            },
            RefreshTicket::Waiter(rx) => match rx.await {
                Ok(RefreshOutcome::Refreshed(token)) => Ok(token),
                Ok(RefreshOutcome::Failed) | Err(_) => Err(Error::Http(HttpError::new(
                    401,
                    ErrorCode::TokenExpired,
                    "session could not be refreshed",
                    None,
                ))),
            },
        }
    }

    /// Handle a 401 on a call that carries credentials.
    async fn recover(
        &self,
        request: &Request,
        sent: Option<&AccessToken>,
        original: HttpError,
    ) -> Result<Response> {
        match self.inner.refresh.join() {
            RefreshTicket::Leader(lease) => {
                // A refresh may have completed between sending and seeing the 401.
                let current = match self.inner.store.access_token().await {
                    Ok(current) => current,
                    Err(e) => {
                        warn!(error = %e, "Failed to read stored token; refreshing anyway");
                        None
                    }
                };
                if let Some(current) = current.filter(|c| Some(c) != sent) {
                    debug!("Access token already renewed; retrying");
                    lease.succeed(current.clone());
                    return self.retry(request, &current).await;
                }

                info!("Access token rejected; refreshing session");
                match self.redeem_refresh_token().await {
                    Ok(pair) => {
                        let released = lease.succeed(pair.access_token.clone());
                        debug!(released, "Session refreshed; retrying");
                        self.retry(request, &pair.access_token).await
                    }
                    Err(err) => {
                        warn!(error = %err, "Session refresh failed; session expired");
                        self.expire_session().await;
                        let released = lease.fail();
                        trace!(released, "Released queued calls with failure");
                        self.inner.notifier.session_expired();
                        Err(Error::Http(original))
                    }
                }
            }
            RefreshTicket::Waiter(rx) => match rx.await {
                Ok(RefreshOutcome::Refreshed(token)) => self.retry(request, &token).await,
                Ok(RefreshOutcome::Failed) | Err(_) => Err(Error::Http(original)),
            },
        }
    }

    /// Re-issue a call once with a renewed token. A second 401 is final.
    async fn retry(&self, request: &Request, token: &AccessToken) -> Result<Response> {
        self.execute(request, Some(token))
            .await?
            .error_for_status()
    }

    /// Exchange the stored refresh token for a new pair and persist it.
    async fn redeem_refresh_token(&self) -> Result<TokenPair> {
        let refresh_token = self.inner.store.refresh_token().await?.ok_or_else(|| {
            Error::Http(HttpError::new(
                401,
                ErrorCode::InvalidToken,
                "no refresh token stored",
                None,
            ))
        })?;

        let request = Request::post(endpoints::AUTH_REFRESH)
            .json(&RefreshTokenRequest {
                refresh_token: refresh_token.as_str(),
            })?
            .skip_auth();

        let pair: TokenPair = self
            .execute(&request, None)
            .await?
            .error_for_status()?
            .json()?
            .ok_or_else(|| {
                Error::Unknown(UnknownError::new(
                    "refresh response had no body",
                    None,
                ))
            })?;

        self.inner.store.set_tokens(&pair).await?;
        Ok(pair)
    }

    async fn expire_session(&self) {
        if let Err(e) = self.inner.store.clear().await {
            warn!(error = %e, "Failed to clear stored session");
        }
    }

    /// Issue a request, retrying transport failures as configured.
    async fn execute(&self, request: &Request, token: Option<&AccessToken>) -> Result<Response> {
        let mut attempt = 0;
        loop {
            match self.execute_once(request, token).await {
                Err(Error::Network(err)) if attempt < request.options.retries => {
                    attempt += 1;
                    warn!(error = %err, attempt, "Network error; retrying");
                }
                other => return other,
            }
        }
    }

    async fn execute_once(
        &self,
        request: &Request,
        token: Option<&AccessToken>,
    ) -> Result<Response> {
        let url = self.inner.config.base_url.endpoint(&request.path);
        let timeout = request.options.timeout.unwrap_or(self.inner.config.timeout);
        debug!(method = %request.method, %url, "API request");

        let mut builder = self
            .inner
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, token.bearer());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let call = async {
            let response = builder.send().await.map_err(map_transport_error)?;
            let status = response.status();
            let body = response.bytes().await.map_err(map_transport_error)?;
            trace!(status = %status, bytes = body.len(), "API response");
            Ok::<_, Error>(Response::new(status, body.to_vec()))
        };

        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let duration_ms = millis(timeout);
                warn!(duration_ms, "Request timed out");
                Err(Error::Timeout { duration_ms })
            }
        }
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn map_transport_error(err: reqwest::Error) -> Error {
    if err.is_connect() {
        NetworkError::Connection {
            message: err.to_string(),
        }
        .into()
    } else if err.is_request() || err.is_body() {
        NetworkError::Request {
            message: err.to_string(),
        }
        .into()
    } else {
        Error::unknown("HTTP request failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketera_core::types::ApiUrl;

    #[test]
    fn millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn debug_output_hides_session_state() {
        let config = ApiConfig::new(ApiUrl::new("https://api.ticketera.cl/api/v1").unwrap());
        let store = Arc::new(MemorySessionStore::with_tokens(TokenPair::new(
            "secret-access",
            "secret-refresh",
        )));
        let gateway = Gateway::new(config, store).unwrap();

        let debug = format!("{:?}", gateway);
        assert!(debug.contains("api.ticketera.cl"));
        assert!(!debug.contains("secret"));
    }
}
