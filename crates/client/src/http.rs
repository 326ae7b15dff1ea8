//! The authenticated HTTP client.
//!
//! A thin wrapper around `reqwest` that owns the cross-cutting behavior
//! every API call shares:
//!
//! - the current session's token is attached as `Authorization: Bearer ...`
//!   before every request (requests without a session proceed
//!   unauthenticated);
//! - every non-2xx response is normalized into one [`ApiError`] shape;
//! - a request that never produces a response maps to a fixed connectivity
//!   error with `status = 0`;
//! - HTTP 401 is fatal to the session: the persisted record is purged and
//!   the Anonymous phase is published before the error is returned.
//!
//! Nothing here retries; a transient failure surfaces immediately.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::instrument;

use caphe_core::{Email, StaffRole};

use crate::auth::session::{AuthSession, SessionPhase, SessionStore, StaffUser};
use crate::auth::token::extract_token;
use crate::config::{ClientConfig, STORAGE_PREFIX};
use crate::error::ApiError;
use crate::storage::StorageService;
use crate::types::Category;

/// API client for the café backend.
///
/// Cheap to clone; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
    pub(crate) session: SessionStore,
    /// Read-mostly category reference data, kept warm for a few minutes.
    pub(crate) categories: moka::future::Cache<&'static str, Vec<Category>>,
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        let storage = StorageService::new(config.state_dir.clone(), STORAGE_PREFIX);
        let session = SessionStore::new(storage);

        let categories = moka::future::Cache::builder()
            .max_capacity(1)
            .time_to_live(std::time::Duration::from_secs(300))
            .build();

        Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                session,
                categories,
            }),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The session repository backing this client.
    #[must_use]
    pub fn session_store(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Observe session-phase transitions (login, logout, 401 eviction).
    #[must_use]
    pub fn subscribe_session(&self) -> watch::Receiver<SessionPhase> {
        self.inner.session.subscribe()
    }

    /// The category reference-data cache.
    pub(crate) fn category_cache(&self) -> &moka::future::Cache<&'static str, Vec<Category>> {
        &self.inner.categories
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Authenticate a staff member and persist the resulting session.
    ///
    /// The login endpoint has shipped its token as raw text, quoted text and
    /// a JSON envelope across backend iterations; all three are accepted.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity failures and non-2xx
    /// responses, or an invalid-credentials error when the response carried
    /// no usable token.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AuthSession, ApiError> {
        let body = serde_json::json!({
            "email": email.as_str(),
            "password": password.expose_secret(),
        });

        let response = self
            .request(Method::POST, &self.inner.config.endpoints.login)
            .json(&body)
            .send()
            .await
            .map_err(|_| ApiError::network())?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }

        let text = response.text().await.map_err(|e| ApiError::unexpected(e))?;
        let token = extract_token(&text);
        if token.is_empty() {
            return Err(ApiError {
                message: "Tên đăng nhập hoặc mật khẩu không đúng.".to_owned(),
                status: 401,
                code: None,
            });
        }

        let session = AuthSession::new(
            StaffUser {
                username: email.as_str().to_owned(),
                role: StaffRole::Admin,
            },
            token,
        );

        if !self.inner.session.set_auth(&session) {
            tracing::warn!("session could not be persisted; login will not survive a restart");
        }

        Ok(session)
    }

    /// Destroy the session. Purely client-side; the backend holds no state.
    pub fn logout(&self) {
        self.inner.session.remove_auth();
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Build a request with the bearer token attached when a session exists.
    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.inner.config.endpoint_url(path);
        let mut builder = self.inner.http.request(method, url);

        if let Some(session) = self.inner.session.get_auth()
            && !session.token.is_empty()
        {
            builder = builder.bearer_auth(&session.token);
        }

        builder
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path);
        self.execute(builder).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).json(body);
        self.execute(builder).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path).json(body);
        self.execute(builder).await
    }

    /// PATCH without a body (status toggles).
    pub(crate) async fn patch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::PATCH, path);
        self.execute(builder).await
    }

    /// PUT without a body, discarding any response payload.
    pub(crate) async fn put_unit(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::PUT, path);
        self.execute_unit(builder).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path);
        self.execute_unit(builder).await
    }

    /// POST a multipart form.
    ///
    /// The Content-Type header must stay untouched here: the boundary lives
    /// in the value `reqwest` generates, and overriding it corrupts the
    /// upload.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).multipart(form);
        self.execute(builder).await
    }

    /// PUT a multipart form. Same Content-Type contract as
    /// [`Self::post_multipart`].
    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path).multipart(form);
        self.execute(builder).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|_| ApiError::network())?;

        if response.status().is_success() {
            response.json().await.map_err(|e| ApiError::unexpected(e))
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    async fn execute_unit(&self, builder: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await.map_err(|_| ApiError::network())?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Normalize a non-2xx response, evicting the session on 401.
    async fn error_from_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Fatal to the session, not to the process: purge and let
            // subscribers re-render from the Anonymous phase. Concurrent
            // 401s race here harmlessly - eviction is idempotent.
            tracing::warn!("received 401; evicting session");
            self.inner.session.remove_auth();
        }

        let reason = status.canonical_reason().unwrap_or("Unknown");
        let body = response.text().await.unwrap_or_default();
        ApiError::from_response(status.as_u16(), reason, &body)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("origin", &self.inner.config.request_origin())
            .finish_non_exhaustive()
    }
}
