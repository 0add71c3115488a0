//! HTTP client for the dashboard service.
//!
//! Covers the three endpoints the dashboard consumes. Ambient session
//! credentials are attached by pluggable [`CredentialSource`]
//! implementations rather than relying on implicit runtime behavior.
//!
//! # Usage
//!
//! ```ignore
//! use watchdash_client::{ApiOptions, DashboardApi, SessionCookie};
//!
//! let api = DashboardApi::new(
//!     ApiOptions::new("http://localhost:8080"),
//!     Arc::new(SessionCookie::new("9f2c...")),
//! )?;
//! let subs = api.list_subscriptions().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use watchdash_core::{ApiError, Subscription, SubscriptionId, UserProfile};

// ── CredentialSource ────────────────────────────────────────────────

/// Ambient credential attached to an outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Session cookie, sent as `Cookie: {name}={value}`.
    Cookie { name: String, value: String },
    /// Bearer token, sent as `Authorization: Bearer {token}`.
    Bearer(String),
}

/// Pluggable credential provider. Called before every API request.
///
/// Implementations handle credential acquisition and refresh. Returns
/// `Ok(None)` to send the request anonymously.
#[async_trait::async_trait]
pub trait CredentialSource: Send + Sync + 'static {
    async fn credential(&self) -> Result<Option<Credential>, ApiError>;
}

/// No credentials — anonymous requests.
pub struct Anonymous;

#[async_trait::async_trait]
impl CredentialSource for Anonymous {
    async fn credential(&self) -> Result<Option<Credential>, ApiError> {
        Ok(None)
    }
}

/// Static session cookie (already obtained externally).
///
/// Browsers attach this cookie implicitly; here it is an explicit input.
/// The service names it `session_id`.
pub struct SessionCookie {
    name: String,
    value: String,
}

impl SessionCookie {
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_name("session_id", value)
    }

    pub fn with_name(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

#[async_trait::async_trait]
impl CredentialSource for SessionCookie {
    async fn credential(&self) -> Result<Option<Credential>, ApiError> {
        Ok(Some(Credential::Cookie {
            name: self.name.clone(),
            value: self.value.clone(),
        }))
    }
}

/// Static bearer token.
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl CredentialSource for BearerToken {
    async fn credential(&self) -> Result<Option<Credential>, ApiError> {
        Ok(Some(Credential::Bearer(self.0.clone())))
    }
}

// ── Options ─────────────────────────────────────────────────────────

/// Programmatic client configuration.
#[derive(Debug, Clone)]
pub struct ApiOptions {
    /// Service base URL, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Total per-request deadline.
    pub timeout: Duration,
    /// Connect-phase deadline.
    pub connect_timeout: Duration,
}

impl ApiOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

// ── DashboardApi ────────────────────────────────────────────────────

/// Typed client for the dashboard endpoints.
pub struct DashboardApi {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl DashboardApi {
    pub fn new(
        options: ApiOptions,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn subscriptions_url(&self) -> String {
        format!("{}/api/subscriptions", self.base_url)
    }

    fn user_url(&self) -> String {
        format!("{}/api/user", self.base_url)
    }

    fn cancel_url(&self, id: &SubscriptionId) -> String {
        format!("{}/api/subscriptions/{}/cancel", self.base_url, id)
    }

    /// Build a request with the ambient credential attached.
    async fn decorated(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        match self.credentials.credential().await? {
            Some(Credential::Cookie { name, value }) => {
                Ok(builder.header(reqwest::header::COOKIE, format!("{}={}", name, value)))
            }
            Some(Credential::Bearer(token)) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Parse an API response, mapping HTTP errors to `ApiError`.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_status(code, body));
        }
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }

    /// Fetch the subscription list, in server order.
    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        let url = self.subscriptions_url();
        debug!(%url, "GET subscriptions");
        let req = self.decorated(self.http.get(&url)).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// Fetch the signed-in viewer's profile.
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let url = self.user_url();
        debug!(%url, "GET user");
        let req = self.decorated(self.http.get(&url)).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// Cancel one subscription. No response body is required on success.
    pub async fn cancel_subscription(&self, id: &SubscriptionId) -> Result<(), ApiError> {
        let url = self.cancel_url(id);
        debug!(%url, "POST cancel");
        let req = self.decorated(self.http.post(&url)).await?;
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_status(code, body));
        }
        Ok(())
    }
}
