use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;

use super::{AuthApi, Session, UserStore};
use crate::config::BackendConfig;
use crate::records::{UserDraft, UserId, UserRecord};

/// User-Agent header for roster API requests.
pub const USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));

/// REST client for a Supabase-style backend.
///
/// Auth goes to `/auth/v1`, the user collection to `/rest/v1/{table}`.
/// The access token from the last successful sign-in is attached to data
/// requests; before that the anon key is used as the bearer.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    table: String,
    access_token: RwLock<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    email: Option<String>,
}

impl SupabaseClient {
    /// Creates a client for an explicit base URL and key.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, anon_key: &str, table: &str) -> Result<Self> {
        Self::build(base_url, anon_key, table, None)
    }

    /// Creates a client from config (env overrides applied).
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or no anon key is set.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let base_url = config.effective_url()?;
        let anon_key = config.effective_anon_key()?;
        Self::build(
            &base_url,
            &anon_key,
            &config.table,
            config.request_timeout(),
        )
    }

    fn build(
        base_url: &str,
        anon_key: &str,
        table: &str,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            table: table.to_string(),
            access_token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer(&self) -> String {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn set_access_token(&self, token: Option<String>) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
    }

    fn table_path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    fn row_filter(id: &UserId) -> String {
        format!("eq.{id}")
    }
}

/// Returns the response if successful, otherwise an error carrying the
/// service's own message.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| format!("HTTP {status}"));
    tracing::debug!(%status, %body, "backend request failed");
    anyhow::bail!("{message}");
}

/// Extracts a human-readable message from an auth or PostgREST error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error_description", "msg", "message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[async_trait]
impl AuthApi for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>> {
        let response = self
            .request(Method::POST, "/auth/v1/token?grant_type=password")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("Failed to send sign-in request")?;
        let response = check_status(response).await?;

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse sign-in response")?;

        let session = token
            .access_token
            .filter(|t| !t.is_empty())
            .map(|access_token| Session {
                access_token,
                user_email: token.user.and_then(|u| u.email),
            });
        self.set_access_token(session.as_ref().map(|s| s.access_token.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .request(Method::POST, "/auth/v1/signup")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("Failed to send sign-up request")?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for SupabaseClient {
    async fn select_all(&self) -> Result<Vec<UserRecord>> {
        let response = self
            .request(Method::GET, &self.table_path())
            .query(&[("select", "*")])
            .send()
            .await
            .context("Failed to send select request")?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .context("Failed to parse user records")
    }

    async fn insert(&self, draft: &UserDraft) -> Result<()> {
        let response = self
            .request(Method::POST, &self.table_path())
            .header("Prefer", "return=minimal")
            .json(draft)
            .send()
            .await
            .context("Failed to send insert request")?;
        check_status(response).await?;
        Ok(())
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<()> {
        let response = self
            .request(Method::PATCH, &self.table_path())
            .query(&[("id", Self::row_filter(id))])
            .header("Prefer", "return=minimal")
            .json(draft)
            .send()
            .await
            .context("Failed to send update request")?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<()> {
        let response = self
            .request(Method::DELETE, &self.table_path())
            .query(&[("id", Self::row_filter(id))])
            .send()
            .await
            .context("Failed to send delete request")?;
        check_status(response).await?;
        Ok(())
    }
}
