//! HTTP client wrapper - thin typed calls against the timeline backend

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{
    Article, ArticleDraft, ArticleId, AuthMode, Credentials, ExchangeRate, LikesResponse,
    MessageResponse, TokenResponse,
};
use crate::network::error::ApiError;

/// Client for the timeline REST API.
///
/// Requests are fire-once: no retries and no timeout. The session token,
/// when given, is sent as the raw `Authorization` value (no scheme prefix).
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: create_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue one request and decode the JSON reply.
    ///
    /// Non-2xx replies become [`ApiError::Status`] carrying the body text.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(%method, %url, authed = token.is_some(), "api request");

        let mut builder = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, token);
        }
        if let Some(body) = body {
            let payload =
                serde_json::to_vec(body).map_err(|e| ApiError::Decode(e.to_string()))?;
            builder = builder.body(payload);
        }

        let resp = builder.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, &text);
            tracing::warn!(%url, status = status.as_u16(), error = %err, "api request rejected");
            return Err(err);
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, token, None).await
    }

    async fn post<T, B>(&self, path: &str, token: Option<&str>, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, token, body).await
    }

    // ========================
    // Auth
    // ========================

    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.authenticate(AuthMode::Login, credentials).await
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.authenticate(AuthMode::Register, credentials).await
    }

    /// Exchange credentials for a session token
    pub async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &Credentials,
    ) -> Result<String, ApiError> {
        let resp: TokenResponse = self.post(mode.path(), None, Some(credentials)).await?;
        Ok(resp.token)
    }

    // ========================
    // Articles
    // ========================

    pub async fn list_articles(&self, token: &str) -> Result<Vec<Article>, ApiError> {
        self.get("/api/articles", Some(token)).await
    }

    pub async fn create_article(
        &self,
        token: &str,
        draft: &ArticleDraft,
    ) -> Result<Article, ApiError> {
        self.post("/api/articles", Some(token), Some(draft)).await
    }

    pub async fn like_article(&self, token: &str, id: ArticleId) -> Result<String, ApiError> {
        let path = format!("/api/articles/{}/like", id);
        let resp: MessageResponse = self.post::<_, ()>(&path, Some(token), None).await?;
        Ok(resp.message)
    }

    pub async fn article_likes(&self, token: &str, id: ArticleId) -> Result<String, ApiError> {
        let path = format!("/api/articles/{}/likes", id);
        let resp: LikesResponse = self.get(&path, Some(token)).await?;
        Ok(resp.likes)
    }

    // ========================
    // Public data
    // ========================

    pub async fn list_exchange_rates(&self) -> Result<Vec<ExchangeRate>, ApiError> {
        self.get("/api/exchangeRates", None).await
    }

    /// Backend liveness probe
    pub async fn ping(&self) -> Result<String, ApiError> {
        let resp: MessageResponse = self.get("/ping", None).await?;
        Ok(resp.message)
    }
}

/// Create an HTTP client with default configuration
fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("timeline-tui/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
