use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const STACKEXCHANGE_API_BASE: &str = "https://api.stackexchange.com/2.2";

/// Hard ceiling imposed by the Stack Exchange API.
pub const MAX_PAGESIZE: u32 = 100;

#[derive(Error, Debug)]
pub enum StackExchangeError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("User not found: {0}")]
    UserNotFound(u64),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StackExchangeError>;

pub struct StackExchangeClient {
    client: reqwest::Client,
    key: Option<String>,
    site: String,
    base_url: String,
}

impl StackExchangeClient {
    pub fn new(key: Option<String>, site: &str) -> Self {
        Self::with_base_url(key, site, STACKEXCHANGE_API_BASE.to_string())
    }

    /// For API version pinning or testing with a stub server
    pub fn with_base_url(key: Option<String>, site: &str, base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("soscout/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            key,
            site: site.to_string(),
            base_url,
        }
    }

    /// List users ordered by the site's reputation ranking.
    ///
    /// `pagesize` is clamped into the API's 1..=100 window before the
    /// request goes out, so callers never trip a 400 on it.
    pub async fn list_users(
        &self,
        page: u32,
        pagesize: u32,
        order: &str,
    ) -> Result<Vec<StackExchangeUser>> {
        let url = format!("{}/users", self.base_url);
        let pagesize = effective_pagesize(pagesize);

        let mut query = vec![
            ("site", self.site.clone()),
            ("page", page.to_string()),
            ("pagesize", pagesize.to_string()),
            ("order", order.to_string()),
        ];
        if let Some(ref key) = self.key {
            query.push(("key", key.clone()));
        }

        let response = self.client.get(&url).query(&query).send().await?;

        if response.status() == 429 {
            return Err(StackExchangeError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StackExchangeError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let envelope: UsersEnvelope = response.json().await?;
        if let Some(quota) = envelope.quota_remaining {
            debug!("Stack Exchange quota remaining: {}", quota);
        }

        Ok(envelope.items)
    }

    /// Fetch a single user by numeric ID.
    ///
    /// The API answers an unknown-but-well-formed ID with an empty `items`
    /// array rather than a 404, so that case maps to `UserNotFound` here.
    pub async fn get_user(&self, user_id: u64) -> Result<StackExchangeUser> {
        let url = format!("{}/users/{}", self.base_url, user_id);

        let mut query = vec![("site", self.site.clone())];
        if let Some(ref key) = self.key {
            query.push(("key", key.clone()));
        }

        let response = self.client.get(&url).query(&query).send().await?;

        if response.status() == 429 {
            return Err(StackExchangeError::RateLimitExceeded);
        }

        if response.status() == 404 {
            return Err(StackExchangeError::UserNotFound(user_id));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StackExchangeError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let envelope: UsersEnvelope = response.json().await?;
        envelope
            .items
            .into_iter()
            .next()
            .ok_or(StackExchangeError::UserNotFound(user_id))
    }
}

fn effective_pagesize(requested: u32) -> u32 {
    requested.clamp(1, MAX_PAGESIZE)
}

/// The common response wrapper every Stack Exchange endpoint uses.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersEnvelope {
    #[serde(default)]
    pub items: Vec<StackExchangeUser>,
    #[serde(default)]
    pub has_more: bool,
    pub quota_remaining: Option<u32>,
}

/// A user record as the API ships it. Almost everything beyond the ID is
/// optional in practice, so the fields mirror that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackExchangeUser {
    pub user_id: u64,
    pub account_id: Option<u64>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub reputation: u64,
    pub last_access_date: Option<i64>,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub user_type: Option<String>,
}
