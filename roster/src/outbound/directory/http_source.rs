//! Reqwest-backed directory source adapter.
//!
//! This adapter owns transport details only: one GET per collection, HTTP
//! status mapping, and JSON decoding into domain records.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::ports::{DirectorySource, DirectorySourceError};
use crate::domain::{Post, User};

/// Default users endpoint.
pub const DEFAULT_USERS_URL: &str = "http://jsonplaceholder.typicode.com/users";
/// Default posts endpoint.
pub const DEFAULT_POSTS_URL: &str = "http://jsonplaceholder.typicode.com/posts";

const USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));

/// Locations of the two directory collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEndpoints {
    /// Endpoint answering with a JSON array of users.
    pub users: Url,
    /// Endpoint answering with a JSON array of posts.
    pub posts: Url,
}

impl DirectoryEndpoints {
    /// Parse both endpoints.
    ///
    /// # Errors
    ///
    /// Returns the parse error of the first malformed URL.
    pub fn parse(users: &str, posts: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            users: Url::parse(users)?,
            posts: Url::parse(posts)?,
        })
    }
}

/// Directory source that reads both collections over HTTP GET.
pub struct HttpDirectorySource {
    client: Client,
    endpoints: DirectoryEndpoints,
}

impl HttpDirectorySource {
    /// Build an adapter with a fresh reqwest client.
    /// ```rust,ignore
    /// let endpoints = DirectoryEndpoints::parse(DEFAULT_USERS_URL, DEFAULT_POSTS_URL)?;
    /// let source = HttpDirectorySource::new(endpoints)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoints: DirectoryEndpoints) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, endpoints))
    }

    /// Build an adapter around an existing client.
    pub fn with_client(client: Client, endpoints: DirectoryEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Configured endpoints.
    pub fn endpoints(&self) -> &DirectoryEndpoints {
        &self.endpoints
    }

    async fn get_json<T>(&self, url: &Url) -> Result<Vec<T>, DirectorySourceError>
    where
        T: DeserializeOwned,
    {
        debug!(%url, "requesting directory collection");
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        decode_collection(body.as_ref())
    }
}

#[async_trait]
impl DirectorySource for HttpDirectorySource {
    async fn fetch_users(&self) -> Result<Vec<User>, DirectorySourceError> {
        self.get_json(&self.endpoints.users).await
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, DirectorySourceError> {
        self.get_json(&self.endpoints.posts).await
    }
}

fn decode_collection<T>(body: &[u8]) -> Result<Vec<T>, DirectorySourceError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|error| {
        DirectorySourceError::decode(format!("invalid directory JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> DirectorySourceError {
    DirectorySourceError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DirectorySourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status.canonical_reason().unwrap_or("no reason").to_owned()
    } else {
        preview
    };
    DirectorySourceError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
