use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::ApiError;
use crate::config::HttpConfig;
use crate::session::Session;

/// Build the `reqwest` client shared by every service client.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, ApiError> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.request_timeout)
        .build()
        .map_err(|source| ApiError::Transport {
            url: String::new(),
            source,
        })
}

/// One backend service: base URL plus the optional session to authenticate with.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl ServiceClient {
    pub fn new(http: Client, base_url: impl Into<String>, session: Option<Session>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let body = self.send(self.http.get(&url), &url).await?;
        decode(&url, &body)
    }

    pub async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let body = self.send(self.http.post(&url).json(payload), &url).await?;
        decode(&url, &body)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        self.send(self.http.delete(&url), &url).await?;
        Ok(())
    }

    /// Attach session headers, send, and return the body of a successful response.
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<String, ApiError> {
        let mut request = request.header("Accept", "application/json");
        if let Some(session) = &self.session {
            request = request.headers(session.headers());
        }

        debug!(url, authenticated = self.session.is_some(), "sending request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Percent-encode a value used as a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
