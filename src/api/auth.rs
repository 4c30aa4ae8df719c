use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiError, ServiceClient};
use crate::session::Session;

const LOGIN_PATH: &str = "/auth/v1/login";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// The auth service has returned the token under both names over time.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token: Option<String>,
    user_id: String,
}

/// Client for the auth service. Always unauthenticated.
#[derive(Debug, Clone)]
pub struct AuthClient {
    service: ServiceClient,
}

impl AuthClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }

    /// Exchange credentials for a [`Session`].
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let response: LoginResponse = self
            .service
            .post_json(LOGIN_PATH, &LoginRequest { username, password })
            .await?;

        let token = response
            .access_token
            .or(response.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::MissingField {
                url: format!("{}{LOGIN_PATH}", self.service.base_url()),
                field: "accessToken",
            })?;

        info!(user_id = %response.user_id, "logged in");
        Ok(Session::new(response.user_id, token))
    }
}
