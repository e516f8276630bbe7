//! Authentication methods for the master node.
//!
//! The node keeps the session in a cookie; the shared HTTP client stores it
//! and sends it with every later request.

use crate::error::{send_error, server_error, ClientError, Result};
use crate::types::LoginRequest;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

/// Authentication client for the master node.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
}

fn is_auth_refusal(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url) -> Self {
        Self { http, base_url }
    }

    /// Ask the node whether the current session is valid.
    ///
    /// 401 and 403 mean "not logged in"; other failures are errors.
    pub async fn is_logged_in(&self) -> Result<bool> {
        let url = self.base_url.join("/api/auth/is_logged_in")?;
        debug!(url = %url, "Checking session");

        let response = self.http.get(url).send().await.map_err(send_error)?;
        let status = response.status();

        if status == StatusCode::OK {
            Ok(true)
        } else if is_auth_refusal(status) {
            Ok(false)
        } else {
            Err(server_error(response).await)
        }
    }

    /// Log in with the node password. Any non-200 answer is `AuthFailed`.
    pub async fn login(&self, password: &str) -> Result<()> {
        let url = self.base_url.join("/api/auth/login")?;
        debug!(url = %url, "Attempting login");

        let response = self
            .http
            .post(url)
            .json(&LoginRequest { password })
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();

        if status == StatusCode::OK {
            info!("Login successful");
            Ok(())
        } else {
            // The node answers a wrong password with 400
            warn!(status = %status, "Login failed");
            Err(ClientError::AuthFailed(status.as_u16()))
        }
    }

    /// End the session on the node. Any non-200 answer is `AuthFailed`.
    pub async fn logout(&self) -> Result<()> {
        let url = self.base_url.join("/api/auth/logout")?;
        debug!(url = %url, "Logging out");

        let response = self.http.get(url).send().await.map_err(send_error)?;
        let status = response.status();

        if status == StatusCode::OK {
            info!("Logged out");
            Ok(())
        } else {
            warn!(status = %status, "Logout failed");
            Err(ClientError::AuthFailed(status.as_u16()))
        }
    }
}
