//! Client-credentials token acquisition
//!
//! One POST to the store's identity endpoint; the token is cached for the
//! life of the process. Refresh on expiry is a deployment concern handled
//! outside this client.

use crate::error::{Error, Result};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Client-credentials grant against the store's identity endpoint
pub struct ClientCredentials {
    token_url: String,
    client_id: String,
    client_secret: String,
    cached_token: RwLock<Option<String>>,
}

impl ClientCredentials {
    /// Create a credential source for the given store resource
    pub fn new(
        resource: impl AsRef<str>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let token_url = format!(
            "{}/identity/connect/token",
            resource.as_ref().trim_end_matches('/')
        );
        Self {
            token_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached_token: RwLock::new(None),
        }
    }

    /// Obtain an access token, fetching it on first use
    pub async fn access_token(&self, client: &reqwest::Client) -> Result<String> {
        if let Some(token) = self.cached_token.read().await.as_ref() {
            return Ok(token.clone());
        }

        tracing::debug!("Requesting access token from {}", self.token_url);

        let response = client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to reach identity endpoint: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "Identity endpoint returned {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("Failed to parse token response: {}", e)))?;

        let token = body.access_token;
        *self.cached_token.write().await = Some(token.clone());
        Ok(token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}
