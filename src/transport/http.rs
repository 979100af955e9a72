//! reqwest-backed transport with gzip transfer and bearer auth

use super::{ClientCredentials, Request, Response, Transport};
use crate::error::{Error, Result};
use async_trait::async_trait;

/// HTTP transport against a live store
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    credentials: ClientCredentials,
}

impl HttpTransport {
    /// Create a transport for the given store resource
    pub fn new(resource: impl AsRef<str>, credentials: ClientCredentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(Error::from)?;

        Ok(Self {
            client,
            base_url: resource.as_ref().trim_end_matches('/').to_string(),
            credentials,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let token = self.credentials.access_token(&self.client).await?;
        let url = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));

        tracing::debug!(method = %request.method, path = %request.path, "Sending store request");

        let mut builder = self
            .client
            .request(request.method, url.as_str())
            .query(&request.query)
            .bearer_auth(token);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!(
                "Store has no resource at {}",
                request.path
            )));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "Store returned {} for {}: {}",
                status, request.path, detail
            )));
        }

        let body = response.bytes().await?.to_vec();
        Ok(Response {
            status: status.as_u16(),
            body,
        })
    }
}
