//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the seam between request building and I/O. The default
//! implementation wraps a shared `reqwest::Client`; tests substitute a
//! recording transport to observe requests without a server.
//!
//! Multipart forms are encoded here, at send time, so file reads happen as
//! late as possible and an unreadable file fails the call before any bytes
//! reach the network.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the response, whatever its status.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` backed by `reqwest`, with its default timeouts and pooling.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client, e.g. one with a proxy or custom TLS roots.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let body = match &request.body {
            RequestBody::Multipart(form) => form.encode().await?,
            RequestBody::Json(json) => json.clone().into_bytes(),
        };

        let method = match request.method {
            HttpMethod::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(body).send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(url = %request.url, status, bytes = body.len(), "moderation response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
