//! Stateless request builder for the moderation API.
//!
//! # Design
//! `NudenyClient` holds only a `ClientConfig` and carries no mutable state
//! between calls. Each input mode has a `build_*` method producing an
//! `HttpRequest`; `build` selects one from a `Payload`. Nothing here touches
//! the network or the filesystem.

use std::path::PathBuf;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, RequestBody};
use crate::multipart::MultipartForm;
use crate::types::{Capability, Endpoint, InputMode, Payload, UrlSource};

/// Builds `HttpRequest` values for the nine moderation endpoints.
#[derive(Debug, Clone)]
pub struct NudenyClient {
    config: ClientConfig,
}

impl NudenyClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build(&self, capability: Capability, payload: Payload) -> Result<HttpRequest, ApiError> {
        match payload {
            Payload::Paths(paths) => Ok(self.build_paths(capability, paths)),
            Payload::Form(form) => Ok(self.build_form(capability, form)),
            Payload::Urls(urls) => self.build_urls(capability, urls),
        }
    }

    /// Multipart upload with one `files` part per path, in input order.
    ///
    /// Paths are not checked here; an unreadable file fails when the request
    /// is sent.
    pub fn build_paths<I, P>(&self, capability: Capability, paths: I) -> HttpRequest
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let form = MultipartForm::from_paths(paths);
        self.multipart_request(Endpoint::new(capability, InputMode::Paths), form)
    }

    /// Multipart upload of a caller-built form, forwarded as is.
    pub fn build_form(&self, capability: Capability, form: MultipartForm) -> HttpRequest {
        self.multipart_request(Endpoint::new(capability, InputMode::MultipartForm), form)
    }

    /// JSON list of `{"source": url}` records, in input order.
    pub fn build_urls<I, S>(&self, capability: Capability, urls: I) -> Result<HttpRequest, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: Vec<UrlSource> = urls.into_iter().map(UrlSource::new).collect();
        let body = serde_json::to_string(&sources)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.config.endpoint_url(Endpoint::new(capability, InputMode::Urls)),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: RequestBody::Json(body),
        })
    }

    fn multipart_request(&self, endpoint: Endpoint, form: MultipartForm) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.config.endpoint_url(endpoint),
            headers: form.headers(),
            body: RequestBody::Multipart(form),
        }
    }
}
