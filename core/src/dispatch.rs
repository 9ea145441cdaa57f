//! The nine moderation operations.
//!
//! # Design
//! `Dispatcher` pairs a `NudenyClient` with a `Transport`. Every operation
//! goes through `dispatch`, which builds exactly one request and sends it;
//! the named methods (`classify`, `detect_url`, `censor_multipart_form`, ...)
//! only pick the capability and payload variant. The dispatcher holds no
//! mutable state, so one instance can serve any number of concurrent calls.

use std::path::PathBuf;

use tracing::debug;

use crate::client::NudenyClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::multipart::MultipartForm;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Capability, Payload};

#[derive(Debug, Clone)]
pub struct Dispatcher<T = ReqwestTransport> {
    client: NudenyClient,
    transport: T,
}

impl Dispatcher<ReqwestTransport> {
    /// Dispatcher using `reqwest` with default settings.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: NudenyClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &NudenyClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build one request for `capability` from `payload` and send it.
    pub async fn dispatch(&self, capability: Capability, payload: Payload) -> Result<HttpResponse, ApiError> {
        let mode = payload.mode();
        let entries = payload.len();
        let request = self.client.build(capability, payload)?;
        debug!(%capability, ?mode, entries, url = %request.url, "dispatching moderation request");
        self.transport.send(request).await
    }

    pub async fn classify<I, P>(&self, paths: I) -> Result<HttpResponse, ApiError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dispatch(Capability::Classify, Payload::paths(paths)).await
    }

    pub async fn classify_multipart_form(&self, form: MultipartForm) -> Result<HttpResponse, ApiError> {
        self.dispatch(Capability::Classify, Payload::Form(form)).await
    }

    pub async fn classify_url<I, S>(&self, urls: I) -> Result<HttpResponse, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatch(Capability::Classify, Payload::urls(urls)).await
    }

    pub async fn detect<I, P>(&self, paths: I) -> Result<HttpResponse, ApiError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dispatch(Capability::Detect, Payload::paths(paths)).await
    }

    pub async fn detect_multipart_form(&self, form: MultipartForm) -> Result<HttpResponse, ApiError> {
        self.dispatch(Capability::Detect, Payload::Form(form)).await
    }

    pub async fn detect_url<I, S>(&self, urls: I) -> Result<HttpResponse, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatch(Capability::Detect, Payload::urls(urls)).await
    }

    pub async fn censor<I, P>(&self, paths: I) -> Result<HttpResponse, ApiError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dispatch(Capability::Censor, Payload::paths(paths)).await
    }

    pub async fn censor_multipart_form(&self, form: MultipartForm) -> Result<HttpResponse, ApiError> {
        self.dispatch(Capability::Censor, Payload::Form(form)).await
    }

    pub async fn censor_url<I, S>(&self, urls: I) -> Result<HttpResponse, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatch(Capability::Censor, Payload::urls(urls)).await
    }
}
