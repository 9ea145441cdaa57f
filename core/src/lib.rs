//! Async client for the Nudeny image-moderation service.
//!
//! # Overview
//! The service exposes three capabilities (classify, detect, censor), each
//! reachable by multipart file upload or by a JSON list of image URLs. This
//! crate reshapes caller input into exactly one HTTP request per call and
//! hands back the raw response without interpreting it.
//!
//! # Design
//! - `NudenyClient` is stateless. It builds `HttpRequest` values as plain
//!   data, so every request can be inspected before anything is sent.
//! - `Dispatcher` pairs a client with a `Transport` and exposes the nine
//!   named operations as thin wrappers over `Dispatcher::dispatch`.
//! - `ReqwestTransport` is the default transport. Files named by a paths
//!   request are read when the request is sent, not when it is built.
//! - Non-2xx statuses are ordinary responses, never errors.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod multipart;
pub mod transport;
pub mod types;

pub use client::NudenyClient;
pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use dispatch::Dispatcher;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use multipart::{MultipartForm, Part, PartBody, FILES_FIELD};
pub use transport::{ReqwestTransport, Transport};
pub use types::{sources_from_json, Capability, Endpoint, InputMode, Payload, UrlSource};
