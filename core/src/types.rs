//! Capabilities, endpoints and payloads of the moderation API.
//!
//! # Design
//! The service has nine endpoints: three capabilities times three input
//! modes. Rather than nine hand-written request builders, an `Endpoint` is a
//! `(Capability, InputMode)` pair whose relative path is derived, and a
//! `Payload` carries the input for exactly one mode.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::multipart::MultipartForm;

/// A moderation capability offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Classify,
    Detect,
    Censor,
}

impl Capability {
    pub const ALL: [Capability; 3] = [Capability::Classify, Capability::Detect, Capability::Censor];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Classify => "classify",
            Capability::Detect => "detect",
            Capability::Censor => "censor",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ApiError::UnknownCapability(s.to_string()))
    }
}

/// How images are handed to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Multipart upload built from filesystem paths.
    Paths,
    /// Multipart upload built by the caller.
    MultipartForm,
    /// JSON list of `{"source": url}` records.
    Urls,
}

/// One of the nine service endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub capability: Capability,
    pub mode: InputMode,
}

impl Endpoint {
    pub fn new(capability: Capability, mode: InputMode) -> Self {
        Self { capability, mode }
    }

    /// Path relative to the base address, e.g. `classify/` or `censor-url/`.
    pub fn path(&self) -> String {
        match self.mode {
            InputMode::Paths | InputMode::MultipartForm => format!("{}/", self.capability),
            InputMode::Urls => format!("{}-url/", self.capability),
        }
    }
}

/// Element of the JSON body sent to the `*-url/` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlSource {
    pub source: String,
}

impl UrlSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Input for a single dispatch. The variant selects the input mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Paths(Vec<PathBuf>),
    Form(MultipartForm),
    Urls(Vec<String>),
}

impl Payload {
    pub fn paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Payload::Paths(paths.into_iter().map(Into::into).collect())
    }

    pub fn urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Payload::Urls(urls.into_iter().map(Into::into).collect())
    }

    pub fn mode(&self) -> InputMode {
        match self {
            Payload::Paths(_) => InputMode::Paths,
            Payload::Form(_) => InputMode::MultipartForm,
            Payload::Urls(_) => InputMode::Urls,
        }
    }

    /// Number of parts or URL entries the request will carry.
    pub fn len(&self) -> usize {
        match self {
            Payload::Paths(paths) => paths.len(),
            Payload::Form(form) => form.len(),
            Payload::Urls(urls) => urls.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extract a list of image sources from untyped JSON.
///
/// This is the only runtime type check in the crate: typed callers cannot
/// pass a non-string, but sources read from a file or another process can.
/// Fails on the first element that is not a string.
pub fn sources_from_json(value: &serde_json::Value) -> Result<Vec<String>, ApiError> {
    let items = value.as_array().ok_or_else(|| ApiError::InvalidArgument {
        index: 0,
        reason: format!("expected an array of strings, got {}", json_kind(value)),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::String(s) => Ok(s.clone()),
            other => Err(ApiError::InvalidArgument {
                index,
                reason: format!("expected a string, got {}", json_kind(other)),
            }),
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
