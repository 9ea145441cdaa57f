//! Client configuration.
//!
//! The base address is the only setting. It is injected into the client at
//! construction time, so tests and alternative deployments just build a
//! different `ClientConfig`.

use url::Url;

use crate::error::ApiError;
use crate::types::Endpoint;

/// Address of the public Nudeny service.
pub const DEFAULT_BASE_URL: &str = "http://ec2-18-136-200-224.ap-southeast-1.compute.amazonaws.com/";

/// Environment variable read by `ClientConfig::from_env`.
pub const BASE_URL_ENV: &str = "NUDENY_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
}

impl ClientConfig {
    /// Parse and normalize a base address.
    ///
    /// A query or fragment is rejected rather than dropped. The path always
    /// ends in `/`, so endpoint paths are joined under any
    /// prefix (`http://host/api` serves `http://host/api/classify/`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base url `{base_url}`: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "unsupported scheme `{}` in base url `{base_url}`",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::Config(format!(
                "base url `{base_url}` must not carry a query or fragment"
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { base_url: url })
    }

    /// Read the base address from `NUDENY_BASE_URL`, or use the public
    /// service when it is unset or empty.
    pub fn from_env() -> Result<Self, ApiError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of `endpoint`.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        // base_url ends in `/` and carries no query or fragment.
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Capability, InputMode};

    #[test]
    fn endpoint_url_joins_onto_origin() {
        let config = ClientConfig::new("http://localhost:8000").unwrap();
        let endpoint = Endpoint::new(Capability::Classify, InputMode::Paths);
        assert_eq!(config.endpoint_url(endpoint), "http://localhost:8000/classify/");
    }

    #[test]
    fn endpoint_url_keeps_path_prefix() {
        let config = ClientConfig::new("https://moderation.example.com/api/v1").unwrap();
        let endpoint = Endpoint::new(Capability::Censor, InputMode::Urls);
        assert_eq!(
            config.endpoint_url(endpoint),
            "https://moderation.example.com/api/v1/censor-url/"
        );
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let config = ClientConfig::new("http://localhost:8000/").unwrap();
        let endpoint = Endpoint::new(Capability::Detect, InputMode::Urls);
        assert_eq!(config.endpoint_url(endpoint), "http://localhost:8000/detect-url/");
    }

    #[test]
    fn public_service_address_is_valid() {
        let config = ClientConfig::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = ClientConfig::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ClientConfig::new("ftp://files.example.com/").unwrap_err();
        assert!(matches!(err, ApiError::Config(msg) if msg.contains("ftp")));
    }

    #[test]
    fn rejects_query_in_base_url() {
        let err = ClientConfig::new("http://h/api?key=abc").unwrap_err();
        assert!(matches!(err, ApiError::Config(msg) if msg.contains("query")));
    }

    #[test]
    fn rejects_fragment_in_base_url() {
        let err = ClientConfig::new("http://h/api#top").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
