//! HTTP request and response values.
//!
//! # Design
//! Requests are described as plain data. `NudenyClient` builds them without
//! touching the network and a `Transport` executes them, so tests can
//! inspect exactly what would be sent. A multipart body stays a
//! `MultipartForm` until the transport encodes it.

use std::borrow::Cow;

use crate::multipart::MultipartForm;

/// HTTP method for a request. Every moderation endpoint takes `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Multipart(MultipartForm),
    /// Serialized JSON text.
    Json(String),
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Whatever the service answered: status, headers and raw body bytes.
///
/// The client never interprets it; a 4xx or 5xx arrives here like a 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: br#"{"ok":true}"#.to_vec(),
        }
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(404).is_success());
        assert!(!response(500).is_success());
    }

    #[test]
    fn header_lookup_ignores_case() {
        assert_eq!(response(200).header("content-type"), Some("application/json"));
        assert_eq!(response(200).header("x-missing"), None);
    }

    #[test]
    fn text_decodes_body() {
        assert_eq!(response(200).text(), r#"{"ok":true}"#);
    }
}
