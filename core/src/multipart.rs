//! `multipart/form-data` bodies for the upload endpoints.
//!
//! # Design
//! A `MultipartForm` is plain data until it is encoded: parts that name a
//! file keep only the path, and the file is read by `encode` when the
//! transport sends the request. Each file handle lives only for the read of
//! its own part, so nothing stays open across calls or after a failure.
//!
//! The boundary is generated once per form and is part of the form's
//! identity, which lets a caller-built form be forwarded with its headers
//! unchanged.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::ApiError;

/// Field name the service expects for every uploaded image.
pub const FILES_FIELD: &str = "files";

const CRLF: &[u8] = b"\r\n";

/// Content of a single part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartBody {
    /// Read from disk at encode time.
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// One named part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    headers: Vec<(String, String)>,
    body: PartBody,
}

impl Part {
    /// A part whose content is the file at `path`.
    ///
    /// The filename is the path's last component and the content type is
    /// guessed from its extension. The file itself is not touched here.
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        let content_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            name: name.into(),
            file_name,
            content_type: Some(content_type),
            headers: Vec::new(),
            body: PartBody::File(path),
        }
    }

    pub fn bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: Some("application/octet-stream".to_string()),
            headers: Vec::new(),
            body: PartBody::Bytes(data.into()),
        }
    }

    /// A plain form field with no filename and no content type.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            headers: Vec::new(),
            body: PartBody::Bytes(value.into().into_bytes()),
        }
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Add an extra header to this part, after `Content-Disposition` and
    /// `Content-Type`. A name or value containing CR or LF fails `encode`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn get_content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &PartBody {
        &self.body
    }

    /// Reject header text that would end the part head early.
    fn check_head(&self) -> Result<(), ApiError> {
        if let Some(content_type) = &self.content_type {
            check_header_text("Content-Type", content_type)?;
        }
        for (name, value) in &self.headers {
            check_header_text(name, name)?;
            check_header_text(name, value)?;
        }
        Ok(())
    }

    fn write_head(&self, boundary: &str, out: &mut Vec<u8>) {
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", quote(&self.name));
        if let Some(file_name) = &self.file_name {
            disposition.push_str(&format!("; filename=\"{}\"", quote(file_name)));
        }
        out.extend_from_slice(disposition.as_bytes());
        out.extend_from_slice(CRLF);
        if let Some(content_type) = &self.content_type {
            out.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        for (name, value) in &self.headers {
            out.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }
        out.extend_from_slice(CRLF);
    }
}

/// Ordered collection of parts sharing one boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<Part>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::with_boundary(format!("--------------------------{}", Uuid::new_v4().simple()))
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// One `files` part per path, in input order.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths
            .into_iter()
            .fold(Self::new(), |form, path| form.file(FILES_FIELD, path))
    }

    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn part(mut self, part: Part) -> Self {
        self.push(part);
        self
    }

    pub fn file(self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.part(Part::file(name, path))
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Request headers needed to send this form.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![("content-type".to_string(), self.content_type())]
    }

    /// Encode the form into a request body, reading file parts from disk.
    ///
    /// Every part head is checked before any file is read; header text with
    /// CR or LF fails with `ApiError::InvalidHeader`. Files are then read one
    /// at a time in part order, and the first unreadable file aborts encoding
    /// with `ApiError::Io`.
    pub async fn encode(&self) -> Result<Vec<u8>, ApiError> {
        check_header_text("boundary", &self.boundary)?;
        for part in &self.parts {
            part.check_head()?;
        }

        let mut out = Vec::new();
        for part in &self.parts {
            part.write_head(&self.boundary, &mut out);
            match &part.body {
                PartBody::Bytes(data) => out.extend_from_slice(data),
                PartBody::File(path) => out.extend_from_slice(&read_file(path).await?),
            }
            out.extend_from_slice(CRLF);
        }
        out.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Ok(out)
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, ApiError> {
    tokio::fs::read(path).await.map_err(|source| ApiError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn check_header_text(name: &str, text: &str) -> Result<(), ApiError> {
    if text.contains(['\r', '\n']) {
        return Err(ApiError::InvalidHeader {
            name: name.escape_debug().to_string(),
            reason: "contains CR or LF".to_string(),
        });
    }
    Ok(())
}

/// Percent-encode the characters that would end a quoted header parameter.
fn quote(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
