//! In-process stand-in for the Nudeny moderation service.
//!
//! Serves the same nine routes as the real service, but instead of
//! moderating anything it echoes back what it received, so client tests can
//! check the wire shape of their requests.

use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

pub const CAPABILITIES: [&str; 3] = ["classify", "detect", "censor"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UrlSource {
    pub source: String,
}

/// One multipart field as the server saw it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReceivedFile {
    pub field: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
    /// Field content, lossily decoded as UTF-8.
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadEcho {
    pub endpoint: String,
    pub files: Vec<ReceivedFile>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UrlEcho {
    pub endpoint: String,
    pub sources: Vec<String>,
}

pub fn app() -> Router {
    CAPABILITIES.into_iter().fold(Router::new(), |router, capability| {
        router
            .route(
                &format!("/{capability}/"),
                post(move |multipart: Multipart| upload(capability, multipart)),
            )
            .route(
                &format!("/{capability}-url/"),
                post(move |Json(sources): Json<Vec<UrlSource>>| from_urls(capability, sources)),
            )
    })
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn upload(
    capability: &'static str,
    mut multipart: Multipart,
) -> Result<Json<UploadEcho>, (StatusCode, String)> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(rejection)? {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(rejection)?;
        files.push(ReceivedFile {
            field: name,
            filename,
            content_type,
            size: data.len(),
            content: String::from_utf8_lossy(&data).into_owned(),
        });
    }
    debug!(capability, files = files.len(), "multipart upload received");
    Ok(Json(UploadEcho {
        endpoint: format!("{capability}/"),
        files,
    }))
}

async fn from_urls(capability: &'static str, sources: Vec<UrlSource>) -> Json<UrlEcho> {
    debug!(capability, sources = sources.len(), "url list received");
    Json(UrlEcho {
        endpoint: format!("{capability}-url/"),
        sources: sources.into_iter().map(|s| s.source).collect(),
    })
}

fn rejection(err: MultipartError) -> (StatusCode, String) {
    (err.status(), err.body_text())
}
