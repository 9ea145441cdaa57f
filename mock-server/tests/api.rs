use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, UploadEcho, UrlEcho};
use tower::ServiceExt;

const BOUNDARY: &str = "mock-test-boundary";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

/// Multipart body with one `files` part per `(filename, content)` pair.
fn multipart_request(uri: &str, files: &[(&str, &str)]) -> Request<String> {
    let mut body = String::new();
    for (filename, content) in files {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        body.push_str(&format!(
            "Content-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\n"
        ));
        body.push_str("Content-Type: image/jpeg\r\n\r\n");
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

// --- url lists ---

#[tokio::test]
async fn url_routes_echo_sources_in_order() {
    for capability in mock_server::CAPABILITIES {
        let resp = app()
            .oneshot(json_request(
                &format!("/{capability}-url/"),
                r#"[{"source":"http://x/1.jpg"},{"source":"http://x/2.jpg"}]"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let echo: UrlEcho = body_json(resp).await;
        assert_eq!(echo.endpoint, format!("{capability}-url/"));
        assert_eq!(echo.sources, vec!["http://x/1.jpg", "http://x/2.jpg"]);
    }
}

#[tokio::test]
async fn url_route_accepts_empty_list() {
    let resp = app().oneshot(json_request("/detect-url/", "[]")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: UrlEcho = body_json(resp).await;
    assert!(echo.sources.is_empty());
}

#[tokio::test]
async fn url_route_rejects_malformed_records() {
    let resp = app()
        .oneshot(json_request("/classify-url/", r#"[{"url":"http://x"}]"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn url_route_requires_json_content_type() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/censor-url/")
                .body(r#"[{"source":"http://x"}]"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- multipart uploads ---

#[tokio::test]
async fn upload_routes_echo_files_in_order() {
    for capability in mock_server::CAPABILITIES {
        let resp = app()
            .oneshot(multipart_request(
                &format!("/{capability}/"),
                &[("a.jpg", "first"), ("b.jpg", "second")],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let echo: UploadEcho = body_json(resp).await;
        assert_eq!(echo.endpoint, format!("{capability}/"));
        assert_eq!(echo.files.len(), 2);
        assert_eq!(echo.files[0].field, "files");
        assert_eq!(echo.files[0].filename.as_deref(), Some("a.jpg"));
        assert_eq!(echo.files[0].content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(echo.files[0].content, "first");
        assert_eq!(echo.files[1].filename.as_deref(), Some("b.jpg"));
        assert_eq!(echo.files[1].size, 6);
    }
}

#[tokio::test]
async fn upload_route_rejects_non_multipart_body() {
    let resp = app()
        .oneshot(json_request("/classify/", "[]"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- routing ---

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app()
        .oneshot(json_request("/blur-url/", "[]"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn get_is_not_allowed() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/classify/")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
