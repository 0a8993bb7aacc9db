//! Router-level tests for the upload API, driven through tower's oneshot.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use docsift::api::{router, AppContext};
use docsift::config::{ServerSettings, Settings};

const BOUNDARY: &str = "docsift-test-boundary";

/// Router plus the temp upload directory backing it.
fn test_app() -> (Router, TempDir) {
    let upload_dir = TempDir::new().unwrap();
    let settings = Settings {
        server: ServerSettings {
            upload_dir: upload_dir.path().to_path_buf(),
            ..ServerSettings::default()
        },
        ..Settings::default()
    };

    let ctx = AppContext::new(&settings).unwrap();
    (router(ctx), upload_dir)
}

/// Build a multipart POST to /procesar with a single form field.
fn upload_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; \
             name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/procesar")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn dir_is_empty(dir: &TempDir) -> bool {
    std::fs::read_dir(dir.path()).unwrap().next().is_none()
}

#[tokio::test]
async fn liveness_endpoint_responds() {
    let (app, _uploads) = test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"docsift API is up");
}

#[tokio::test]
async fn txt_upload_returns_cleaned_text() {
    let (app, uploads) = test_app();
    let content = b"TITULO GRANDE\n\nCuerpo del documento.\n42\n";
    let response = app
        .oneshot(upload_request("file", "informe.txt", content))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["nombre_archivo"], "informe.txt");
    let text = body["texto_procesado"].as_str().unwrap();
    assert!(text.contains("## TITULO GRANDE"));
    assert!(text.contains("Cuerpo del documento."));
    assert!(!text.contains("42"));
    assert!(dir_is_empty(&uploads));
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let (app, uploads) = test_app();
    let response = app
        .oneshot(upload_request("attachment", "informe.txt", b"text"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().is_some());
    assert!(dir_is_empty(&uploads));
}

#[tokio::test]
async fn extensionless_filename_is_rejected() {
    let (app, uploads) = test_app();
    let response = app
        .oneshot(upload_request("file", "README", b"text"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().is_some());
    assert!(dir_is_empty(&uploads));
}

#[tokio::test]
async fn unknown_extension_is_rejected() {
    let (app, uploads) = test_app();
    let response = app
        .oneshot(upload_request("file", "payload.xyz", b"text"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(dir_is_empty(&uploads));
}

#[tokio::test]
async fn corrupt_document_yields_500_and_no_leftover_file() {
    let (app, uploads) = test_app();
    let response = app
        .oneshot(upload_request("file", "broken.json", b"{not valid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("broken.json"));
    assert!(dir_is_empty(&uploads));
}

#[tokio::test]
async fn filename_with_directories_is_sanitized() {
    let (app, _uploads) = test_app();
    let response = app
        .oneshot(upload_request("file", "../../tmp/evil.txt", b"contenido"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["nombre_archivo"], "evil.txt");
}
