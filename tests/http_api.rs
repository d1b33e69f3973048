use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use image::{GrayImage, ImageFormat, Rgb, RgbImage};
use logocheck_lib::{
    build_router, AppState, LogoAnalyzer, OcrError, TextRecognizer, TranslationError, Translator,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "logocheck-test-boundary";

struct FixedText;

impl TextRecognizer for FixedText {
    fn recognize(&self, _image: &GrayImage) -> Result<String, OcrError> {
        Ok("ACME".to_string())
    }
}

struct Tagging;

impl Translator for Tagging {
    fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError> {
        Ok(format!("[{target}] {text}"))
    }
}

/// Records how many files sit in the upload directory each time OCR runs.
struct StagedFileCounter {
    dir: PathBuf,
    seen: Mutex<Vec<usize>>,
}

impl TextRecognizer for StagedFileCounter {
    fn recognize(&self, _image: &GrayImage) -> Result<String, OcrError> {
        self.seen.lock().unwrap().push(files_in(&self.dir));
        Ok(String::new())
    }
}

fn files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).expect("read upload dir").count()
}

fn app_with(
    recognizer: Arc<dyn TextRecognizer>,
    upload_dir: PathBuf,
    max_upload_bytes: usize,
) -> Router {
    build_router(AppState {
        analyzer: LogoAnalyzer::new(recognizer, Arc::new(Tagging)),
        default_target_language: "en".to_string(),
        max_upload_bytes,
        upload_dir,
    })
}

fn app() -> Router {
    app_with(Arc::new(FixedText), std::env::temp_dir(), 1024 * 1024)
}

fn png(color: [u8; 3]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    RgbImage::from_pixel(8, 8, Rgb(color))
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, Vec<u8>),
}

fn multipart_request(uri: &str, parts: Vec<Part<'_>>) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("build request")
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

#[tokio::test]
async fn health_check_responds_ok() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");
}

#[tokio::test]
async fn root_serves_upload_form() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("enctype=\"multipart/form-data\""));
    assert!(html.contains("<option value=\"en\" selected>English</option>"));
}

#[tokio::test]
async fn json_api_analyzes_images_in_order() {
    let request = multipart_request(
        "/api/analyze",
        vec![
            Part::Text("target_language", "fr"),
            Part::File("images", "white.png", png([255, 255, 255])),
            Part::File("images", "broken.png", b"nope".to_vec()),
            Part::File("images", "black.png", png([0, 0, 0])),
        ],
    );
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["targetLanguage"], "fr");
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["fileName"], "white.png");
    assert_eq!(results[0]["report"]["averageColor"], "#FFFFFF");
    assert_eq!(results[0]["report"]["detectedText"], "ACME");
    assert_eq!(results[0]["report"]["translatedText"], "[fr] ACME");
    assert_eq!(results[0]["report"]["overallScore"], 1.0);

    assert_eq!(results[1]["status"], "failed");

    assert_eq!(results[2]["report"]["contrastRatio"], 21.0);
    assert_eq!(results[2]["report"]["contrastLevel"], "AAA (Large Text)");
}

#[tokio::test]
async fn html_upload_renders_results_with_default_language() {
    let request = multipart_request(
        "/",
        vec![Part::File("images", "navy.png", png([0, 0, 128]))],
    );
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("navy.png"));
    assert!(html.contains("#000080"));
    assert!(html.contains("navy"));
    assert!(html.contains("[en] ACME"));
}

#[tokio::test]
async fn upload_without_images_is_invalid_form() {
    let request = multipart_request("/api/analyze", vec![Part::Text("target_language", "de")]);
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "Invalid form data");
}

#[tokio::test]
async fn non_multipart_post_is_invalid_form() {
    let request = Request::post("/")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "Invalid form data");
}

#[tokio::test]
async fn uploads_are_staged_one_at_a_time_and_removed() {
    let dir = TempDir::new().expect("tempdir");
    let counter = Arc::new(StagedFileCounter {
        dir: dir.path().to_path_buf(),
        seen: Mutex::new(Vec::new()),
    });
    let app = app_with(counter.clone(), dir.path().to_path_buf(), 1024 * 1024);

    let request = multipart_request(
        "/api/analyze",
        vec![
            Part::File("images", "a.png", png([255, 0, 0])),
            Part::File("images", "b.png", png([0, 255, 0])),
            Part::File("images", "c.png", png([0, 0, 255])),
        ],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(counter.seen.lock().unwrap().as_slice(), &[1, 1, 1]);
    assert_eq!(files_in(dir.path()), 0);
}

#[tokio::test]
async fn oversized_upload_is_payload_too_large() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_with(Arc::new(FixedText), dir.path().to_path_buf(), 256);

    let request = multipart_request(
        "/api/analyze",
        vec![Part::File("images", "big.png", vec![0u8; 4096])],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "Upload too large");
    assert_eq!(files_in(dir.path()), 0);
}
