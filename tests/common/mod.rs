//! Shared helpers for HTTP integration tests
//!
//! Requests go straight to the router via `tower::ServiceExt::oneshot`;
//! no TCP listener is involved.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use campdir::config::{Config, RunMode};
use campdir::geo::{GeoPoint, StaticGeocoder};
use campdir::http::{router, AppState};
use campdir::store::Store;
use campdir::upload::PhotoStore;

/// Boston-area test zipcode wired into the static geocoder
pub const BOSTON_ZIP: &str = "02215";

/// Upload size limit used by the test config
pub const MAX_UPLOAD: u64 = 10_000;

/// A router plus the handles tests assert against
pub struct TestApp {
    pub router: Router,
    pub store: Arc<Store>,
    pub upload_dir: TempDir,
}

/// Build the full application router backed by an in-memory store and a
/// fixed-table geocoder
pub fn build_test_app() -> TestApp {
    let upload_dir = TempDir::new().expect("create upload dir");
    let store = Arc::new(Store::in_memory());

    let geocoder = Arc::new(StaticGeocoder::new().with(
        BOSTON_ZIP,
        GeoPoint {
            lat: 42.3505,
            lng: -71.1054,
        },
    ));

    let config = Config {
        mode: RunMode::Production,
        max_file_upload: MAX_UPLOAD,
        file_upload_path: upload_dir.path().to_path_buf(),
        ..Default::default()
    };

    let state = AppState {
        store: Arc::clone(&store),
        geocoder,
        photos: Arc::new(PhotoStore::new(upload_dir.path().to_path_buf())),
        config: Arc::new(config),
    };

    TestApp {
        router: router(state),
        store,
        upload_dir,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// PUT a single-file multipart body under the `file` field
pub async fn put_file(
    app: Router,
    uri: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Response<Body> {
    put_file_as(app, uri, "file", filename, content_type, data).await
}

/// PUT a single-file multipart body under an arbitrary field name
pub async fn put_file_as(
    app: Router,
    uri: &str,
    field_name: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Response<Body> {
    let boundary = "campdir-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// PUT a multipart body with no file part at all
pub async fn put_no_file(app: Router, uri: &str) -> Response<Body> {
    let boundary = "campdir-test-boundary";
    let body = format!("--{boundary}--\r\n");

    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// A valid bootcamp creation payload
pub fn bootcamp_payload(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": "Full stack web development",
        "website": "https://example.com",
        "email": "enroll@example.com",
        "address": "233 Bay State Rd Boston MA 02215",
        "careers": ["Web Development"],
        "location": {
            "type": "Point",
            "coordinates": [-71.1054, 42.3505],
            "formattedAddress": "Boston, MA"
        }
    })
}

/// A valid course creation payload
pub fn course_payload(title: &str, tuition: f64) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": "A hands-on course",
        "weeks": 8,
        "tuition": tuition,
        "minimumSkill": "beginner"
    })
}
