//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::io::Cursor;
use tower::ServiceExt;

use beadloom::models::AppConfig;
use beadloom::server::{build_router, create_app_state};

/// Test application with router and a temporary storage directory.
pub struct TestApp {
    router: axum::Router,
    // Held so the storage directory outlives the test
    _storage: tempfile::TempDir,
}

impl TestApp {
    /// Create a new test application with default config and temp storage
    pub fn new() -> Self {
        let storage = tempfile::tempdir().expect("Failed to create temp storage");
        let config = AppConfig {
            storage_dir: storage.path().to_path_buf(),
            ..AppConfig::default()
        };

        let state = create_app_state(&config).expect("Failed to create app state");
        let router = build_router(state);

        Self {
            router,
            _storage: storage,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// POST a multipart upload with an `image` field and optional `label`
    pub async fn post_upload(&self, image: &[u8], label: Option<&str>) -> TestResponse {
        const BOUNDARY: &str = "----beadloom-test-boundary";

        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"image\"; filename=\"test.png\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
        if let Some(label) = label {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            body.extend_from_slice(b"Content-Disposition: form-data; name=\"label\"\r\n\r\n");
            body.extend_from_slice(label.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::post("/generate")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }

    /// The Location header of a redirect
    pub fn location(&self) -> &str {
        self.headers
            .get("location")
            .expect("Missing Location header")
            .to_str()
            .expect("Invalid Location header")
    }
}

/// Encode a row-major RGBA buffer as PNG bytes.
pub fn rgba_png(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    buf.into_inner()
}
