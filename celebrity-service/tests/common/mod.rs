#![allow(dead_code)]

use celebrity_service::config::CelebrityConfig;
use celebrity_service::services::providers::mock::MockVisionProvider;
use celebrity_service::startup::{build_router, AppState, Application};
use celebrity_service::services::VisionProvider;
use axum::Router;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::Arc;

pub const BOUNDARY: &str = "celebrity-test-boundary";

/// A 10x10 all-black baseline JPEG.
pub const BLACK_JPEG_10X10: &[u8] = &[
    0xff, 0xd8, 0xff, 0xdb, 0x00, 0x43, 0x00, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
    0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
    0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
    0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
    0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0xff, 0xc0, 0x00, 0x0b, 0x08, 0x00, 0x0a, 0x00, 0x0a,
    0x01, 0x01, 0x11, 0x00, 0xff, 0xc4, 0x00, 0x15, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0b, 0xff, 0xc4, 0x00, 0x14, 0x10,
    0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xff, 0xda, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3f, 0x00, 0x5f, 0xf8, 0x00, 0x1f, 0xff,
    0xd9,
];

/// Config as if only `GEMINI_API_KEY` plus `extra` were set.
pub fn test_config(extra: &[(&str, &str)]) -> CelebrityConfig {
    let mut vars: HashMap<String, String> =
        HashMap::from([("GEMINI_API_KEY".to_string(), "test-api-key".to_string())]);
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }

    let common = CoreConfig {
        port: 0, // Random port
        ..CoreConfig::default()
    };

    CelebrityConfig::from_source(common, |key| vars.get(key).cloned())
        .expect("Failed to build test configuration")
}

/// Router wired to a mock provider, plus the mock for inspecting calls.
pub fn router_with(provider: MockVisionProvider) -> (Router, Arc<MockVisionProvider>) {
    router_with_config(test_config(&[]), provider)
}

pub fn router_with_config(
    config: CelebrityConfig,
    provider: MockVisionProvider,
) -> (Router, Arc<MockVisionProvider>) {
    let provider = Arc::new(provider);
    let state = AppState {
        config,
        provider: provider.clone() as Arc<dyn VisionProvider>,
    };
    (build_router(state), provider)
}

/// One part of a hand-built multipart body.
pub struct FormPart<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> FormPart<'a> {
    pub fn image(data: &'a [u8]) -> Self {
        Self {
            name: "image",
            file_name: Some("face.jpg"),
            content_type: Some("image/jpeg"),
            data,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }
}

/// Encode `parts` as a `multipart/form-data` body delimited by [`BOUNDARY`].
pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = part.file_name {
            disposition.push_str(&format!("; filename=\"{}\"", file_name));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Spawn the full application on a random port and wait until it answers.
pub async fn spawn_app(provider: MockVisionProvider) -> (String, Arc<MockVisionProvider>) {
    let provider = Arc::new(provider);
    let app = Application::build_with_provider(
        test_config(&[]),
        provider.clone() as Arc<dyn VisionProvider>,
    )
    .await
    .expect("Failed to build application");

    let address = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    // Wait for HTTP server to be ready by polling health endpoint
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", address);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }

    (address, provider)
}
