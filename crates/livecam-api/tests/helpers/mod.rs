//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs against the in-memory clip store on a fixed clock, so no
//! network or AWS credentials are needed.

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use livecam_api::services::ClipResolver;
use livecam_api::setup::routes;
use livecam_api::state::AppState;
use livecam_core::Config;
use livecam_storage::MemoryClipStore;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

/// Day prefix the fixed clock resolves to.
pub const DAY: &str = "cams/streams/2024-01-01";

pub const INDEX_HTML: &str = "<html><body><video id=\"live\"></video></body></html>";

/// 2024-01-01 10:05:00 in Asia/Bangkok.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 3, 5, 0).unwrap()
}

/// Key under today's prefix, e.g. `clip("10-00-00", "front")`.
pub fn clip(time: &str, angle: &str) -> String {
    format!("{}/2024-01-01_{}-{}.mp4", DAY, time, angle)
}

/// Test application: server, backing store, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryClipStore>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(index_html_path: &str, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("ENVIRONMENT", "test"),
        ("STORAGE_BACKEND", "memory"),
        ("S3_BUCKET_PREFIX", "cams/"),
        ("INDEX_HTML_PATH", index_html_path),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_vars(|name| vars.get(name).cloned()).expect("valid test config")
}

/// Setup a test app whose store holds `keys`.
pub fn setup_test_app(keys: &[String]) -> TestApp {
    setup_test_app_with(keys, &[])
}

pub fn setup_test_app_with(keys: &[String], overrides: &[(&str, &str)]) -> TestApp {
    let temp_dir = TempDir::new().expect("temp dir");
    let index_path = temp_dir.path().join("index.html");
    std::fs::write(&index_path, INDEX_HTML).expect("write index.html");

    let config = test_config(&index_path.to_string_lossy(), overrides);

    let store = Arc::new(MemoryClipStore::with_base_url("http://clips.test"));
    store
        .insert_keys(keys.iter().map(String::as_str))
        .expect("seed store");

    let resolver = ClipResolver::new(store.clone(), config.clips.clone())
        .with_clock(Arc::new(fixed_now));
    let state = Arc::new(AppState::new(config.clone(), store.clone()).with_resolver(resolver));

    let router = routes::setup_routes(&config, state).expect("routes");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        store,
        _temp_dir: temp_dir,
    }
}
