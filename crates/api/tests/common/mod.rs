#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use hurlrun_api::config::{RunMode, ServerConfig};
use hurlrun_api::router::build_app_router;
use hurlrun_api::scripting::orchestrator::RunOrchestrator;
use hurlrun_api::state::AppState;
use hurlrun_core::jobs::JobStore;
use hurlrun_core::scripting::hurl::HurlExecutor;

/// Bearer token configured for async-mode test apps.
pub const TEST_TOKEN: &str = "test-token";

/// Stand-in for the hurl binary.
///
/// `--version` prints a version line; `--test <file>` runs the submitted
/// script with `/bin/sh`, so a test controls stdout, stderr and exit code
/// through the request body.
const FAKE_HURL: &str = r#"#!/bin/sh
case "$1" in
  --version)
    echo "hurl 6.0.0 (fake)"
    ;;
  --test)
    exec /bin/sh "$2"
    ;;
  *)
    echo "unexpected arguments: $*" >&2
    exit 2
    ;;
esac
"#;

static FAKE_HURL_DIR: OnceLock<tempfile::TempDir> = OnceLock::new();

/// Path of the fake hurl binary, written once per test binary.
pub fn fake_hurl() -> String {
    let dir = FAKE_HURL_DIR.get_or_init(|| {
        let dir = tempfile::tempdir().expect("create fake hurl dir");
        let path = dir.path().join("hurl");
        std::fs::write(&path, FAKE_HURL).expect("write fake hurl");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod fake hurl");
        dir
    });
    dir.path().join("hurl").to_string_lossy().into_owned()
}

/// Build a test `ServerConfig` for `mode` storing results under `results_dir`.
pub fn test_config(mode: RunMode, results_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        mode,
        api_token: match mode {
            RunMode::Async => Some(TEST_TOKEN.to_string()),
            RunMode::Sync => None,
        },
        results_dir: results_dir.to_path_buf(),
        hurl_bin: fake_hurl(),
        request_timeout_secs: None,
    }
}

/// A fully wired application plus the scratch directory backing its store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    results: tempfile::TempDir,
}

impl TestApp {
    pub fn results_dir(&self) -> &Path {
        self.results.path()
    }

    pub fn store(&self) -> &JobStore {
        self.state.orchestrator.store()
    }
}

/// Build the app for `mode` with the default test configuration.
pub fn build_test_app(mode: RunMode) -> TestApp {
    build_test_app_with(mode, |_| {})
}

/// Build the app for `mode`, letting the caller adjust the configuration.
///
/// This goes through [`build_app_router`] so tests exercise the same
/// middleware stack production uses.
pub fn build_test_app_with(mode: RunMode, customize: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let results = tempfile::tempdir().expect("create results dir");
    let mut config = test_config(mode, results.path());
    customize(&mut config);

    let orchestrator = RunOrchestrator::new(
        JobStore::new(config.results_dir.clone()),
        HurlExecutor::new(config.hurl_bin.clone()),
    );
    let state = AppState {
        config: Arc::new(config.clone()),
        orchestrator: Arc::new(orchestrator),
    };
    let router = build_app_router(state.clone(), &config);

    TestApp {
        router,
        state,
        results,
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn request(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: &str,
    auth: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth {
        builder = builder.header(AUTHORIZATION, value);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// GET `uri` without credentials.
pub async fn get(app: &TestApp, uri: &str) -> Response {
    request(app, Method::GET, uri, "", None).await
}

/// GET `uri` with the test bearer token.
pub async fn get_auth(app: &TestApp, uri: &str) -> Response {
    request(app, Method::GET, uri, "", Some(&bearer(TEST_TOKEN))).await
}

/// POST a raw script to `/run` without credentials.
pub async fn post_run(app: &TestApp, script: &str) -> Response {
    request(app, Method::POST, "/run", script, None).await
}

/// POST a raw script to `/run` with the test bearer token.
pub async fn post_run_auth(app: &TestApp, script: &str) -> Response {
    request(app, Method::POST, "/run", script, Some(&bearer(TEST_TOKEN))).await
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn content_type(response: &Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default()
}

/// Submit `script` in async mode and return the job id from the response.
pub async fn submit(app: &TestApp, script: &str) -> String {
    let response = post_run_auth(app, script).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["id"].as_str().expect("id in response").to_string()
}

/// Poll `/results/{id}` until it stops answering 202, or give up after 10s.
pub async fn wait_for_result(app: &TestApp, id: &str) -> Response {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let response = get_auth(app, &format!("/results/{id}")).await;
        if response.status() != StatusCode::ACCEPTED {
            return response;
        }
        assert!(Instant::now() < deadline, "job {id} still pending after 10s");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
