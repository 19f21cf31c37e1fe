#![allow(dead_code)]

//! Test infrastructure for rnf-server router tests

use rnf_auth::{
    AuthenticationStateProvider, EmailSender, IdentityService, PasswordHasher,
    Result as AuthErrorResult,
};
use rnf_config::{Config, HostEnvironment};
use rnf_log::shipping::LogShipper;
use rnf_server::{ANTIFORGERY_COOKIE_NAME, ANTIFORGERY_HEADER_NAME, AppState, build_router};

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "Pa55word!";
pub const IDENTITY_COOKIE: &str = ".Rnf.Identity";

/// Reversible stand-in for Argon2 so router tests stay fast
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, password: &str) -> AuthErrorResult<String> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> AuthErrorResult<bool> {
        Ok(hash.strip_prefix("plain$") == Some(password))
    }
}

/// Records confirmation links instead of sending them
#[derive(Default)]
pub struct RecordingEmailSender {
    links: Mutex<Vec<String>>,
}

impl RecordingEmailSender {
    /// Path and query of the most recent confirmation link
    pub fn last_link_path(&self) -> String {
        let link = self
            .links
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no confirmation link sent");
        let start = link.find("/Account/").expect("unexpected link");
        link[start..].to_string()
    }

    pub fn count(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_confirmation_link(
        &self,
        _email: &str,
        confirmation_link: &str,
    ) -> AuthErrorResult<()> {
        self.links
            .lock()
            .unwrap()
            .push(confirmation_link.to_string());
        Ok(())
    }
}

/// A router over an in-memory database and a temporary content root
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub sender: Arc<RecordingEmailSender>,
    pub content_root: TempDir,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.https_redirection = false;
    config.identity.cookie_secure = false;
    config
}

pub async fn create_test_pool() -> SqlitePool {
    let pool = rnf_db::connect("sqlite::memory:")
        .await
        .expect("Failed to create test pool");

    rnf_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(test_config(), "Production", None).await
}

pub async fn create_test_app_with(
    config: Config,
    environment: &str,
    shipper: Option<LogShipper>,
) -> TestApp {
    let pool = create_test_pool().await;
    let content_root = TempDir::new().expect("Failed to create content root");
    std::fs::create_dir_all(content_root.path().join(&config.server.static_dir))
        .expect("Failed to create static dir");

    let sender = Arc::new(RecordingEmailSender::default());
    let identity = IdentityService::new(
        pool.clone(),
        Arc::new(PlainTextHasher),
        sender.clone(),
        config.identity.clone(),
    );
    let auth_state = AuthenticationStateProvider::new(pool.clone(), &config.identity);

    let state = AppState {
        pool,
        identity: Arc::new(identity),
        auth_state: Arc::new(auth_state),
        shipper,
        environment: HostEnvironment::new(environment, content_root.path()),
        server: config.server.clone(),
    };

    TestApp {
        router: build_router(state.clone()),
        state,
        sender,
        content_root,
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Value of the named cookie in the response's Set-Cookie headers
pub fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?;
            let (cookie_name, value) = pair.split_once('=')?;
            (cookie_name.trim() == name).then(|| value.trim().to_string())
        })
}

/// Full Set-Cookie header of the named cookie
pub fn set_cookie_header(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|cookie| cookie.starts_with(&format!("{name}=")))
        .map(str::to_string)
}

/// Anti-forgery cookie and header token, as a browser would hold them
pub struct Antiforgery {
    pub cookie: String,
    pub token: String,
}

pub async fn fetch_antiforgery(app: &TestApp) -> Antiforgery {
    let request = Request::builder()
        .method("GET")
        .uri("/antiforgery/token")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    let cookie_value =
        set_cookie_value(&response, ANTIFORGERY_COOKIE_NAME).expect("no antiforgery cookie");
    let json = body_json(response).await;

    Antiforgery {
        cookie: format!("{ANTIFORGERY_COOKIE_NAME}={cookie_value}"),
        token: json["token"].as_str().unwrap().to_string(),
    }
}

/// POST with a JSON body, the anti-forgery pair and any extra cookies
pub fn post_json(
    uri: &str,
    body: Value,
    antiforgery: &Antiforgery,
    cookies: &[String],
) -> Request<Body> {
    let mut all_cookies = vec![antiforgery.cookie.clone()];
    all_cookies.extend(cookies.iter().cloned());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, all_cookies.join("; "))
        .header(ANTIFORGERY_HEADER_NAME, &antiforgery.token)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_with_cookies(uri: &str, cookies: &[String]) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies.join("; "));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn register(app: &TestApp, email: &str) -> Response<Body> {
    let antiforgery = fetch_antiforgery(app).await;
    let body = json!({
        "email": email,
        "password": PASSWORD,
        "confirmPassword": PASSWORD,
    });
    app.send(post_json("/Account/Register", body, &antiforgery, &[]))
        .await
}

pub async fn confirm_last_link(app: &TestApp) -> Response<Body> {
    let path = app.sender.last_link_path();
    app.send(get_with_cookies(&path, &[])).await
}

pub async fn login(app: &TestApp, email: &str, password: &str) -> Response<Body> {
    let antiforgery = fetch_antiforgery(app).await;
    let body = json!({ "email": email, "password": password });
    app.send(post_json("/Account/Login", body, &antiforgery, &[]))
        .await
}

/// Registers, confirms and signs in; returns the identity cookie pair
pub async fn signed_in_cookie(app: &TestApp, email: &str) -> String {
    register(app, email).await;
    confirm_last_link(app).await;
    let response = login(app, email, PASSWORD).await;
    let token = set_cookie_value(&response, IDENTITY_COOKIE).expect("no identity cookie");
    format!("{IDENTITY_COOKIE}={token}")
}
