#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use webtoapp_analysis::{OfflineAnalyzer, SiteAnalyzer};
use webtoapp_api::auth::jwt::{generate_access_token, JwtConfig};
use webtoapp_api::auth::password::hash_password;
use webtoapp_api::auth::verification::VerificationCodes;
use webtoapp_api::config::ServerConfig;
use webtoapp_api::router::build_app_router;
use webtoapp_api::state::AppState;
use webtoapp_core::types::DbId;
use webtoapp_db::models::app::App;
use webtoapp_db::models::user::{CreateUser, User};
use webtoapp_db::repositories::{AppRepo, UserRepo};
use webtoapp_events::{EmailError, EventBus, EventPersistence, Notification, Notifier};
use webtoapp_pipeline::{GenerationDelays, JobRunner, PgAppStore};

pub const TEST_PASSWORD: &str = "test_password_123";

/// Build a test `ServerConfig` with safe defaults and instant generation.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        generation: GenerationDelays::zero(),
    }
}

// ---------------------------------------------------------------------------
// Recording notifier
// ---------------------------------------------------------------------------

/// Captures every notification instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, Notification)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, Notification)> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recent verification code mailed to `email`.
    pub fn last_code(&self, email: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find_map(|(to, n)| match n {
                Notification::VerificationCode { code } if to == email => Some(code),
                _ => None,
            })
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, to_email: &str, notification: &Notification) -> Result<(), EmailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to_email.to_string(), notification.clone()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App builder
// ---------------------------------------------------------------------------

/// A router plus handles on the collaborators tests inspect.
pub struct TestApp {
    pub router: Router,
    pub notifier: Arc<RecordingNotifier>,
    pub config: ServerConfig,
}

/// Build the full application router over `pool`, with the offline
/// analyzer, a recording notifier, zero generation delays, and event
/// persistence running.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let config = test_config();
    let event_bus = Arc::new(EventBus::default());
    tokio::spawn(EventPersistence::run(pool.clone(), event_bus.subscribe()));
    let analyzer: Arc<dyn SiteAnalyzer> = Arc::new(OfflineAnalyzer);
    let notifier = Arc::new(RecordingNotifier::default());

    let runner = JobRunner::new(
        Arc::new(PgAppStore::new(pool.clone())),
        Arc::clone(&analyzer),
        Arc::clone(&event_bus),
        config.generation,
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
        runner,
        analyzer,
        notifier: notifier.clone(),
        verification_codes: Arc::new(VerificationCodes::new()),
    };

    TestApp {
        router: build_app_router(state, &config),
        notifier,
        config,
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] and return it with a bearer token.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> (User, String) {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        first_name: None,
        last_name: None,
    };
    let mut user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    if user.role != role {
        user = UserRepo::update_role(pool, user.id, role)
            .await
            .expect("role update should succeed")
            .expect("user should exist");
    }
    let token = generate_access_token(user.id, &user.role, &test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

/// Poll an app until its status is terminal.
pub async fn wait_for_terminal(pool: &PgPool, app_id: DbId) -> App {
    for _ in 0..200 {
        let app = AppRepo::find_by_id(pool, app_id)
            .await
            .expect("query should succeed")
            .expect("app should exist");
        if app.status().is_some_and(|s| s.is_terminal()) {
            return app;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("app {app_id} did not reach a terminal status");
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Post a single-file multipart body to `uri`.
pub async fn post_multipart_auth(
    app: &Router,
    uri: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
    token: &str,
) -> Response {
    let boundary = "webtoapp-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
