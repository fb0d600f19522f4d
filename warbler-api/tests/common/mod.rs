/// Common test utilities for integration tests
///
/// Provides shared infrastructure: a router wired to a live Postgres
/// (from `DATABASE_URL`), fixed test secrets, helpers for driving the
/// app through `tower::Service`, and per-test account setup/cleanup.

use axum::body::Body;
use axum::http::{Request, Response};
use sqlx::PgPool;
use uuid::Uuid;
use warbler_api::app::{build_router, AppState};
use warbler_api::config::{ApiConfig, AuthConfig, Config, DatabaseConfig};

/// Signing secret used by every test
pub const TEST_JWT_SECRET: &str = "integration-test-secret-32-bytes-min!";

/// Partner key used by every test
pub const TEST_PARTNER_KEY: &str = "test-partner-key-f271c81ff7084fac";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a test context against the database from `DATABASE_URL`
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is required for integration tests"))?;

        let db = PgPool::connect(&database_url).await?;

        // Path relative to the crate manifest, not this file
        sqlx::migrate!("../migrations").run(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
            },
            auth: AuthConfig {
                jwt_secret: TEST_JWT_SECRET.to_string(),
                partner_api_key: TEST_PARTNER_KEY.to_string(),
                access_token_ttl_seconds: 3600,
                refresh_token_ttl_days: 60,
            },
        };

        let app = build_router(AppState::new(db.clone(), config));

        Ok(Self { db, app })
    }

    /// Returns a unique email for this test run
    pub fn unique_email(&self, tag: &str) -> String {
        format!("{}-{}@example.com", tag, Uuid::new_v4())
    }

    /// Removes a test user and, via cascade, their posts and sessions
    pub async fn remove_user(&self, email: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Sends a JSON request through the router
pub async fn request_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    auth_header: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    use tower::ServiceExt;

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth_header {
        builder = builder.header("authorization", value);
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

/// Reads a response body as JSON
pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Reads a response body as a string
pub async fn response_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

/// Registers a user and logs them in, returning
/// (user_id, access_token, refresh_token)
pub async fn register_and_login(
    ctx: &TestContext,
    email: &str,
    password: &str,
) -> (Uuid, String, String) {
    let response = request_json(
        &ctx.app,
        "POST",
        "/api/users",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(response.status(), 201, "registration should succeed");

    let response = request_json(
        &ctx.app,
        "POST",
        "/api/login",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(response.status(), 200, "login should succeed");

    let body = response_json(response).await;
    let user_id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
    let access_token = body["token"].as_str().unwrap().to_string();
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    (user_id, access_token, refresh_token)
}
