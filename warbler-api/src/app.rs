/// Application state and router builder
///
/// # Router layout
///
/// ```text
/// /
/// ├── /api/
/// │   ├── GET  /healthz              # health check (public)
/// │   ├── POST /users                # register (public)
/// │   ├── PUT  /users                # update own credentials (gated)
/// │   ├── POST /login                # session login (public)
/// │   ├── POST /refresh              # access token refresh (public, bearer refresh token)
/// │   ├── POST /revoke               # refresh token revocation (public, bearer refresh token)
/// │   ├── POST /posts                # create post (gated)
/// │   ├── GET  /posts                # list posts (public)
/// │   ├── GET  /posts/:id            # fetch post (public)
/// │   ├── DELETE /posts/:id          # delete own post (gated)
/// │   └── POST /webhooks/partner     # billing partner webhook (API key)
/// └── /admin/
///     ├── GET  /metrics              # visit counter
///     └── POST /reset                # reset visit counter
/// ```
///
/// Gated routes sit behind the access token gate
/// ([`warbler_shared::auth::middleware`]); the gate runs before the
/// handler and injects the resolved identity. `/api` traffic is counted
/// by the visit middleware; `/admin` is not.

use crate::{config::Config, error::ApiError, middleware::metrics, routes};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use warbler_shared::auth::middleware::require_access_token;

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; cheap because the
/// pool and config are reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration, read-only after startup
    pub config: Arc<Config>,

    /// Process-wide visit counter
    pub hits: Arc<AtomicU64>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            hits: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Gets the access token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.auth.jwt_secret
    }
}

/// Builds the complete Axum router
pub fn build_router(state: AppState) -> Router {
    // Public API surface
    let public_api = Router::new()
        .route("/healthz", get(routes::health::health_check))
        .route("/users", post(routes::users::register))
        .route("/login", post(routes::sessions::login))
        .route("/refresh", post(routes::sessions::refresh))
        .route("/revoke", post(routes::sessions::revoke))
        .route("/posts", get(routes::posts::list_posts))
        .route("/posts/:id", get(routes::posts::get_post))
        .route("/webhooks/partner", post(routes::webhooks::partner_event));

    // Routes that require a validated identity
    let gated_api = Router::new()
        .route("/users", put(routes::users::update_user))
        .route("/posts", post(routes::posts::create_post))
        .route("/posts/:id", delete(routes::posts::delete_post))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_gate_layer,
        ));

    let api = public_api
        .merge(gated_api)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            metrics::track_visit,
        ));

    let admin = Router::new()
        .route("/metrics", get(routes::admin::metrics))
        .route("/reset", post(routes::admin::reset));

    Router::new()
        .nest("/api", api)
        .nest("/admin", admin)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Authorization gate layer
///
/// Delegates to the shared gate with this process's signing secret; any
/// rejection maps to the uniform unauthorized response before the
/// wrapped handler runs.
async fn auth_gate_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_access_token(state.jwt_secret().to_string(), req, next)
        .await
        .map_err(ApiError::from)
}
