/// Request authorization gate for Axum
///
/// Any route needing an identity is wrapped by this middleware. It runs
/// before the handler: extract the bearer token (missing header fails
/// the request immediately), validate it as an access token, and attach
/// the resolved identity to the request's extensions. The wrapped
/// handler then reads it with `Extension<AuthContext>` and can neither
/// forge nor replace it — the context is written exactly once per
/// request and dropped with it.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use warbler_shared::auth::middleware::{access_token_gate, AuthContext};
///
/// async fn whoami(Extension(auth): Extension<AuthContext>) -> String {
///     auth.user_id.to_string()
/// }
///
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(middleware::from_fn(access_token_gate("signing-secret-at-least-32-bytes!!")));
/// ```

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use super::{extract, token};

/// Identity resolved for one in-flight request
///
/// Inserted into request extensions by the gate after the access token
/// validates; scoped to that request only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// The authenticated user
    pub user_id: Uuid,
}

/// Error type for the authorization gate
///
/// Both variants answer 401 with the same body; a client learns only
/// that the request was not authorized, not why.
#[derive(Debug)]
pub enum AuthError {
    /// No credentials on the request
    MissingCredentials,

    /// Credentials present but not a valid access token
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "unauthorized").into_response()
    }
}

/// Gate middleware: validate the access token, then run the handler
///
/// On any failure the wrapped handler is never invoked.
pub async fn require_access_token(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let bearer =
        extract::bearer_token(req.headers()).map_err(|_| AuthError::MissingCredentials)?;

    let user_id = token::validate_access_token(&bearer, &secret)
        .map_err(|_| AuthError::InvalidToken)?;

    req.extensions_mut().insert(AuthContext { user_id });

    Ok(next.run(req).await)
}

/// Builds a gate closure capturing the signing secret
///
/// Convenience for `axum::middleware::from_fn`; servers that keep the
/// secret in shared state can call [`require_access_token`] directly
/// from their own layer instead.
pub fn access_token_gate(
    secret: impl Into<String>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>>
       + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(require_access_token(secret, req, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::issue_access_token;
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Extension, Router};
    use chrono::Duration;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &str = "gate-test-secret-at-least-32-bytes-long";

    fn gated_app(invoked: Arc<AtomicBool>) -> Router {
        let handler = move |Extension(auth): Extension<AuthContext>| {
            let invoked = invoked.clone();
            async move {
                invoked.store(true, Ordering::SeqCst);
                auth.user_id.to_string()
            }
        };

        Router::new()
            .route("/whoami", get(handler))
            .layer(middleware::from_fn(access_token_gate(SECRET)))
    }

    async fn send(app: Router, auth_header: Option<String>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().method("GET").uri("/whoami");
        if let Some(value) = auth_header {
            builder = builder.header("authorization", value);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    #[tokio::test]
    async fn test_missing_header_rejected_before_handler() {
        let invoked = Arc::new(AtomicBool::new(false));
        let app = gated_app(invoked.clone());

        let (status, _) = send(app, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let invoked = Arc::new(AtomicBool::new(false));
        let app = gated_app(invoked.clone());

        let token = issue_access_token(Uuid::new_v4(), SECRET, Duration::hours(-1)).unwrap();
        let (status, _) = send(app, Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let invoked = Arc::new(AtomicBool::new(false));
        let app = gated_app(invoked.clone());

        let (status, _) = send(app, Some("Bearer not.a.token".to_string())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler_with_identity() {
        let invoked = Arc::new(AtomicBool::new(false));
        let app = gated_app(invoked.clone());

        let user_id = Uuid::new_v4();
        let token = issue_access_token(user_id, SECRET, Duration::hours(1)).unwrap();
        let (status, body) = send(app, Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(invoked.load(Ordering::SeqCst));
        assert_eq!(body, user_id.to_string());
    }
}
