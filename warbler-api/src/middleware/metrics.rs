/// Visit counting middleware
///
/// Increments the process-wide counter once per `/api` request. The
/// counter is an atomic in shared state; no lock is held across the
/// handler.

use crate::app::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::atomic::Ordering;

/// Counts the request, then runs the rest of the stack
pub async fn track_visit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::Relaxed);
    next.run(req).await
}
