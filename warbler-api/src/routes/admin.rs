/// Operator endpoints
///
/// # Endpoints
///
/// - `GET /admin/metrics` - visit counter as an HTML page
/// - `POST /admin/reset` - zero the counter, returning the old value

use crate::app::AppState;
use axum::{extract::State, response::Html};
use std::sync::atomic::Ordering;

/// Renders the visit counter
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.hits.load(Ordering::Relaxed);

    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Warbler Admin</h1>\n    <p>Warbler has been visited {} times!</p>\n  </body>\n</html>",
        hits
    ))
}

/// Zeroes the visit counter and reports the previous value
pub async fn reset(State(state): State<AppState>) -> String {
    let previous = state.hits.swap(0, Ordering::Relaxed);
    previous.to_string()
}
