/// API route handlers
///
/// Organized by resource:
///
/// - `health`: health check
/// - `users`: registration and credential updates
/// - `sessions`: login, token refresh, revocation
/// - `posts`: content CRUD
/// - `webhooks`: billing partner events
/// - `admin`: operator endpoints

pub mod admin;
pub mod health;
pub mod posts;
pub mod sessions;
pub mod users;
pub mod webhooks;
