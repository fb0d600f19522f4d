/// Database models for Warbler
///
/// Each model owns its table's CRUD operations, written as inherent
/// methods over a `PgPool`.
///
/// # Models
///
/// - `user`: accounts and stored credentials
/// - `post`: the short-form content items users publish
/// - `refresh_token`: server-side session records backing long-lived
///   logins

pub mod post;
pub mod refresh_token;
pub mod user;
