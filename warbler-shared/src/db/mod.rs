/// Database layer for Warbler
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: migration runner over the workspace `migrations/`
///   directory

pub mod migrations;
pub mod pool;
