/// Middleware modules for the API server
///
/// The authorization gate itself lives in
/// [`warbler_shared::auth::middleware`]; this module holds middleware
/// specific to the API binary.

pub mod metrics;
