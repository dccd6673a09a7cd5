//! Common utilities shared by the runner and the CLI

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Join a base URL and an endpoint path without doubling or dropping slashes.
///
/// The health endpoint is addressed as `/`, which keeps the trailing slash
/// on the base (`http://host/api/`).
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() || path == "/" {
        return format!("{}/", base);
    }
    format!("{}/{}", base, path.trim_start_matches('/'))
}
