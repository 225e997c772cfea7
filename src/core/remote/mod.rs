//! REST adapters for the portal backends
//!
//! Two backends exist: the pages CRUD API and the project-configuration
//! lists. Every operation returns a `Result`: a non-2xx answer or a
//! transport failure reaches the caller as a `RemoteError` instead of being
//! swallowed.

mod error;
mod pages;
mod project_config;

pub use error::RemoteError;
pub use pages::{PageClient, PageStore};
pub use project_config::{ProjectCategory, ProjectConfigClient, ProjectStatusDef};

/// Map a non-2xx response to `RemoteError::Status`
fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status { status })
    }
}

/// Normalize a base URL by trimming trailing slashes
fn normalize_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
