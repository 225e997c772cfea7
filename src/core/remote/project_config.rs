//! Project configuration REST adapter
//!
//! Thin client for the admin-configurable project category and status
//! lists. No caching and no retry: a failed request surfaces its
//! `RemoteError` and the caller decides what to show.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{expect_success, normalize_base, RemoteError};

/// A project category, keyed by its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCategory {
    /// Category name
    pub name: String,
}

/// A project status definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStatusDef {
    /// Stable identifier
    pub id: String,
    /// Label shown in the UI
    pub label: String,
    /// Badge color (CSS value)
    pub color: String,
}

/// HTTP client for `{base}/project-categories` and `{base}/project-statuses`
#[derive(Debug, Clone)]
pub struct ProjectConfigClient {
    http: Client,
    base_url: String,
}

impl ProjectConfigClient {
    /// Create a client for the given API base URL
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
        }
    }

    /// Fetch all categories
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer
    pub async fn list_categories(&self) -> Result<Vec<ProjectCategory>, RemoteError> {
        let url = format!("{}/project-categories", self.base_url);
        let response = expect_success(self.http.get(url).send().await?)?;
        Ok(response.json().await?)
    }

    /// Add a category
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer
    pub async fn add_category(&self, category: &ProjectCategory) -> Result<(), RemoteError> {
        let url = format!("{}/project-categories", self.base_url);
        expect_success(self.http.post(url).json(category).send().await?)?;
        Ok(())
    }

    /// Remove a category by name
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer
    pub async fn remove_category(&self, name: &str) -> Result<(), RemoteError> {
        let url = format!("{}/project-categories/{name}", self.base_url);
        expect_success(self.http.delete(url).send().await?)?;
        Ok(())
    }

    /// Fetch all status definitions
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer
    pub async fn list_statuses(&self) -> Result<Vec<ProjectStatusDef>, RemoteError> {
        let url = format!("{}/project-statuses", self.base_url);
        let response = expect_success(self.http.get(url).send().await?)?;
        Ok(response.json().await?)
    }

    /// Add a status definition
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer
    pub async fn add_status(&self, status: &ProjectStatusDef) -> Result<(), RemoteError> {
        let url = format!("{}/project-statuses", self.base_url);
        expect_success(self.http.post(url).json(status).send().await?)?;
        Ok(())
    }

    /// Remove a status definition by id
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer
    pub async fn remove_status(&self, id: &str) -> Result<(), RemoteError> {
        let url = format!("{}/project-statuses/{id}", self.base_url);
        expect_success(self.http.delete(url).send().await?)?;
        Ok(())
    }
}
