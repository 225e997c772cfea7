//! Page model
//!
//! Pages are the one entity persisted through a real backend. The server
//! document identifies records with a `_id` field; the remote adapter in
//! `remote::pages` renames it to `id` on ingest so everything above the wire
//! sees one identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Editorial status of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    /// Live on the public site
    Published,
    /// Being edited
    Draft,
    /// Waiting for editorial approval
    Review,
}

impl PageStatus {
    /// String representation used in storage and wire formats
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a CMS page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Unique record id (server-assigned for persisted pages)
    pub id: String,

    /// URL slug. Uniqueness per collection is expected by the site but not
    /// enforced anywhere.
    pub slug: String,

    /// Page title
    pub title: String,

    /// Page body (HTML or markdown, opaque to this layer)
    pub content: String,

    /// Editorial status
    pub status: PageStatus,
}

/// Creation payload for a page. The server assigns the id; callers never
/// fabricate one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPage {
    /// URL slug
    pub slug: String,

    /// Page title
    pub title: String,

    /// Page body
    pub content: String,

    /// Editorial status
    pub status: PageStatus,
}

impl NewPage {
    /// Create a draft creation payload
    ///
    /// # Arguments
    /// * `slug` - URL slug
    /// * `title` - Page title
    #[must_use]
    pub const fn new(slug: String, title: String) -> Self {
        Self {
            slug,
            title,
            content: String::new(),
            status: PageStatus::Draft,
        }
    }

    /// Attach the server-assigned id, producing a full `Page`
    #[must_use]
    pub fn into_page(self, id: String) -> Page {
        Page {
            id,
            slug: self.slug,
            title: self.title,
            content: self.content,
            status: self.status,
        }
    }
}
