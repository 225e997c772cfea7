//! News article model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Publication status of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// Live on the public site
    Published,
    /// Being written, not yet public
    Draft,
    /// Approved, waiting for its publication date
    Scheduled,
}

impl ArticleStatus {
    /// String representation used in storage and wire formats
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a news article on the public site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Unique record id
    pub id: String,

    /// Article headline
    pub title: String,

    /// Short teaser shown in listings
    pub excerpt: String,

    /// Full article body
    pub content: String,

    /// Author display name
    pub author: String,

    /// Free-form tags
    pub tags: Vec<String>,

    /// Publication status
    pub status: ArticleStatus,

    /// When the article went (or goes) live
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsArticle {
    /// Create a new draft article
    ///
    /// # Arguments
    /// * `id` - Unique record id
    /// * `title` - Article headline
    /// * `author` - Author display name
    #[must_use]
    pub const fn new(id: String, title: String, author: String) -> Self {
        Self {
            id,
            title,
            excerpt: String::new(),
            content: String::new(),
            author,
            tags: Vec::new(),
            status: ArticleStatus::Draft,
            published_at: None,
        }
    }

    /// Add a tag if not already present
    pub fn add_tag(&mut self, tag: String) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Mark the article as published now
    pub fn publish(&mut self, at: DateTime<Utc>) {
        self.status = ArticleStatus::Published;
        self.published_at = Some(at);
    }
}
