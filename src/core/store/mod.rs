//! Typed in-memory repositories
//!
//! Each domain entity gets one `Repository`, the single source of truth for
//! that collection within a session. `Store` is the application-root
//! composition: construct it once and hand clones to views and services.
//! There are no module-level singletons.

mod repository;
mod settings;

pub use repository::{Entity, Repository};
pub use settings::SettingsHandle;

use crate::core::models::{Course, Event, NewsArticle, Page, Project};
use crate::core::seed;

impl Entity for Course {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Event {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for NewsArticle {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Page {
    fn id(&self) -> &str {
        &self.id
    }
}

/// All domain collections plus the settings singleton
///
/// Clones share the underlying collections, so a service holding a clone
/// observes every mutation made through the original.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Course catalogue
    pub courses: Repository<Course>,
    /// School events
    pub events: Repository<Event>,
    /// News articles
    pub news: Repository<NewsArticle>,
    /// Student and teacher projects
    pub projects: Repository<Project>,
    /// Site branding and theme
    pub settings: SettingsHandle,
}

impl Store {
    /// Create a store with empty collections and default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the demo dataset
    #[must_use]
    pub fn with_sample_data() -> Self {
        let store = Self::new();
        seed::populate(&store);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Project;

    #[test]
    fn test_store_starts_empty() {
        let store = Store::new();

        assert!(store.courses.is_empty());
        assert!(store.events.is_empty());
        assert!(store.news.is_empty());
        assert!(store.projects.is_empty());
    }

    #[test]
    fn test_clones_share_collections() {
        let store = Store::new();
        let view = store.clone();

        store.projects.create(Project::new("p-1".to_string(), "Robot".to_string()));

        assert_eq!(view.projects.len(), 1);
    }

    #[test]
    fn test_sample_data_is_populated() {
        let store = Store::with_sample_data();

        assert!(!store.courses.is_empty());
        assert!(!store.events.is_empty());
        assert!(!store.news.is_empty());
        assert!(!store.projects.is_empty());
        assert!(!store.settings.get().school_name.is_empty());
    }
}
