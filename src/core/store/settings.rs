//! Site settings singleton handle

use std::sync::{Arc, PoisonError, RwLock};

use crate::core::models::SiteSettings;

/// Shared handle to the single `SiteSettings` record
///
/// Same lock discipline as `Repository`: clones share the record, reads
/// return a snapshot, and operations cannot fail.
#[derive(Debug, Clone, Default)]
pub struct SettingsHandle {
    inner: Arc<RwLock<SiteSettings>>,
}

impl SettingsHandle {
    /// Create a handle holding the default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current settings
    #[must_use]
    pub fn get(&self) -> SiteSettings {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the settings wholesale
    pub fn replace(&self, settings: SiteSettings) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = settings;
    }

    /// Apply an in-place update
    pub fn update(&self, f: impl FnOnce(&mut SiteSettings)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}
