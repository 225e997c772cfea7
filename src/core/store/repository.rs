//! Generic in-memory repository

use std::sync::{Arc, PoisonError, RwLock};

/// A record that can live in a `Repository`
pub trait Entity: Clone {
    /// Unique record id
    fn id(&self) -> &str;
}

/// An insertion-ordered, id-addressed collection behind a shared lock
///
/// Handles are cheap to clone and all clones see the same records. Id
/// assignment belongs to the caller (see `ids::new_id`); the repository
/// performs no validation of any field; these collections hold whatever
/// the views wrote, exactly as written. Operations cannot fail, as there is
/// no I/O underneath.
#[derive(Debug)]
pub struct Repository<T: Entity> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Repository<T> {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Snapshot of the collection in insertion order
    #[must_use]
    pub fn list(&self) -> Vec<T> {
        self.read().clone()
    }

    /// Get a record by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<T> {
        self.read().iter().find(|r| r.id() == id).cloned()
    }

    /// Append a record. The caller assigns the id; duplicates are not
    /// rejected here (id discipline belongs to the id generator).
    pub fn create(&self, record: T) {
        self.write().push(record);
    }

    /// Replace the record whose id matches, preserving its position
    ///
    /// # Returns
    /// `true` if a record was replaced, `false` if no id matched (no-op)
    pub fn update(&self, record: T) -> bool {
        let mut records = self.write();
        if let Some(existing) = records.iter_mut().find(|r| r.id() == record.id()) {
            *existing = record;
            true
        } else {
            false
        }
    }

    /// Remove the record with the given id
    ///
    /// # Returns
    /// `true` if a record was removed; calling again is a no-op returning
    /// `false`
    pub fn delete(&self, id: &str) -> bool {
        let mut records = self.write();
        if let Some(pos) = records.iter().position(|r| r.id() == id) {
            records.remove(pos);
            true
        } else {
            false
        }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Remove all records
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<T>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<T>> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Rec {
        id: String,
        value: u32,
    }

    impl Entity for Rec {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn rec(id: &str, value: u32) -> Rec {
        Rec {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_create_then_list_preserves_fields() {
        let repo = Repository::new();
        repo.create(rec("a", 1));

        let listed = repo.list();
        assert_eq!(listed, vec![rec("a", 1)]);
    }

    #[test]
    fn test_update_replaces_only_match_and_keeps_order() {
        let repo = Repository::new();
        repo.create(rec("a", 1));
        repo.create(rec("b", 2));
        repo.create(rec("c", 3));

        assert!(repo.update(rec("b", 20)));

        let listed = repo.list();
        assert_eq!(listed, vec![rec("a", 1), rec("b", 20), rec("c", 3)]);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let repo = Repository::new();
        repo.create(rec("a", 1));

        assert!(!repo.update(rec("z", 9)));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let repo = Repository::new();
        repo.create(rec("a", 1));
        repo.create(rec("b", 2));

        assert!(repo.delete("a"));
        assert!(!repo.delete("a"));
        assert_eq!(repo.list(), vec![rec("b", 2)]);
    }

    #[test]
    fn test_get() {
        let repo = Repository::new();
        repo.create(rec("a", 1));

        assert_eq!(repo.get("a"), Some(rec("a", 1)));
        assert_eq!(repo.get("z"), None);
    }

    #[test]
    fn test_shared_handles() {
        let repo = Repository::new();
        let handle = repo.clone();

        repo.create(rec("a", 1));
        handle.create(rec("b", 2));

        assert_eq!(repo.len(), 2);
        assert_eq!(handle.len(), 2);
    }

    #[test]
    fn test_clear() {
        let repo = Repository::new();
        repo.create(rec("a", 1));
        repo.clear();

        assert!(repo.is_empty());
    }
}
