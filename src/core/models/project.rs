//! Project model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a student project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Scoping, no work started
    Planning,
    /// Work in progress
    Active,
    /// Paused
    OnHold,
    /// Delivered
    Completed,
}

impl ProjectStatus {
    /// String representation used in storage and wire formats
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPriority {
    /// Can slip
    Low,
    /// Normal planning weight
    Medium,
    /// Needs attention first
    High,
}

impl ProjectPriority {
    /// String representation used in storage and wire formats
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ProjectPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a student or teacher project
///
/// `progress` is intended to lie in 0..=100 but is stored as given; the
/// store performs no validation, and callers (and the analytics averages)
/// see whatever was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique record id
    pub id: String,

    /// Project title
    pub title: String,

    /// Short description
    pub description: String,

    /// Project category (admin-configurable, see the project-configuration
    /// client in `remote`)
    pub category: String,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// Priority
    pub priority: ProjectPriority,

    /// Completion percentage, 0..=100 intended
    pub progress: u32,

    /// Member display names (denormalized, not user references)
    pub members: Vec<String>,
}

impl Project {
    /// Create a new project in planning
    ///
    /// # Arguments
    /// * `id` - Unique record id
    /// * `title` - Project title
    #[must_use]
    pub const fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            description: String::new(),
            category: String::new(),
            status: ProjectStatus::Planning,
            priority: ProjectPriority::Medium,
            progress: 0,
            members: Vec::new(),
        }
    }

    /// Add a member by display name if not already present
    pub fn add_member(&mut self, name: String) {
        if !self.members.contains(&name) {
            self.members.push(name);
        }
    }

    /// Remove a member by display name
    ///
    /// # Returns
    /// `true` if the member was removed, `false` if absent
    pub fn remove_member(&mut self, name: &str) -> bool {
        if let Some(pos) = self.members.iter().position(|m| m == name) {
            self.members.remove(pos);
            true
        } else {
            false
        }
    }

    /// Number of members
    #[must_use]
    pub const fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project::new("p-1".to_string(), "Robot suiveur de ligne".to_string())
    }

    #[test]
    fn test_project_creation() {
        let project = sample();

        assert_eq!(project.id, "p-1");
        assert_eq!(project.status, ProjectStatus::Planning);
        assert_eq!(project.priority, ProjectPriority::Medium);
        assert_eq!(project.progress, 0);
        assert_eq!(project.member_count(), 0);
    }

    #[test]
    fn test_members() {
        let mut project = sample();

        project.add_member("Awa".to_string());
        project.add_member("Mamadou".to_string());
        project.add_member("Awa".to_string());

        assert_eq!(project.member_count(), 2);

        assert!(project.remove_member("Awa"));
        assert!(!project.remove_member("Awa"));
        assert_eq!(project.member_count(), 1);
    }

    #[test]
    fn test_out_of_range_progress_is_stored_as_given() {
        let mut project = sample();
        project.progress = 150;

        assert_eq!(project.progress, 150);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(ProjectStatus::OnHold.as_str(), "on_hold");
        assert_eq!(ProjectPriority::High.to_string(), "high");
    }
}
