//! Course model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty level of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    /// No prior knowledge expected
    Beginner,
    /// Builds on introductory material
    Intermediate,
    /// For experienced students
    Advanced,
}

impl CourseLevel {
    /// String representation used in storage and wire formats
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication status of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    /// Visible in the catalogue and open for enrollment
    Active,
    /// Being edited in the back-office, not yet public
    Draft,
    /// Retired from the catalogue
    Archived,
}

impl CourseStatus {
    /// String representation used in storage and wire formats
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draft => "draft",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a course in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique record id (assigned by the caller, see `ids::new_id`)
    pub id: String,

    /// Course title (e.g., "Introduction aux réseaux")
    pub title: String,

    /// Short catalogue description
    pub description: String,

    /// Instructor display name
    pub instructor: String,

    /// Catalogue category (e.g., "Informatique")
    pub category: String,

    /// Difficulty level
    pub level: CourseLevel,

    /// Maximum number of students
    pub capacity: u32,

    /// Number of currently enrolled students
    pub enrolled: u32,

    /// Average student rating, 0.0 to 5.0
    pub rating: f32,

    /// Publication status
    pub status: CourseStatus,
}

impl Course {
    /// Create a new draft course with an empty description and no enrollment
    ///
    /// # Arguments
    /// * `id` - Unique record id
    /// * `title` - Course title
    /// * `instructor` - Instructor display name
    /// * `capacity` - Maximum number of students
    #[must_use]
    pub const fn new(id: String, title: String, instructor: String, capacity: u32) -> Self {
        Self {
            id,
            title,
            description: String::new(),
            instructor,
            category: String::new(),
            level: CourseLevel::Beginner,
            capacity,
            enrolled: 0,
            rating: 0.0,
            status: CourseStatus::Draft,
        }
    }

    /// Number of seats still available (zero when over-enrolled)
    #[must_use]
    pub const fn seats_left(&self) -> u32 {
        self.capacity.saturating_sub(self.enrolled)
    }

    /// Whether the course has reached capacity
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }
}
